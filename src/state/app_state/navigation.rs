use super::AppState;
use crate::runtime::event::{SystemEvent, WidgetAction};
use crate::terminal::KeyEvent;
use crate::widgets::node::find_node_mut;
use crate::widgets::traits::{InteractionResult, TextAction};
use tracing::{debug, info, warn};

impl AppState {
    pub fn dispatch_key_to_focused(&mut self, key: KeyEvent) -> InteractionResult {
        let Some(focused_id) = self.focus.current_id().map(ToOwned::to_owned) else {
            return InteractionResult::ignored();
        };

        let result = {
            let nodes = self.current_nodes_mut();
            let Some(node) = find_node_mut(nodes, &focused_id) else {
                return InteractionResult::ignored();
            };
            node.on_key(key)
        };

        if result.handled {
            self.validate_node(&focused_id);
        }
        result
    }

    pub fn dispatch_text_action_to_focused(&mut self, action: TextAction) -> InteractionResult {
        let Some(focused_id) = self.focus.current_id().map(ToOwned::to_owned) else {
            return InteractionResult::ignored();
        };

        let result = {
            let nodes = self.current_nodes_mut();
            let Some(node) = find_node_mut(nodes, &focused_id) else {
                return InteractionResult::ignored();
            };
            node.on_text_action(action)
        };

        if result.handled {
            self.validate_node(&focused_id);
        }
        result
    }

    /// Delivers a background event to every node of every step, so a section
    /// that is not on screen still receives its late results.
    pub fn dispatch_system_event(&mut self, event: SystemEvent) -> InteractionResult {
        let mut merged = InteractionResult::ignored();
        for step in self.flow.steps_mut() {
            for node in step.nodes.iter_mut() {
                merged.merge(node.on_system_event(&event));
            }
        }
        self.revalidate_all();
        merged
    }

    pub fn focus_next(&mut self) {
        self.blur_focused();
        self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.blur_focused();
        self.focus.prev();
    }

    pub fn next_step(&mut self) -> bool {
        self.blur_focused();
        self.touch_current_step();
        if !self.flow.advance() {
            return false;
        }
        self.rebuild_focus();
        debug!(step = self.current_step_id(), "advanced");
        true
    }

    pub fn prev_step(&mut self) -> bool {
        self.blur_focused();
        self.touch_current_step();
        if !self.flow.back() {
            return false;
        }
        self.rebuild_focus();
        debug!(step = self.current_step_id(), "went back");
        true
    }

    pub fn handle_widget_action(&mut self, action: WidgetAction) -> bool {
        match action {
            WidgetAction::SectionChanged(change) => self.form.apply(change),
            WidgetAction::InputDone => {
                if self.focus.is_last() {
                    self.next_step();
                } else {
                    self.focus_next();
                }
                true
            }
            WidgetAction::Touched { id } => {
                self.touch_node(id.as_str());
                true
            }
            WidgetAction::SubmitRequested => {
                self.submit();
                true
            }
        }
    }

    /// Reveals every error, then runs the submit gate. A refusal moves focus
    /// to the field named by the banner; success hands the ad to the
    /// submitter and ends the session.
    pub fn submit(&mut self) {
        if self.should_exit {
            return;
        }
        self.blur_focused();
        self.touch_all_steps();
        self.submit_error = None;

        match self.form.attempt_submit() {
            Ok(submission) => match self.submitter.submit(&submission) {
                Ok(()) => {
                    info!(title = %submission.payload.title, "ad posted");
                    self.submission = Some(submission);
                    self.request_exit();
                }
                Err(err) => {
                    warn!(error = %err, "submitter rejected the ad");
                    self.submit_error = Some(err.to_string());
                }
            },
            Err(reason) => {
                let field = Self::field_for(reason);
                self.reveal_field(&field);
            }
        }
    }

    fn blur_focused(&mut self) {
        let Some(focused_id) = self.focus.current_id().map(ToOwned::to_owned) else {
            return;
        };
        let result = {
            let nodes = self.current_nodes_mut();
            let Some(node) = find_node_mut(nodes, &focused_id) else {
                return;
            };
            node.on_blur()
        };
        for action in result.actions {
            self.handle_widget_action(action);
        }
        self.touch_node(&focused_id);
    }

    fn reveal_field(&mut self, id: &str) {
        let Some(index) = self
            .flow
            .steps()
            .iter()
            .position(|step| step.nodes.iter().any(|node| node.id() == id))
        else {
            return;
        };
        if self.flow.go_to(index) {
            self.rebuild_focus();
        }
        self.focus.set_focus_by_id(id);
    }
}
