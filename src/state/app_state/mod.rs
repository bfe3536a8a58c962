use crate::config::AppConfig;
use crate::core::value::Value;
use crate::form::aggregator::PostForm;
use crate::form::payload::{Section, SectionChange};
use crate::form::preview::PreviewRegistry;
use crate::form::submit::{Submission, Submitter};
use crate::runtime::event::{AppEvent, SystemEvent};
use crate::runtime::scheduler::SchedulerCommand;
use crate::state::ad_flow::{USER_NAME_ID, build_steps};
use crate::state::flow::Flow;
use crate::state::focus::FocusState;
use crate::state::step::{Step, StepStatus};
use crate::state::validation::ValidationState;
use crate::widgets::node::{Node, find_node};
use std::collections::HashMap;
use tracing::info;

mod navigation;
mod validation_runtime;

/// Scheduler key of the one-shot current-location lookup.
pub const DETECT_LOCATION_KEY: &str = "location.detect";

pub struct AppState {
    flow: Flow,
    focus: FocusState,
    validation: ValidationState,
    form: PostForm,
    submitter: Box<dyn Submitter>,
    submission: Option<Submission>,
    submit_error: Option<String>,
    pending_scheduler: Vec<SchedulerCommand>,
    should_exit: bool,
}

impl AppState {
    pub fn new(config: &AppConfig, submitter: Box<dyn Submitter>) -> Self {
        let steps = build_steps(config, PreviewRegistry::new());
        let mut state = Self::with_steps(steps, submitter);
        // The name widget may clip the configured default; seed what it shows.
        let shown_name = state
            .flow
            .steps()
            .iter()
            .find_map(|step| find_node(&step.nodes, USER_NAME_ID))
            .and_then(Node::value);
        if let Some(Value::Text(name)) = shown_name {
            state
                .form
                .apply(SectionChange::field(Section::User, "name", name));
        }
        state.pending_scheduler.push(SchedulerCommand::EmitAfter {
            key: DETECT_LOCATION_KEY.to_string(),
            delay: config.detect_delay(),
            event: AppEvent::System(SystemEvent::LocationDetected(
                config.current_location.clone(),
            )),
        });
        info!(steps = state.flow.len(), "ad form started");
        state
    }

    pub fn with_steps(steps: Vec<Step>, submitter: Box<dyn Submitter>) -> Self {
        let flow = Flow::new(steps);
        let should_exit = flow.is_empty();
        let mut state = Self {
            flow,
            focus: FocusState::default(),
            validation: ValidationState::default(),
            form: PostForm::new(),
            submitter,
            submission: None,
            submit_error: None,
            pending_scheduler: Vec::new(),
            should_exit,
        };
        state.rebuild_focus();
        state
    }

    pub fn current_step_id(&self) -> &str {
        if self.flow.is_empty() {
            return "";
        }
        &self.flow.current_step().id
    }

    pub fn current_step_index(&self) -> usize {
        self.flow.current_index()
    }

    pub fn steps(&self) -> &[Step] {
        self.flow.steps()
    }

    pub fn step_status_at(&self, index: usize) -> StepStatus {
        self.flow.status_at(index)
    }

    pub fn current_prompt(&self) -> &str {
        if self.flow.is_empty() {
            return "";
        }
        &self.flow.current_step().prompt
    }

    pub fn current_hint(&self) -> Option<&str> {
        if self.flow.is_empty() {
            return None;
        }
        self.flow.current_step().hint.as_deref()
    }

    pub fn current_nodes(&self) -> &[Node] {
        if self.flow.is_empty() {
            return &[];
        }
        self.flow.current_step().nodes.as_slice()
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.current_id()
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn visible_error(&self, id: &str) -> Option<&str> {
        self.validation.visible_error(id)
    }

    pub fn visible_errors(&self) -> HashMap<String, String> {
        self.validation.visible_errors()
    }

    /// Set when the gate passed but the submitter itself failed.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn take_submission(&mut self) -> Option<Submission> {
        self.submission.take()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        if self.should_exit {
            return;
        }
        self.should_exit = true;
        self.teardown();
    }

    fn rebuild_focus(&mut self) {
        if self.flow.is_empty() {
            self.focus = FocusState::default();
            return;
        }
        self.focus.rebuild(&self.flow.current_step().nodes);
    }

    fn current_nodes_mut(&mut self) -> &mut [Node] {
        if self.flow.is_empty() {
            return &mut [];
        }
        self.flow.current_step_mut().nodes.as_mut_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, DETECT_LOCATION_KEY};
    use crate::config::AppConfig;
    use crate::core::value::Value;
    use crate::state::ad_flow::{NAME_MAX_LEN, USER_NAME_ID};
    use crate::widgets::node::{Node, find_node};
    use crate::form::submit::LogSubmitter;
    use crate::runtime::scheduler::SchedulerCommand;

    #[test]
    fn starts_on_the_category_step_with_seller_name_seeded() {
        let config = AppConfig::default();
        let state = AppState::new(&config, Box::new(LogSubmitter::new()));

        assert_eq!(state.current_step_id(), "category");
        assert_eq!(state.focused_id(), Some("category"));
        assert_eq!(state.form().user().name, config.seller_name);
        assert!(!state.should_exit());
    }

    #[test]
    fn seeded_seller_name_matches_the_clipped_widget() {
        let config = AppConfig {
            seller_name: "A".repeat(40),
            ..AppConfig::default()
        };
        let state = AppState::new(&config, Box::new(LogSubmitter::new()));

        let widget = state
            .steps()
            .iter()
            .find_map(|step| find_node(&step.nodes, USER_NAME_ID))
            .and_then(Node::value);
        assert_eq!(state.form().user().name, "A".repeat(NAME_MAX_LEN));
        assert_eq!(widget, Some(Value::Text("A".repeat(NAME_MAX_LEN))));
    }

    #[test]
    fn schedules_location_detection_once() {
        let mut state = AppState::new(&AppConfig::default(), Box::new(LogSubmitter::new()));
        let pending = state.take_pending_scheduler_commands();
        assert_eq!(pending.len(), 1);
        assert!(matches!(
            &pending[0],
            SchedulerCommand::EmitAfter { key, .. } if key == DETECT_LOCATION_KEY
        ));
        assert!(state.take_pending_scheduler_commands().is_empty());
    }

    #[test]
    fn exit_cancels_detection() {
        let mut state = AppState::new(&AppConfig::default(), Box::new(LogSubmitter::new()));
        state.take_pending_scheduler_commands();
        state.request_exit();
        state.request_exit();

        let pending = state.take_pending_scheduler_commands();
        assert_eq!(pending.len(), 1);
        assert!(matches!(
            &pending[0],
            SchedulerCommand::Cancel { key } if key == DETECT_LOCATION_KEY
        ));
    }

    #[test]
    fn empty_flow_exits_immediately() {
        let state = AppState::with_steps(Vec::new(), Box::new(LogSubmitter::new()));
        assert!(state.should_exit());
        assert_eq!(state.current_prompt(), "");
        assert!(state.current_nodes().is_empty());
    }
}
