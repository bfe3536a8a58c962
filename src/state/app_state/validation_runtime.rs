use super::{AppState, DETECT_LOCATION_KEY};
use crate::form::attributes::AttributeKey;
use crate::form::validation::FormError;
use crate::runtime::scheduler::SchedulerCommand;
use crate::state::ad_flow::attribute_node_id;
use crate::widgets::node::find_node;
use tracing::debug;

impl AppState {
    /// Re-runs a node's validators. The result is recorded either way; it
    /// only shows once the node has been touched.
    pub(super) fn validate_node(&mut self, id: &str) -> bool {
        let result = self
            .flow
            .steps()
            .iter()
            .find_map(|step| find_node(&step.nodes, id))
            .map(|node| node.validate());
        self.apply_validation_result(id, result)
    }

    pub(super) fn touch_node(&mut self, id: &str) {
        self.validation.touch(id);
        self.validate_node(id);
    }

    pub(super) fn touch_current_step(&mut self) {
        if self.flow.is_empty() {
            return;
        }
        for id in self.focusable_ids(self.current_step_index()) {
            self.touch_node(&id);
        }
    }

    pub(super) fn touch_all_steps(&mut self) {
        for index in 0..self.flow.len() {
            for id in self.focusable_ids(index) {
                self.touch_node(&id);
            }
        }
    }

    pub(super) fn revalidate_all(&mut self) {
        for index in 0..self.flow.len() {
            for id in self.focusable_ids(index) {
                self.validate_node(&id);
            }
        }
    }

    pub fn take_pending_scheduler_commands(&mut self) -> Vec<SchedulerCommand> {
        std::mem::take(&mut self.pending_scheduler)
    }

    /// Drops work still owed to the form, so nothing arrives after exit.
    pub(super) fn teardown(&mut self) {
        debug!("tearing down ad form");
        self.pending_scheduler.push(SchedulerCommand::Cancel {
            key: DETECT_LOCATION_KEY.to_string(),
        });
    }

    /// Node that owns the field a banner complains about.
    pub(super) fn field_for(reason: FormError) -> String {
        match reason {
            FormError::MissingTitle => "title".to_string(),
            FormError::MissingDescription => "description".to_string(),
            FormError::MissingPrice => "price".to_string(),
            FormError::MissingPhotos => "photos".to_string(),
            FormError::MissingPropertyType => attribute_node_id(AttributeKey::PropertyType),
            FormError::MissingSuperBuiltupArea => {
                attribute_node_id(AttributeKey::SuperBuiltupArea)
            }
            FormError::MissingCarpetArea => attribute_node_id(AttributeKey::CarpetArea),
            FormError::MissingLocation => "location".to_string(),
        }
    }

    fn focusable_ids(&self, index: usize) -> Vec<String> {
        self.flow
            .steps()
            .get(index)
            .map(|step| {
                step.nodes
                    .iter()
                    .filter(|node| node.is_focusable())
                    .map(|node| node.id().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn apply_validation_result(&mut self, id: &str, result: Option<Result<(), String>>) -> bool {
        match result {
            Some(Ok(())) | None => {
                self.validation.clear_error(id);
                true
            }
            Some(Err(error)) => {
                self.validation.set_error(id, error);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::form::submit::LogSubmitter;
    use crate::form::validation::{FormError, LOCATION_REQUIRED, PHOTOS_REQUIRED};
    use crate::state::app_state::AppState;

    #[test]
    fn leaving_a_step_reveals_its_errors_only() {
        let mut state = AppState::new(&AppConfig::default(), Box::new(LogSubmitter::new()));
        while state.current_step_id() != "photos" {
            state.next_step();
        }
        state.next_step();

        assert_eq!(state.current_step_id(), "location");
        assert_eq!(state.visible_error("photos"), Some(PHOTOS_REQUIRED));
        assert_eq!(state.visible_error("location"), None);

        state.next_step();
        assert_eq!(state.visible_error("location"), Some(LOCATION_REQUIRED));
    }

    #[test]
    fn attribute_banners_point_at_attribute_nodes() {
        assert_eq!(
            AppState::field_for(FormError::MissingSuperBuiltupArea),
            "attr.superBuiltupArea"
        );
        assert_eq!(AppState::field_for(FormError::MissingLocation), "location");
    }
}
