use crate::core::NodeId;
use crate::widgets::node::Node;

#[derive(Debug, Default, Clone)]
pub struct FocusState {
    targets: Vec<NodeId>,
    index: Option<usize>,
}

impl FocusState {
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut state = Self::default();
        state.rebuild(nodes);
        state
    }

    pub fn rebuild(&mut self, nodes: &[Node]) {
        self.targets = nodes
            .iter()
            .filter(|node| node.is_focusable())
            .map(|node| node.id().into())
            .collect();
        self.index = if self.targets.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    pub fn current_id(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.targets.get(i))
            .map(NodeId::as_str)
    }

    pub fn is_last(&self) -> bool {
        self.index
            .is_some_and(|index| index + 1 == self.targets.len())
    }

    pub fn set_focus_by_id(&mut self, id: &str) {
        if let Some(position) = self.targets.iter().position(|target| target.as_str() == id) {
            self.index = Some(position);
        }
    }

    pub fn focus_last(&mut self) {
        self.index = self.targets.len().checked_sub(1);
    }

    pub fn next(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        self.index = Some((current + 1) % self.targets.len());
    }

    pub fn prev(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        self.index = Some((current + self.targets.len() - 1) % self.targets.len());
    }
}

#[cfg(test)]
mod tests {
    use super::FocusState;
    use crate::widgets::inputs::text::TextInput;
    use crate::widgets::node::Node;
    use crate::widgets::outputs::text::Text;

    fn nodes() -> Vec<Node> {
        vec![
            Node::input(TextInput::new("title", "Ad title")),
            Node::output(Text::new("tip", "tip")),
            Node::input(TextInput::new("description", "Description")),
        ]
    }

    #[test]
    fn cycles_over_focusable_nodes_only() {
        let mut focus = FocusState::from_nodes(&nodes());
        assert_eq!(focus.current_id(), Some("title"));
        focus.next();
        assert_eq!(focus.current_id(), Some("description"));
        assert!(focus.is_last());
        focus.next();
        assert_eq!(focus.current_id(), Some("title"));
        focus.prev();
        assert_eq!(focus.current_id(), Some("description"));
    }

    #[test]
    fn unknown_id_keeps_focus() {
        let mut focus = FocusState::from_nodes(&nodes());
        focus.set_focus_by_id("tip");
        assert_eq!(focus.current_id(), Some("title"));
        focus.focus_last();
        assert_eq!(focus.current_id(), Some("description"));
    }

    #[test]
    fn empty_steps_have_no_focus() {
        let mut focus = FocusState::from_nodes(&[]);
        focus.next();
        assert_eq!(focus.current_id(), None);
        assert!(!focus.is_last());
    }
}
