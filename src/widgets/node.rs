use crate::core::value::Value;
use crate::runtime::event::SystemEvent;
use crate::terminal::{CursorPos, KeyEvent};
use crate::widgets::traits::{
    DrawOutput, FocusMode, InteractionResult, InteractiveNode, OutputNode, RenderContext,
    TextAction,
};

pub enum Node {
    Input(Box<dyn InteractiveNode>),
    Component(Box<dyn InteractiveNode>),
    Output(Box<dyn OutputNode>),
}

impl Node {
    pub fn input(widget: impl InteractiveNode + 'static) -> Self {
        Self::Input(Box::new(widget))
    }

    pub fn component(widget: impl InteractiveNode + 'static) -> Self {
        Self::Component(Box::new(widget))
    }

    pub fn output(widget: impl OutputNode + 'static) -> Self {
        Self::Output(Box::new(widget))
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Input(w) | Self::Component(w) => w.id(),
            Self::Output(w) => w.id(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Input(w) | Self::Component(w) => w.label(),
            Self::Output(w) => w.label(),
        }
    }

    pub fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        match self {
            Self::Input(w) | Self::Component(w) => w.draw(ctx),
            Self::Output(w) => w.draw(ctx),
        }
    }

    pub fn focus_mode(&self) -> FocusMode {
        match self {
            Self::Input(w) | Self::Component(w) => w.focus_mode(),
            Self::Output(_) => FocusMode::None,
        }
    }

    pub fn is_focusable(&self) -> bool {
        matches!(self.focus_mode(), FocusMode::Leaf | FocusMode::Group)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match self {
            Self::Input(w) | Self::Component(w) => w.on_key(key),
            Self::Output(_) => InteractionResult::ignored(),
        }
    }

    pub fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        match self {
            Self::Input(w) | Self::Component(w) => w.on_text_action(action),
            Self::Output(_) => InteractionResult::ignored(),
        }
    }

    pub fn on_system_event(&mut self, event: &SystemEvent) -> InteractionResult {
        match self {
            Self::Input(w) | Self::Component(w) => w.on_system_event(event),
            Self::Output(_) => InteractionResult::ignored(),
        }
    }

    pub fn on_blur(&mut self) -> InteractionResult {
        match self {
            Self::Input(w) | Self::Component(w) => w.on_blur(),
            Self::Output(_) => InteractionResult::ignored(),
        }
    }

    pub fn cursor_pos(&self) -> Option<CursorPos> {
        match self {
            Self::Input(w) | Self::Component(w) => w.cursor_pos(),
            Self::Output(_) => None,
        }
    }

    pub fn value(&self) -> Option<Value> {
        match self {
            Self::Input(w) | Self::Component(w) => w.value(),
            Self::Output(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Input(w) | Self::Component(w) => w.validate(),
            Self::Output(_) => Ok(()),
        }
    }
}

pub fn find_node<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find(|node| node.id() == id)
}

pub fn find_node_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    nodes.iter_mut().find(|node| node.id() == id)
}
