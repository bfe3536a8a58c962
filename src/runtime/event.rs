use crate::core::NodeId;
use crate::form::location::Location;
use crate::form::payload::SectionChange;
use crate::runtime::command::Command;
use crate::terminal::TerminalEvent;

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the app state.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    SectionChanged(SectionChange),
    /// Widget signals it is done with its value.
    /// Navigation decides: focus next input if one exists, else advance the step.
    InputDone,
    /// Reveal the node's inline error even though focus has not left it.
    Touched { id: NodeId },
    SubmitRequested,
}

/// Events delivered to every widget, typically from the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemEvent {
    LocationDetected(Location),
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Terminal(TerminalEvent),
    Command(Command),
    System(SystemEvent),
}
