use crate::terminal::KeyEvent;
use crate::widgets::traits::TextAction;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    Submit,
    NextFocus,
    PrevFocus,
    NextStep,
    PrevStep,
    InputKey(KeyEvent),
    TextAction(TextAction),
    Tick,
    Noop,
}
