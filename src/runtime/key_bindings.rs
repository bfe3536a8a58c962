use crate::runtime::command::Command;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::widgets::traits::TextAction;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Global shortcuts. Keys without a binding go to the focused node.
#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Command>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: Command) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<Command> {
        self.bindings.get(&KeyBinding::from_event(event)).cloned()
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Command::Exit);
        self.bind(KeyBinding::key(KeyCode::Esc), Command::Exit);
        self.bind(KeyBinding::ctrl(KeyCode::Char('s')), Command::Submit);

        self.bind(KeyBinding::key(KeyCode::Tab), Command::NextFocus);
        self.bind(KeyBinding::key(KeyCode::BackTab), Command::PrevFocus);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Command::PrevFocus,
        );

        self.bind(KeyBinding::key(KeyCode::PageDown), Command::NextStep);
        self.bind(KeyBinding::ctrl(KeyCode::Char('n')), Command::NextStep);
        self.bind(KeyBinding::key(KeyCode::PageUp), Command::PrevStep);
        self.bind(KeyBinding::ctrl(KeyCode::Char('p')), Command::PrevStep);

        self.bind(
            KeyBinding::ctrl(KeyCode::Backspace),
            Command::TextAction(TextAction::DeleteWordLeft),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Char('w')),
            Command::TextAction(TextAction::DeleteWordLeft),
        );
        self.bind(
            KeyBinding::ctrl(KeyCode::Delete),
            Command::TextAction(TextAction::DeleteWordRight),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBinding, KeyBindings};
    use crate::runtime::command::Command;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crate::widgets::traits::TextAction;

    #[test]
    fn defaults_cover_navigation_and_exit() {
        let bindings = KeyBindings::new();
        let ctrl = |c| KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        };

        assert_eq!(bindings.resolve(ctrl('c')), Some(Command::Exit));
        assert_eq!(bindings.resolve(ctrl('s')), Some(Command::Submit));
        assert_eq!(
            bindings.resolve(KeyEvent::plain(KeyCode::PageDown)),
            Some(Command::NextStep)
        );
        assert_eq!(
            bindings.resolve(KeyEvent {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::SHIFT,
            }),
            Some(Command::PrevFocus)
        );
        assert_eq!(
            bindings.resolve(ctrl('w')),
            Some(Command::TextAction(TextAction::DeleteWordLeft))
        );
    }

    #[test]
    fn plain_keys_fall_through_to_widgets() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Enter)), None);
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Char('s'))), None);
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Left)), None);
    }

    #[test]
    fn unbind_removes_a_shortcut() {
        let mut bindings = KeyBindings::new();
        bindings.unbind(&KeyBinding::key(KeyCode::Esc));
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Esc)), None);
    }
}
