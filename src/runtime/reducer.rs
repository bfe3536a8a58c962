use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::state::app_state::AppState;
use crate::widgets::traits::InteractionResult;

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut AppState, command: Command) -> Vec<Effect> {
        let mut effects = match command {
            Command::Exit => {
                state.request_exit();
                vec![Effect::RequestRender]
            }
            Command::Submit => {
                state.submit();
                vec![Effect::RequestRender]
            }
            Command::NextFocus => {
                state.focus_next();
                vec![Effect::RequestRender]
            }
            Command::PrevFocus => {
                state.focus_prev();
                vec![Effect::RequestRender]
            }
            Command::NextStep => {
                state.next_step();
                vec![Effect::RequestRender]
            }
            Command::PrevStep => {
                state.prev_step();
                vec![Effect::RequestRender]
            }
            Command::InputKey(key) => collect_effects(state.dispatch_key_to_focused(key)),
            Command::TextAction(action) => {
                collect_effects(state.dispatch_text_action_to_focused(action))
            }
            Command::Tick | Command::Noop => vec![],
        };

        effects.extend(
            state
                .take_pending_scheduler_commands()
                .into_iter()
                .map(Effect::Schedule),
        );

        effects
    }
}

pub(crate) fn collect_effects(result: InteractionResult) -> Vec<Effect> {
    let mut effects: Vec<Effect> = result.actions.into_iter().map(Effect::Action).collect();
    if result.request_render {
        effects.push(Effect::RequestRender);
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::Reducer;
    use crate::config::AppConfig;
    use crate::form::submit::LogSubmitter;
    use crate::runtime::command::Command;
    use crate::runtime::effect::Effect;
    use crate::runtime::event::WidgetAction;
    use crate::runtime::scheduler::SchedulerCommand;
    use crate::state::app_state::AppState;
    use crate::terminal::{KeyCode, KeyEvent};

    fn state() -> AppState {
        let mut state = AppState::new(&AppConfig::default(), Box::new(LogSubmitter::new()));
        state.take_pending_scheduler_commands();
        state
    }

    #[test]
    fn widget_actions_surface_as_effects() {
        let mut state = state();
        let effects = Reducer::reduce(&mut state, Command::InputKey(KeyEvent::plain(KeyCode::Enter)));

        assert!(matches!(
            effects.as_slice(),
            [
                Effect::Action(WidgetAction::SectionChanged(_)),
                Effect::Action(WidgetAction::InputDone),
                Effect::RequestRender
            ]
        ));
    }

    #[test]
    fn exit_carries_the_cancel_to_the_scheduler() {
        let mut state = state();
        let effects = Reducer::reduce(&mut state, Command::Exit);

        assert!(state.should_exit());
        assert!(effects.iter().any(|effect| matches!(
            effect,
            Effect::Schedule(SchedulerCommand::Cancel { .. })
        )));
    }

    #[test]
    fn step_commands_move_the_flow() {
        let mut state = state();
        Reducer::reduce(&mut state, Command::NextStep);
        assert_eq!(state.current_step_id(), "details");
        Reducer::reduce(&mut state, Command::PrevStep);
        assert_eq!(state.current_step_id(), "category");
        assert!(Reducer::reduce(&mut state, Command::Tick).is_empty());
    }
}
