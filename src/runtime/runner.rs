use crate::error::Result;
use crate::form::submit::Submission;
use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::runtime::event::{AppEvent, SystemEvent, WidgetAction};
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::{Reducer, collect_effects};
use crate::runtime::scheduler::Scheduler;
use crate::state::app_state::AppState;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

const IDLE_POLL: Duration = Duration::from_millis(120);

pub struct Runtime {
    state: AppState,
    terminal: Terminal,
    scheduler: Scheduler,
    key_bindings: KeyBindings,
}

impl Runtime {
    pub fn new(state: AppState, terminal: Terminal) -> Self {
        Self::with_key_bindings(state, terminal, KeyBindings::new())
    }

    pub fn with_key_bindings(
        state: AppState,
        terminal: Terminal,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            state,
            terminal,
            scheduler: Scheduler::new(),
            key_bindings,
        }
    }

    /// Drives the form until the user quits or the ad is posted. Returns the
    /// submission when there was one; the terminal is restored either way.
    pub fn run(&mut self) -> Result<Option<Submission>> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.schedule_pending();
            self.render()?;

            while !self.state.should_exit() {
                self.process_scheduled_events()?;
                if self.state.should_exit() {
                    break;
                }

                let now = Instant::now();
                let timeout = self.scheduler.poll_timeout(now, IDLE_POLL);
                let event = self.terminal.poll_event(timeout)?;

                self.dispatch_app_event(AppEvent::Terminal(event))?;
            }

            self.state.request_exit();
            self.schedule_pending();
            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)?;
        Ok(self.state.take_submission())
    }

    fn schedule_pending(&mut self) {
        let now = Instant::now();
        for command in self.state.take_pending_scheduler_commands() {
            debug!(?command, "scheduling");
            self.scheduler.schedule(command, now);
        }
    }

    fn process_scheduled_events(&mut self) -> io::Result<()> {
        for event in self.scheduler.drain_ready(Instant::now()) {
            self.dispatch_app_event(event)?;
        }
        Ok(())
    }

    fn dispatch_app_event(&mut self, event: AppEvent) -> io::Result<()> {
        match event {
            AppEvent::Terminal(TerminalEvent::Resize(size)) => {
                self.terminal.set_size(size);
                self.render()
            }
            AppEvent::Terminal(TerminalEvent::Key(key)) => {
                let command = self
                    .key_bindings
                    .resolve(key)
                    .unwrap_or(Command::InputKey(key));
                self.process_command(command)
            }
            AppEvent::Terminal(TerminalEvent::Tick) => self.process_command(Command::Tick),
            AppEvent::Command(command) => self.process_command(command),
            AppEvent::System(event) => self.process_system_event(event),
        }
    }

    fn process_command(&mut self, command: Command) -> io::Result<()> {
        let effects = Reducer::reduce(&mut self.state, command);
        self.apply_effects(effects)
    }

    fn process_system_event(&mut self, event: SystemEvent) -> io::Result<()> {
        debug!(?event, "system event");
        let mut effects = collect_effects(self.state.dispatch_system_event(event));
        effects.push(Effect::RequestRender);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let mut render_requested = false;

        for effect in effects {
            match effect {
                Effect::Action(action) => {
                    render_requested |= self.apply_widget_action(action);
                }
                Effect::Schedule(cmd) => {
                    self.scheduler.schedule(cmd, Instant::now());
                }
                Effect::RequestRender => {
                    render_requested = true;
                }
            }
        }

        if render_requested && !self.state.should_exit() {
            self.render()?;
        }

        Ok(())
    }

    fn apply_widget_action(&mut self, action: WidgetAction) -> bool {
        let changed = self.state.handle_widget_action(action);
        self.schedule_pending();
        changed
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = Renderer::render(&self.state, self.terminal.size());
        self.terminal.render_frame(&frame)
    }
}
