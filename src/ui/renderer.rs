use crate::state::ad_flow::REVIEW_STEP_ID;
use crate::state::app_state::AppState;
use crate::state::step::StepStatus;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::review::summary_lines;
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme;
use crate::widgets::traits::RenderContext;

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
    /// First row of the focused node, used for scrolling when no cursor shows.
    pub focus_row: Option<u16>,
}

impl RenderFrame {
    fn row(&self) -> u16 {
        self.lines.len().min(u16::MAX as usize) as u16
    }

    fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }
}

pub struct Renderer;

impl Renderer {
    pub fn render(state: &AppState, terminal_size: TerminalSize) -> RenderFrame {
        let mut frame = RenderFrame::default();
        let ctx = RenderContext {
            focused_id: state.focused_id().map(ToOwned::to_owned),
            terminal_size,
            visible_errors: state.visible_errors(),
        };

        Self::header(state, &mut frame);
        Self::banner(state, &mut frame);

        if state.current_step_id() == REVIEW_STEP_ID {
            frame.lines.extend(summary_lines(state.form()));
        }

        for node in state.current_nodes() {
            let start = frame.row();
            let out = node.draw(&ctx);
            if ctx.is_focused(node.id()) {
                frame.focus_row = Some(start);
                if let Some(local) = node.cursor_pos() {
                    frame.cursor = Some(CursorPos {
                        col: local.col,
                        row: start.saturating_add(local.row),
                    });
                }
            }
            frame.lines.extend(out.lines);

            if let Some(error) = ctx.error(node.id()) {
                frame.push(vec![Span::styled(format!("  ! {error}"), theme::error())]);
            }
            frame.push(Vec::new());
        }

        if let Some(hint) = state.current_hint() {
            frame.push(vec![Span::styled(hint.to_string(), theme::muted())]);
        }
        frame
    }

    fn header(state: &AppState, frame: &mut RenderFrame) {
        frame.push(vec![Span::styled(" POST YOUR AD ", theme::title())]);

        let total = state.steps().len();
        let mut progress = vec![Span::styled(
            format!("Step {} of {total}  ", state.current_step_index() + 1),
            theme::muted(),
        )];
        for index in 0..total {
            let (dot, style) = match state.step_status_at(index) {
                StepStatus::Active => ("●", theme::focused()),
                StepStatus::Done => ("●", theme::success()),
                StepStatus::Pending => ("○", theme::muted()),
            };
            progress.push(Span::styled(format!("{dot} "), style));
        }
        frame.push(progress);
        frame.push(Vec::new());
        frame.push(vec![Span::styled(
            state.current_prompt().to_string(),
            theme::heading(),
        )]);
        frame.push(Vec::new());
    }

    fn banner(state: &AppState, frame: &mut RenderFrame) {
        let message = state
            .form()
            .banner()
            .map(|reason| reason.to_string())
            .or_else(|| state.submit_error().map(ToOwned::to_owned));
        if let Some(message) = message {
            frame.push(vec![Span::styled(format!(" ! {message} "), theme::banner())]);
            frame.push(Vec::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Renderer;
    use crate::config::AppConfig;
    use crate::form::submit::LogSubmitter;
    use crate::state::app_state::AppState;
    use crate::terminal::TerminalSize;
    use crate::ui::span::line_text;

    const SIZE: TerminalSize = TerminalSize {
        width: 80,
        height: 24,
    };

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), Box::new(LogSubmitter::new()))
    }

    fn texts(state: &AppState) -> Vec<String> {
        Renderer::render(state, SIZE)
            .lines
            .iter()
            .map(line_text)
            .collect()
    }

    #[test]
    fn header_shows_progress_and_prompt() {
        let lines = texts(&state());
        assert_eq!(lines[0], " POST YOUR AD ");
        assert!(lines[1].starts_with("Step 1 of 8"));
        assert_eq!(lines[3], "CHOOSE A CATEGORY");
    }

    #[test]
    fn cursor_tracks_the_focused_text_field() {
        let mut state = state();
        while state.current_step_id() != "price" {
            state.next_step();
        }
        let frame = Renderer::render(&state, SIZE);
        let cursor = frame.cursor.expect("cursor on price");
        assert_eq!(frame.focus_row, Some(5));
        assert_eq!(cursor.row, 6);
    }

    #[test]
    fn refused_submit_shows_banner_and_inline_errors() {
        let mut state = state();
        state.submit();
        let lines = texts(&state);

        assert!(lines.iter().any(|line| line.contains("! Please add a title for your ad.")));
        assert!(lines
            .iter()
            .any(|line| line.trim_start().starts_with("! Title is mandatory")));
    }

    #[test]
    fn review_step_lists_the_summary() {
        let mut state = state();
        while state.current_step_id() != "review" {
            state.next_step();
        }
        let lines = texts(&state);
        assert!(lines.iter().any(|line| line.trim() == "Summary"));
        assert!(lines.iter().any(|line| line.contains("POST NOW")));
    }
}
