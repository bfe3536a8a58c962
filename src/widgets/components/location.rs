use crate::core::value::Value;
use crate::form::location::{Location, LocationMode, LocationSelection};
use crate::form::payload::{Section, SectionChange};
use crate::form::validation::LOCATION_REQUIRED;
use crate::runtime::event::{SystemEvent, WidgetAction};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme;
use crate::widgets::base::{BODY_INDENT, WidgetBase};
use crate::widgets::inputs::select::{cycle_index, dropdown_line};
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Tabs,
    State,
    City,
    Neighborhood,
}

impl Row {
    const LIST: [Row; 4] = [Row::Tabs, Row::State, Row::City, Row::Neighborhood];

    fn label(self) -> &'static str {
        match self {
            Row::Tabs => "",
            Row::State => "State",
            Row::City => "City",
            Row::Neighborhood => "Neighbourhood",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Row::Tabs => "",
            Row::State => "Select State",
            Row::City => "Select City",
            Row::Neighborhood => "Select Neighbourhood",
        }
    }
}

/// Location section: a LIST / CURRENT LOCATION tab row over three cascading
/// dropdowns. Up and Down move between rows; Left and Right change the row.
pub struct LocationSection {
    base: WidgetBase,
    selection: LocationSelection,
    row: Row,
}

impl LocationSection {
    pub fn new(id: impl Into<String>, label: impl Into<String>, selection: LocationSelection) -> Self {
        let mut base = WidgetBase::new(id, label);
        base.set_required(true);
        Self {
            base,
            selection,
            row: Row::Tabs,
        }
    }

    pub fn selection(&self) -> &LocationSelection {
        &self.selection
    }

    fn rows(&self) -> &'static [Row] {
        match self.selection.mode() {
            LocationMode::List => &Row::LIST,
            LocationMode::CurrentLocation => &Row::LIST[..1],
        }
    }

    fn row_index(&self) -> usize {
        self.rows()
            .iter()
            .position(|row| *row == self.row)
            .unwrap_or(0)
    }

    fn report(location: Location) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::SectionChanged(SectionChange::whole(
            Section::Location,
            location,
        )))
    }

    fn options(&self, row: Row) -> Vec<String> {
        match row {
            Row::Tabs => Vec::new(),
            Row::State => self.selection.state_options(),
            Row::City => self.selection.city_options(),
            Row::Neighborhood => self.selection.neighborhood_options(),
        }
    }

    fn current(&self, row: Row) -> &str {
        let manual = self.selection.manual();
        match row {
            Row::Tabs => "",
            Row::State => &manual.state,
            Row::City => &manual.city,
            Row::Neighborhood => &manual.neighborhood,
        }
    }

    fn move_row(&mut self, forward: bool) -> InteractionResult {
        let rows = self.rows();
        let index = self.row_index();
        let next = if forward {
            index + 1
        } else {
            match index.checked_sub(1) {
                Some(prev) => prev,
                None => return InteractionResult::ignored(),
            }
        };
        match rows.get(next) {
            Some(row) => {
                self.row = *row;
                InteractionResult::handled()
            }
            None => InteractionResult::ignored(),
        }
    }

    fn toggle_mode(&mut self) -> InteractionResult {
        let mode = match self.selection.mode() {
            LocationMode::List => LocationMode::CurrentLocation,
            LocationMode::CurrentLocation => LocationMode::List,
        };
        self.row = Row::Tabs;
        Self::report(self.selection.set_mode(mode))
    }

    fn cycle_row(&mut self, forward: bool) -> InteractionResult {
        let options = self.options(self.row);
        let current = self.current(self.row);
        let position = options.iter().position(|option| option == current);
        if options.is_empty() {
            return InteractionResult::ignored();
        }
        let next = cycle_index(position, options.len(), forward)
            .and_then(|index| options.get(index).cloned())
            .unwrap_or_default();
        let reported = match self.row {
            Row::Tabs => return InteractionResult::ignored(),
            Row::State => self.selection.select_state(next),
            Row::City => self.selection.select_city(next),
            Row::Neighborhood => self.selection.select_neighborhood(next),
        };
        Self::report(reported)
    }

    fn tabs_line(&self, focused: bool) -> SpanLine {
        let mode = self.selection.mode();
        let tab = |text: &str, active: bool| {
            let mut style = if active {
                theme::selected()
            } else {
                theme::muted()
            };
            if active && focused && self.row == Row::Tabs {
                style = style.underline();
            }
            Span::styled(format!(" {text} "), style)
        };
        vec![
            Span::new(" ".repeat(BODY_INDENT)),
            tab("LIST", mode == LocationMode::List),
            Span::new("  "),
            tab("CURRENT LOCATION", mode == LocationMode::CurrentLocation),
        ]
    }

    fn select_lines(&self, row: Row, focused: bool) -> Vec<SpanLine> {
        let here = focused && self.row == row;
        let value = self.current(row);
        let label_style = if here { theme::focused() } else { theme::label() };
        let marker = if here { "›" } else { " " };
        vec![
            vec![
                Span::new(" ".repeat(BODY_INDENT)),
                Span::styled(format!("{marker} "), theme::focused()),
                Span::styled(row.label(), label_style),
                Span::styled(" *", theme::error()),
            ],
            dropdown_line(
                if value.is_empty() { row.placeholder() } else { value },
                value.is_empty(),
                here,
            ),
        ]
    }

    fn current_line(&self) -> SpanLine {
        let current = self.selection.current();
        let parts: Vec<&str> = [&current.neighborhood, &current.city, &current.state]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        vec![
            Span::new(" ".repeat(BODY_INDENT)),
            Span::styled(parts.join(", "), theme::label()),
        ]
    }
}

impl Drawable for LocationSection {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let filled = self.validate().is_ok();
        let mut lines = vec![
            self.base.label_line(ctx, filled),
            self.tabs_line(focused),
        ];
        match self.selection.mode() {
            LocationMode::List => {
                for row in &Row::LIST[1..] {
                    lines.extend(self.select_lines(*row, focused));
                }
            }
            LocationMode::CurrentLocation => lines.push(self.current_line()),
        }
        DrawOutput { lines }
    }
}

impl Interactive for LocationSection {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Group
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match (key.code, self.row) {
            (KeyCode::Up, _) => self.move_row(false),
            (KeyCode::Down, _) => self.move_row(true),
            (KeyCode::Left | KeyCode::Right, Row::Tabs) => self.toggle_mode(),
            (KeyCode::Left, _) => self.cycle_row(false),
            (KeyCode::Right, _) => self.cycle_row(true),
            (KeyCode::Enter, Row::Neighborhood) => InteractionResult::input_done(),
            (KeyCode::Enter, _) => {
                let moved = self.move_row(true);
                if moved.handled {
                    moved
                } else {
                    InteractionResult::input_done()
                }
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn on_system_event(&mut self, event: &SystemEvent) -> InteractionResult {
        match event {
            SystemEvent::LocationDetected(location) => {
                match self.selection.resolve_detected(location.clone()) {
                    Some(visible) => Self::report(visible),
                    None => InteractionResult::handled(),
                }
            }
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Location(self.selection.active()))
    }

    fn validate(&self) -> Result<(), String> {
        let active = self.selection.active();
        if active.state.is_empty() || active.city.is_empty() {
            return Err(LOCATION_REQUIRED.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LocationSection;
    use crate::form::location::{Location, LocationSelection};
    use crate::form::lookup::StaticLookup;
    use crate::form::payload::{Section, SectionChange};
    use crate::runtime::event::{SystemEvent, WidgetAction};
    use crate::terminal::{KeyCode, KeyEvent, TerminalSize};
    use crate::ui::span::line_text;
    use crate::widgets::traits::{Drawable, Interactive, RenderContext};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn section() -> LocationSection {
        LocationSection::new(
            "location",
            "Location",
            LocationSelection::new(
                Arc::new(StaticLookup::default()),
                Location::new("Delhi", "Delhi", "Meera Bagh"),
            ),
        )
    }

    fn press(section: &mut LocationSection, code: KeyCode) -> Vec<WidgetAction> {
        section.on_key(KeyEvent::plain(code)).actions
    }

    fn reported(location: Location) -> Vec<WidgetAction> {
        vec![WidgetAction::SectionChanged(SectionChange::whole(
            Section::Location,
            location,
        ))]
    }

    fn rendered(section: &LocationSection) -> Vec<String> {
        let ctx = RenderContext {
            focused_id: Some("location".into()),
            terminal_size: TerminalSize {
                width: 80,
                height: 24,
            },
            visible_errors: HashMap::new(),
        };
        section.draw(&ctx).lines.iter().map(line_text).collect()
    }

    #[test]
    fn cascading_selection_reports_each_step() {
        let mut section = section();
        press(&mut section, KeyCode::Down);
        assert_eq!(
            press(&mut section, KeyCode::Right),
            reported(Location::new("Delhi", "", ""))
        );
        press(&mut section, KeyCode::Down);
        assert_eq!(
            press(&mut section, KeyCode::Right),
            reported(Location::new("Delhi", "Delhi", ""))
        );
        assert_eq!(section.validate(), Ok(()));
        press(&mut section, KeyCode::Down);
        assert_eq!(
            press(&mut section, KeyCode::Left),
            reported(Location::new("Delhi", "Delhi", "Meera Bagh"))
        );
    }

    #[test]
    fn changing_state_clears_lower_levels() {
        let mut section = section();
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Right);
        press(&mut section, KeyCode::Up);

        let actions = press(&mut section, KeyCode::Right);

        assert_eq!(actions, reported(Location::new("Uttar Pradesh", "", "")));
        assert!(section.validate().is_err());
    }

    #[test]
    fn neighborhood_without_city_has_nothing_to_cycle() {
        let mut section = section();
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Down);
        press(&mut section, KeyCode::Down);
        assert!(press(&mut section, KeyCode::Right).is_empty());
    }

    #[test]
    fn current_location_tab_reports_the_stub_at_once() {
        let mut section = section();
        let stub = Location::new("Delhi", "Delhi", "Meera Bagh");
        assert_eq!(press(&mut section, KeyCode::Right), reported(stub.clone()));
        assert_eq!(section.validate(), Ok(()));
        assert!(rendered(&section).iter().any(|l| l.contains("Meera Bagh, Delhi, Delhi")));

        let result = section.on_system_event(&SystemEvent::LocationDetected(stub.clone()));

        assert_eq!(result.actions, reported(stub));
        assert!(!section.on_key(KeyEvent::plain(KeyCode::Down)).handled);
    }

    #[test]
    fn detection_while_on_list_is_kept_for_later() {
        let mut section = section();
        let detected = Location::new("Delhi", "Delhi", "");
        let result = section.on_system_event(&SystemEvent::LocationDetected(detected.clone()));
        assert!(result.actions.is_empty());

        assert_eq!(press(&mut section, KeyCode::Left), reported(detected));
    }
}
