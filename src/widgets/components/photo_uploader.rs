use crate::core::value::Value;
use crate::form::payload::{Section, SectionChange};
use crate::form::photo::{MAX_PHOTOS, PhotoList, resolve_files};
use crate::form::preview::PreviewRegistry;
use crate::form::validation::PHOTOS_REQUIRED;
use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme;
use crate::widgets::base::{BODY_INDENT, WidgetBase};
use crate::widgets::inputs::text::TextInput;
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext, TextEditState,
};
use tracing::debug;

const REORDER_HINT: &str = "Drag to reorder. First image will be the cover image.";
const PATH_PLACEHOLDER: &str = "photo.jpg, a folder or *.jpg";

/// Photo picker: a path field that accepts files, folders and globs, above
/// an ordered list whose first entry is the cover.
///
/// Keys: Enter adds the typed path, Up/Down pick a photo, Shift+Up/Down drag
/// it, Delete removes it while the path field is empty.
pub struct PhotoUploader {
    base: WidgetBase,
    list: PhotoList,
    path: TextInput,
    cursor: usize,
    notice: Option<String>,
}

impl PhotoUploader {
    pub fn new(id: impl Into<String>, label: impl Into<String>, registry: PreviewRegistry) -> Self {
        let id = id.into();
        let path = TextInput::new(format!("{id}__path"), "")
            .with_prefix("+ ")
            .with_placeholder(PATH_PLACEHOLDER);
        let mut base = WidgetBase::new(id, label);
        base.set_required(true);
        Self {
            base,
            list: PhotoList::new(registry),
            path,
            cursor: 0,
            notice: None,
        }
    }

    pub fn photos(&self) -> &PhotoList {
        &self.list
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn report(&self) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::SectionChanged(SectionChange::whole(
            Section::Photos,
            self.list.refs(),
        )))
    }

    fn add_from_path(&mut self) -> InteractionResult {
        let pattern = self.path.text().trim().to_string();
        if pattern.is_empty() {
            return InteractionResult::input_done();
        }
        if self.list.remaining() == 0 {
            self.notice = Some(format!("You can upload up to {MAX_PHOTOS} photos."));
            return InteractionResult::handled();
        }
        match resolve_files(&pattern) {
            Ok(files) => {
                let offered = files.len();
                let kept = self.list.add(files);
                self.notice = (kept < offered).then(|| {
                    format!(
                        "Only {MAX_PHOTOS} photos are allowed; {} skipped.",
                        offered - kept
                    )
                });
                self.path = TextInput::new(format!("{}__path", self.base.id()), "")
                    .with_prefix("+ ")
                    .with_placeholder(PATH_PLACEHOLDER);
                self.report()
            }
            Err(err) => {
                debug!(%pattern, error = %err, "photo path rejected");
                self.notice = Some(err.to_string());
                InteractionResult::handled()
            }
        }
    }

    fn move_cursor(&mut self, forward: bool) -> InteractionResult {
        if self.list.is_empty() {
            return InteractionResult::ignored();
        }
        let last = self.list.len() - 1;
        let next = if forward {
            (self.cursor + 1).min(last)
        } else {
            self.cursor.saturating_sub(1)
        };
        if next == self.cursor {
            return InteractionResult::consumed();
        }
        self.cursor = next;
        InteractionResult::handled()
    }

    fn drag(&mut self, forward: bool) -> InteractionResult {
        if self.list.is_empty() {
            return InteractionResult::ignored();
        }
        if self.list.dragged().is_none() && !self.list.begin_drag(self.cursor) {
            return InteractionResult::ignored();
        }
        let target = if forward {
            (self.cursor + 1).min(self.list.len() - 1)
        } else {
            self.cursor.saturating_sub(1)
        };
        if !self.list.drag_over(target) {
            return InteractionResult::handled();
        }
        self.cursor = target;
        self.report()
    }

    fn remove_at_cursor(&mut self) -> InteractionResult {
        if !self.list.remove(self.cursor) {
            return InteractionResult::ignored();
        }
        self.cursor = self.cursor.min(self.list.len().saturating_sub(1));
        let result = self.report();
        if self.list.is_empty() {
            return result.and_action(WidgetAction::Touched {
                id: self.base.id().into(),
            });
        }
        result
    }

    fn photo_lines(&self, focused: bool) -> Vec<SpanLine> {
        let indent = " ".repeat(BODY_INDENT);
        self.list
            .photos()
            .iter()
            .enumerate()
            .map(|(index, photo)| {
                let here = focused && index == self.cursor;
                let marker = if self.list.dragged() == Some(index) {
                    "≡ "
                } else if here {
                    "› "
                } else {
                    "  "
                };
                let style = if self.list.dragged() == Some(index) {
                    theme::selected()
                } else if here {
                    theme::focused()
                } else {
                    theme::label()
                };
                let mut line = vec![
                    Span::new(indent.clone()),
                    Span::styled(marker, theme::focused()),
                    Span::styled(
                        format!("{}. {}", index + 1, photo.source().file_name()),
                        style,
                    ),
                ];
                if PhotoList::is_cover(index) {
                    line.push(Span::styled("  Cover", theme::success()));
                }
                line
            })
            .collect()
    }

    fn status_line(&self) -> SpanLine {
        let indent = Span::new(" ".repeat(BODY_INDENT));
        match self.list.len() {
            0 => vec![
                indent,
                Span::styled(
                    format!("Type a path and press Enter. Up to {MAX_PHOTOS} photos."),
                    if self.list.has_error() {
                        theme::error()
                    } else {
                        theme::muted()
                    },
                ),
            ],
            1 => vec![indent, Span::styled("✓ 1 photo uploaded", theme::success())],
            n => vec![
                indent,
                Span::styled(format!("✓ {n} photos uploaded"), theme::success()),
            ],
        }
    }

    /// Row of the path field inside this node's output.
    fn path_row(&self) -> usize {
        let hint = usize::from(!self.list.is_empty());
        1 + hint + self.list.len() + 1
    }
}

impl Drawable for PhotoUploader {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let mut lines = vec![self.base.label_line(ctx, !self.list.is_empty())];
        if !self.list.is_empty() {
            lines.push(vec![
                Span::new(" ".repeat(BODY_INDENT)),
                Span::styled(REORDER_HINT, theme::muted()),
            ]);
        }
        lines.extend(self.photo_lines(focused));
        lines.push(self.status_line());
        lines.extend(self.path.draw(ctx).lines.into_iter().skip(1).take(1));
        if let Some(notice) = &self.notice {
            lines.push(vec![
                Span::new(" ".repeat(BODY_INDENT)),
                Span::styled(notice.clone(), theme::error()),
            ]);
        }
        DrawOutput { lines }
    }
}

impl Interactive for PhotoUploader {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
        let dragging_key = shifted && matches!(key.code, KeyCode::Up | KeyCode::Down);
        if !dragging_key && self.list.end_drag().is_some() {
            debug!("photo drag finished");
        }

        match key.code {
            KeyCode::Up if shifted => self.drag(false),
            KeyCode::Down if shifted => self.drag(true),
            KeyCode::Up => self.move_cursor(false),
            KeyCode::Down => self.move_cursor(true),
            KeyCode::Delete if self.path.text().is_empty() => self.remove_at_cursor(),
            KeyCode::Enter => self.add_from_path(),
            _ => {
                let result = self.path.on_key(key);
                if result.handled {
                    self.notice = None;
                }
                result
            }
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        self.path.text_editing()
    }

    fn on_blur(&mut self) -> InteractionResult {
        self.list.end_drag();
        self.list.validate();
        InteractionResult::handled()
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let inner = self.path.cursor_pos()?;
        Some(CursorPos {
            col: inner.col,
            row: self.path_row().min(u16::MAX as usize) as u16,
        })
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Photos(self.list.refs()))
    }

    fn validate(&self) -> Result<(), String> {
        if self.list.is_empty() {
            return Err(PHOTOS_REQUIRED.to_string());
        }
        Ok(())
    }
}
