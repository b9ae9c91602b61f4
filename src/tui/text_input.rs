//! Single-line text input with an underline, used by the name, username,
//! email, and phone fields.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Theme;

/// Single-line input state: buffer, cursor, and an optional entry filter.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current buffer contents
    pub buffer: String,
    /// Cursor position as a char offset into the buffer
    pub cursor: usize,
    /// Accept only ASCII digits (phone local number entry)
    pub digits_only: bool,
}

impl TextInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty input that accepts only ASCII digits.
    #[must_use]
    pub fn digits() -> Self {
        Self {
            digits_only: true,
            ..Self::default()
        }
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replaces the contents and moves the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.chars().count();
    }

    /// Clears the buffer and cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Byte offset of the cursor's char position.
    fn cursor_byte(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Handles one key event. Returns true if the buffer changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == crossterm::event::KeyModifiers::SHIFT => {
                if self.digits_only && !c.is_ascii_digit() {
                    return false;
                }
                let at = self.cursor_byte();
                self.buffer.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.cursor_byte();
                self.buffer.remove(at);
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.buffer.chars().count() {
                    return false;
                }
                let at = self.cursor_byte();
                self.buffer.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor < self.buffer.chars().count() {
                    self.cursor += 1;
                }
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.buffer.chars().count();
                false
            }
            _ => false,
        }
    }

    /// Renders the input as a value line over an underline rule.
    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        placeholder: Option<&str>,
        focused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let line = if self.buffer.is_empty() {
            let hint = placeholder.unwrap_or_default();
            Line::from(Span::styled(
                hint.to_string(),
                Style::default().fg(theme.text_muted),
            ))
        } else {
            let (before, after) = self.buffer.split_at(self.cursor_byte());
            let mut spans = vec![Span::styled(
                before.to_string(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )];
            if focused {
                spans.push(Span::styled(
                    "█",
                    Style::default().fg(theme.accent),
                ));
            }
            spans.push(Span::styled(
                after.to_string(),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
            Line::from(spans)
        };
        f.render_widget(Paragraph::new(line), chunks[0]);

        let rule_color = if focused { theme.accent } else { theme.text_muted };
        let rule = "─".repeat(area.width as usize);
        f.render_widget(
            Paragraph::new(Span::styled(rule, Style::default().fg(rule_color))),
            chunks[1],
        );
    }
}
