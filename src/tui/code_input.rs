//! Fixed-length verification code entry rendered as one box per digit.
//!
//! Keystrokes past the configured length are rejected at entry time, not
//! just flagged at validation; deletions are always accepted.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Theme;

/// Code entry state.
#[derive(Debug, Clone)]
pub struct CodeInput {
    /// Number of digits the code consists of
    pub length: usize,
    /// Digits entered so far (never longer than `length`)
    pub digits: String,
}

impl CodeInput {
    /// Creates an empty code input of the given length.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length,
            digits: String::new(),
        }
    }

    /// Whether every digit has been entered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.digits.chars().count() == self.length
    }

    /// Clears all entered digits.
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Replaces the contents, truncating to the configured length and
    /// dropping non-digits.
    pub fn set_digits(&mut self, digits: &str) {
        self.digits = digits
            .chars()
            .filter(char::is_ascii_digit)
            .take(self.length)
            .collect();
    }

    /// Handles one key event. Returns true if the digits changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                // Entry filter: reject keystrokes beyond the code length
                if self.digits.chars().count() >= self.length {
                    return false;
                }
                self.digits.push(c);
                true
            }
            KeyCode::Backspace => {
                if self.digits.pop().is_some() {
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Renders one box per digit position.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let mut spans = Vec::with_capacity(self.length * 2);
        let entered: Vec<char> = self.digits.chars().collect();

        for i in 0..self.length {
            let (glyph, style) = match entered.get(i) {
                Some(d) => (
                    format!(" {d} "),
                    Style::default()
                        .fg(theme.accent)
                        .bg(theme.surface)
                        .add_modifier(Modifier::BOLD),
                ),
                None if focused && i == entered.len() => (
                    " _ ".to_string(),
                    Style::default().fg(theme.accent).bg(theme.surface),
                ),
                None => (
                    "   ".to_string(),
                    Style::default().fg(theme.text_muted).bg(theme.surface),
                ),
            };
            spans.push(Span::styled(glyph, style));
            spans.push(Span::raw(" "));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
