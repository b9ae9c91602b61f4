//! Multi-line text entry for the large-text field.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Theme;

/// Multi-line editor state: a list of lines plus a row/column cursor.
#[derive(Debug, Clone)]
pub struct TextArea {
    /// Buffer as lines, always at least one (possibly empty) line
    pub lines: Vec<String>,
    /// Cursor row index into `lines`
    pub row: usize,
    /// Cursor column as a char offset into the current line
    pub col: usize,
}

impl TextArea {
    /// Creates an empty editor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }

    /// Full contents joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replaces the contents and moves the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = self.lines.len() - 1;
        self.col = self.lines[self.row].chars().count();
    }

    /// Clears the contents.
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.row = 0;
        self.col = 0;
    }

    fn col_byte(&self) -> usize {
        self.lines[self.row]
            .char_indices()
            .nth(self.col)
            .map_or(self.lines[self.row].len(), |(i, _)| i)
    }

    /// Handles one key event. Returns true if the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                let at = self.col_byte();
                self.lines[self.row].insert(at, c);
                self.col += 1;
                true
            }
            KeyCode::Enter => {
                let at = self.col_byte();
                let rest = self.lines[self.row].split_off(at);
                self.lines.insert(self.row + 1, rest);
                self.row += 1;
                self.col = 0;
                true
            }
            KeyCode::Backspace => {
                if self.col > 0 {
                    self.col -= 1;
                    let at = self.col_byte();
                    self.lines[self.row].remove(at);
                    true
                } else if self.row > 0 {
                    // Join with the previous line
                    let current = self.lines.remove(self.row);
                    self.row -= 1;
                    self.col = self.lines[self.row].chars().count();
                    self.lines[self.row].push_str(&current);
                    true
                } else {
                    false
                }
            }
            KeyCode::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.col.min(self.lines[self.row].chars().count());
                }
                false
            }
            KeyCode::Down => {
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = self.col.min(self.lines[self.row].chars().count());
                }
                false
            }
            KeyCode::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.lines[self.row].chars().count();
                }
                false
            }
            KeyCode::Right => {
                if self.col < self.lines[self.row].chars().count() {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                false
            }
            _ => false,
        }
    }

    /// Renders the editor inside a rounded panel.
    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        placeholder: Option<&str>,
        focused: bool,
    ) {
        let border_color = if focused { theme.accent } else { theme.text_muted };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let content = self.text();
        let paragraph = if content.is_empty() {
            Paragraph::new(placeholder.unwrap_or_default().to_string())
                .style(Style::default().fg(theme.text_muted))
        } else {
            Paragraph::new(content).style(Style::default().fg(theme.text))
        };

        f.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_multi_line_entry() {
        let mut area = TextArea::new();
        area.handle_key(press(KeyCode::Char('a')));
        area.handle_key(press(KeyCode::Enter));
        area.handle_key(press(KeyCode::Char('b')));
        assert_eq!(area.text(), "a\nb");
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut area = TextArea::new();
        area.set_text("a\nb");
        area.row = 1;
        area.col = 0;
        area.handle_key(press(KeyCode::Backspace));
        assert_eq!(area.text(), "ab");
    }

    #[test]
    fn test_set_text_and_clear() {
        let mut area = TextArea::new();
        area.set_text("hello\nworld");
        assert_eq!(area.lines.len(), 2);
        area.clear();
        assert_eq!(area.text(), "");
        assert_eq!(area.row, 0);
    }
}
