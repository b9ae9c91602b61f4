//! Wheel picker over a fixed, ordered list of values.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::RangeFieldConfig;

use super::Theme;

/// Range picker state: the value list and the selected index.
///
/// The middle element starts selected, so the field is ready from first
/// render.
#[derive(Debug, Clone)]
pub struct RangePicker {
    /// Ordered values the wheel spins over
    pub values: Vec<String>,
    /// Index of the selected value
    pub selected: usize,
}

impl RangePicker {
    /// Creates a picker from the field's range parameters.
    #[must_use]
    pub fn new(config: &RangeFieldConfig) -> Self {
        Self {
            values: config.values.clone(),
            selected: config.default_index(),
        }
    }

    /// Currently selected value.
    #[must_use]
    pub fn selected_value(&self) -> Option<&str> {
        self.values.get(self.selected).map(String::as_str)
    }

    /// Restores a selection by value, falling back to the current index
    /// when the value is not in the list.
    pub fn restore(&mut self, value: &str) {
        if let Some(index) = self.values.iter().position(|v| v == value) {
            self.selected = index;
        }
    }

    /// Handles one key event. Returns true if the selection changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                    return true;
                }
                false
            }
            KeyCode::Down => {
                if self.selected + 1 < self.values.len() {
                    self.selected += 1;
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Renders the selected value headline over the wheel.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let headline = self.selected_value().unwrap_or_default().to_string();
        f.render_widget(
            Paragraph::new(Span::styled(
                headline,
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );

        // One neighbor either side, dimmed
        let mut lines = Vec::with_capacity(3);
        let above = self.selected.checked_sub(1).and_then(|i| self.values.get(i));
        lines.push(Line::from(Span::styled(
            above.cloned().unwrap_or_default(),
            Style::default().fg(theme.text_muted),
        )));
        let selected_style = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(
            self.selected_value().unwrap_or_default().to_string(),
            selected_style,
        )));
        lines.push(Line::from(Span::styled(
            self.values.get(self.selected + 1).cloned().unwrap_or_default(),
            Style::default().fg(theme.text_muted),
        )));

        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            chunks[1],
        );
    }
}
