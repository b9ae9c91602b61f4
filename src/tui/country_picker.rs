//! Country picker dialog for the phone field's dialing prefix.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{search, Country};

use super::component::Component;
use super::Theme;

/// Events emitted by the country picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryPickerEvent {
    /// User selected a country
    Selected(&'static Country),
    /// User dismissed the dialog without selecting
    Cancelled,
}

/// Country picker dialog state: search query plus the filtered table.
#[derive(Debug, Clone)]
pub struct CountryPicker {
    /// Current search query
    pub query: String,
    /// Cursor row into the filtered list
    pub cursor: usize,
    /// List widget state
    pub list_state: ListState,
}

impl CountryPicker {
    /// Creates a picker with an empty query (full table shown).
    #[must_use]
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            query: String::new(),
            cursor: 0,
            list_state,
        }
    }

    /// Countries matching the current query.
    #[must_use]
    pub fn filtered(&self) -> Vec<&'static Country> {
        search(&self.query)
    }

    fn clamp_cursor(&mut self) {
        let len = self.filtered().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
        self.list_state.select(Some(self.cursor));
    }
}

impl Default for CountryPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CountryPicker {
    type Event = CountryPickerEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc => {
                // Typing filter clears first, a second Esc dismisses
                if self.query.is_empty() {
                    return Some(CountryPickerEvent::Cancelled);
                }
                self.query.clear();
                self.cursor = 0;
                self.list_state.select(Some(0));
                None
            }
            KeyCode::Enter => {
                let filtered = self.filtered();
                filtered
                    .get(self.cursor)
                    .copied()
                    .map(CountryPickerEvent::Selected)
            }
            KeyCode::Up => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                self.list_state.select(Some(self.cursor));
                None
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.filtered().len() {
                    self.cursor += 1;
                }
                self.list_state.select(Some(self.cursor));
                None
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.cursor = 0;
                self.clamp_cursor();
                None
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.cursor = 0;
                self.clamp_cursor();
                None
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = centered_rect(50, 70, area);

        f.render_widget(Clear, dialog_area);
        let backdrop = Block::default().style(Style::default().bg(theme.background));
        f.render_widget(backdrop, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(dialog_area);

        // Search input
        let filter = Paragraph::new(format!("Search: {}_", self.query))
            .style(Style::default().fg(theme.accent))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Choose Country ")
                    .border_style(Style::default().fg(theme.primary)),
            );
        f.render_widget(filter, chunks[0]);

        let filtered = self.filtered();
        let items: Vec<ListItem> = filtered
            .iter()
            .map(|country| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", country.flag)),
                    Span::styled(country.name, Style::default().fg(theme.text)),
                    Span::styled(
                        format!("  +{}", country.calling_code),
                        Style::default().fg(theme.text_muted),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} matches ", filtered.len()))
                    .border_style(Style::default().fg(theme.primary)),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("► ");

        let mut list_state = self.list_state.clone();
        f.render_stateful_widget(list, chunks[1], &mut list_state);
    }
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_filter_and_select() {
        let mut picker = CountryPicker::new();
        for c in "nigeria".chars() {
            picker.handle_input(press(KeyCode::Char(c)));
        }
        let event = picker.handle_input(press(KeyCode::Enter));
        match event {
            Some(CountryPickerEvent::Selected(country)) => assert_eq!(country.iso, "NG"),
            other => panic!("Expected selection, got {other:?}"),
        }
    }

    #[test]
    fn test_esc_clears_filter_before_cancelling() {
        let mut picker = CountryPicker::new();
        picker.handle_input(press(KeyCode::Char('x')));
        assert_eq!(picker.handle_input(press(KeyCode::Esc)), None);
        assert!(picker.query.is_empty());
        assert_eq!(
            picker.handle_input(press(KeyCode::Esc)),
            Some(CountryPickerEvent::Cancelled)
        );
    }

    #[test]
    fn test_cursor_clamped_to_filtered_len() {
        let mut picker = CountryPicker::new();
        picker.cursor = 10;
        for c in "united k".chars() {
            picker.handle_input(press(KeyCode::Char(c)));
        }
        assert_eq!(picker.cursor, 0);
        let event = picker.handle_input(press(KeyCode::Enter));
        assert!(matches!(event, Some(CountryPickerEvent::Selected(_))));
    }
}
