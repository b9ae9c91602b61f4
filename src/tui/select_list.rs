//! Option list for single- and multiple-choice select fields.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use crate::models::{SelectFieldConfig, SelectOption};

use super::Theme;

/// Select list state.
///
/// Single-choice keeps at most one selected index; multiple-choice
/// accumulates an identifier → label map updated on each check/uncheck.
#[derive(Debug, Clone)]
pub struct SelectList {
    /// The options on display
    pub options: Vec<SelectOption>,
    /// Whether more than one option may be checked
    pub multiple: bool,
    /// Cursor row
    pub cursor: usize,
    /// Selected index (single-choice only)
    pub selected: Option<usize>,
    /// Checked options (multiple-choice only)
    pub checked: BTreeMap<String, String>,
    /// List widget state
    pub list_state: ListState,
}

impl SelectList {
    /// Creates a list from the field's select parameters.
    #[must_use]
    pub fn new(config: &SelectFieldConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            options: config.options.clone(),
            multiple: config.multiple,
            cursor: 0,
            selected: None,
            checked: BTreeMap::new(),
            list_state,
        }
    }

    /// Currently selected option (single-choice).
    #[must_use]
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Restores a single-choice selection by option identifier.
    pub fn restore_single(&mut self, id: &str) {
        self.selected = self.options.iter().position(|o| o.id == id);
        if let Some(index) = self.selected {
            self.cursor = index;
            self.list_state.select(Some(index));
        }
    }

    /// Restores a multiple-choice selection map.
    pub fn restore_multi(&mut self, map: &BTreeMap<String, String>) {
        self.checked = map
            .iter()
            .filter(|(id, _)| self.options.iter().any(|o| &o.id == *id))
            .map(|(id, label)| (id.clone(), label.clone()))
            .collect();
    }

    /// Moves the cursor up.
    pub fn previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else {
            self.cursor = self.options.len().saturating_sub(1);
        }
        self.list_state.select(Some(self.cursor));
    }

    /// Moves the cursor down.
    pub fn next(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        } else {
            self.cursor = 0;
        }
        self.list_state.select(Some(self.cursor));
    }

    /// Toggles the option under the cursor.
    ///
    /// Single-choice: the new option replaces any prior selection.
    /// Multiple-choice: checks or unchecks the option in the map.
    pub fn toggle(&mut self) {
        let Some(option) = self.options.get(self.cursor) else {
            return;
        };
        if self.multiple {
            if self.checked.remove(&option.id).is_none() {
                self.checked
                    .insert(option.id.clone(), option.label.clone());
            }
        } else if self.selected == Some(self.cursor) {
            self.selected = None;
        } else {
            self.selected = Some(self.cursor);
        }
    }

    /// Handles one key event. Returns true if the selection changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                self.previous();
                false
            }
            KeyCode::Down => {
                self.next();
                false
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                true
            }
            _ => false,
        }
    }

    /// Renders the option list with check indicators.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let is_on = if self.multiple {
                    self.checked.contains_key(&option.id)
                } else {
                    self.selected == Some(i)
                };
                let indicator = match (self.multiple, is_on) {
                    (true, true) => "☑",
                    (true, false) => "☐",
                    (false, true) => "◉",
                    (false, false) => "○",
                };
                let style = if is_on {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{indicator} "), style),
                    Span::styled(option.label.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("► ");

        let mut list_state = self.list_state.clone();
        f.render_stateful_widget(list, area, &mut list_state);
    }
}
