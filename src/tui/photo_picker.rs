//! File-browser dialog for picking pictures off disk.
//!
//! Lists image files in one directory with multi-select; the committed
//! set is handed back to the presenter, which queues the decodes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::component::Component;
use super::Theme;

/// File extensions the picker offers.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Events emitted by the photo picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoPickerEvent {
    /// User committed the checked files
    Picked(Vec<PathBuf>),
    /// User dismissed the dialog without committing
    Cancelled,
}

/// Photo picker dialog state.
#[derive(Debug, Clone)]
pub struct PhotoPicker {
    /// Directory being browsed
    pub dir: PathBuf,
    /// Image files found in the directory, sorted by name
    pub entries: Vec<PathBuf>,
    /// Check state parallel to `entries`
    pub checked: Vec<bool>,
    /// Cursor row
    pub cursor: usize,
    /// Maximum number of files that may be committed
    pub limit: usize,
    /// List widget state
    pub list_state: ListState,
}

impl PhotoPicker {
    /// Scans a directory for image files and builds the dialog.
    pub fn new(dir: &Path, limit: usize) -> Result<Self> {
        let mut entries = Vec::new();
        let listing = fs::read_dir(dir)
            .context(format!("Failed to read picture directory: {}", dir.display()))?;
        for entry in listing {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()));
            if is_image {
                entries.push(path);
            }
        }
        entries.sort();

        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Ok(Self {
            dir: dir.to_path_buf(),
            checked: vec![false; entries.len()],
            entries,
            cursor: 0,
            limit,
            list_state,
        })
    }

    /// Number of files currently checked.
    #[must_use]
    pub fn checked_count(&self) -> usize {
        self.checked.iter().filter(|c| **c).count()
    }

    /// Checked files in directory order.
    #[must_use]
    pub fn picked(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(path, _)| path.clone())
            .collect()
    }
}

impl Component for PhotoPicker {
    type Event = PhotoPickerEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Esc => Some(PhotoPickerEvent::Cancelled),
            KeyCode::Enter => {
                let picked = self.picked();
                if picked.is_empty() {
                    return Some(PhotoPickerEvent::Cancelled);
                }
                Some(PhotoPickerEvent::Picked(picked))
            }
            KeyCode::Char(' ') => {
                let checked_count = self.checked_count();
                if let Some(checked) = self.checked.get_mut(self.cursor) {
                    if *checked {
                        *checked = false;
                    } else if checked_count < self.limit {
                        *checked = true;
                    }
                }
                None
            }
            KeyCode::Up => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                self.list_state.select(Some(self.cursor));
                None
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                }
                self.list_state.select(Some(self.cursor));
                None
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = centered_rect(60, 70, area);

        f.render_widget(Clear, dialog_area);
        let backdrop = Block::default().style(Style::default().bg(theme.background));
        f.render_widget(backdrop, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(dialog_area);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .zip(&self.checked)
            .map(|(path, checked)| {
                let indicator = if *checked { "☑" } else { "☐" };
                let style = if *checked {
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{indicator} "), style),
                    Span::styled(name, style),
                ]))
            })
            .collect();

        let title = format!(
            " Pictures in {} ({}/{} picked) ",
            self.dir.display(),
            self.checked_count(),
            self.limit
        );
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("► ");

        let mut list_state = self.list_state.clone();
        f.render_stateful_widget(list, chunks[0], &mut list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("Space", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" Check  "),
            Span::styled("Enter", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" Confirm  "),
            Span::styled("Esc", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(help, chunks[1]);
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
