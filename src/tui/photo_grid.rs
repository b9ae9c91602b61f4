//! Picture grid for the photo-select field.
//!
//! Slots are fixed at configure time; decode results land in their slot
//! index regardless of the order they resolve in, so the grid is
//! deterministic. Failed decodes leave their slot empty.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Photo;

use super::Theme;

/// State of one grid slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PhotoSlot {
    /// Nothing picked for this slot
    #[default]
    Empty,
    /// Picked, decode in flight
    Loading(PathBuf),
    /// Decoded successfully
    Loaded(Photo),
    /// Decode failed; slot stays visually empty
    Failed,
}

/// Photo grid state.
#[derive(Debug, Clone)]
pub struct PhotoGrid {
    /// Grid slots in visual order
    pub slots: Vec<PhotoSlot>,
    /// Cursor slot index
    pub cursor: usize,
}

impl PhotoGrid {
    /// Creates an empty grid with the given slot count.
    #[must_use]
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![PhotoSlot::Empty; slot_count],
            cursor: 0,
        }
    }

    /// Marks a slot as loading the given file.
    pub fn begin_loading(&mut self, slot: usize, path: PathBuf) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = PhotoSlot::Loading(path);
        }
    }

    /// Stores a decoded picture in its slot.
    pub fn complete(&mut self, photo: Photo) {
        if let Some(entry) = self.slots.get_mut(photo.slot) {
            *entry = PhotoSlot::Loaded(photo);
        }
    }

    /// Marks a slot's decode as failed.
    pub fn fail(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = PhotoSlot::Failed;
        }
    }

    /// Restores previously captured photos into their slots.
    pub fn restore(&mut self, photos: &[Photo]) {
        for photo in photos {
            self.complete(photo.clone());
        }
    }

    /// Decoded pictures in slot order.
    #[must_use]
    pub fn photos(&self) -> Vec<Photo> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                PhotoSlot::Loaded(photo) => Some(photo.clone()),
                _ => None,
            })
            .collect()
    }

    /// Indices of slots that hold nothing yet, in visual order.
    #[must_use]
    pub fn open_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, PhotoSlot::Empty | PhotoSlot::Failed))
            .map(|(i, _)| i)
            .collect()
    }

    /// Handles one key event. Returns true when the cursor slot was
    /// activated (the parent should open the photo picker).
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor + 1 < self.slots.len() {
                    self.cursor += 1;
                }
                false
            }
            KeyCode::Enter | KeyCode::Char(' ') => true,
            _ => false,
        }
    }

    /// Renders the slots as a horizontal row of boxes.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let constraints: Vec<Constraint> = self
            .slots
            .iter()
            .map(|_| Constraint::Ratio(1, self.slots.len().max(1) as u32))
            .collect();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, slot) in self.slots.iter().enumerate() {
            let is_cursor = focused && i == self.cursor;
            let border_color = if is_cursor { theme.accent } else { theme.text_muted };

            let body = match slot {
                PhotoSlot::Empty => Line::from(Span::styled(
                    "+",
                    Style::default().fg(theme.text_muted).add_modifier(Modifier::BOLD),
                )),
                PhotoSlot::Loading(path) => Line::from(Span::styled(
                    format!("… {}", file_label(path)),
                    Style::default().fg(theme.warning),
                )),
                PhotoSlot::Loaded(photo) => Line::from(vec![
                    Span::styled("🖼 ", Style::default()),
                    Span::styled(
                        format!("{}×{}", photo.width, photo.height),
                        Style::default().fg(theme.success),
                    ),
                ]),
                PhotoSlot::Failed => Line::from(Span::styled(
                    "✗",
                    Style::default().fg(theme.error),
                )),
            };

            let cell = Paragraph::new(body)
                .alignment(ratatui::layout::Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );
            f.render_widget(cell, cells[i]);
        }
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(slot: usize) -> Photo {
        Photo {
            slot,
            path: PathBuf::from(format!("{slot}.png")),
            width: 8,
            height: 8,
        }
    }

    #[test]
    fn test_results_land_in_slot_order() {
        let mut grid = PhotoGrid::new(3);
        // Completion order 2, 0; grid order must still follow slots
        grid.complete(photo(2));
        grid.complete(photo(0));
        let photos = grid.photos();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].slot, 0);
        assert_eq!(photos[1].slot, 2);
    }

    #[test]
    fn test_failed_decode_leaves_slot_open() {
        let mut grid = PhotoGrid::new(2);
        grid.begin_loading(0, PathBuf::from("bad.png"));
        grid.fail(0);
        assert!(grid.photos().is_empty());
        assert_eq!(grid.open_slots(), vec![0, 1]);
    }

    #[test]
    fn test_open_slots_skips_loading_and_loaded() {
        let mut grid = PhotoGrid::new(3);
        grid.begin_loading(0, PathBuf::from("a.png"));
        grid.complete(photo(1));
        assert_eq!(grid.open_slots(), vec![2]);
    }

    #[test]
    fn test_out_of_range_slot_ignored() {
        let mut grid = PhotoGrid::new(1);
        grid.complete(photo(5));
        assert!(grid.photos().is_empty());
    }
}
