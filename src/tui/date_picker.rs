//! Wheel-style calendar date picker with day/month/year columns.

use chrono::{Days, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::models::DateFieldConfig;

use super::Theme;

/// Which wheel column the arrow keys currently spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateColumn {
    /// Day of month
    Day,
    /// Month
    Month,
    /// Year
    Year,
}

impl DateColumn {
    const fn next(self) -> Self {
        match self {
            Self::Day => Self::Month,
            Self::Month => Self::Year,
            Self::Year => Self::Day,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Day => Self::Year,
            Self::Month => Self::Day,
            Self::Year => Self::Month,
        }
    }
}

/// Date picker state: the selected date, the active column, and bounds.
#[derive(Debug, Clone)]
pub struct DatePicker {
    /// Currently selected date
    pub date: NaiveDate,
    /// Column the arrow keys adjust
    pub column: DateColumn,
    /// Earliest selectable date (inclusive)
    pub min: Option<NaiveDate>,
    /// Latest selectable date (inclusive)
    pub max: Option<NaiveDate>,
}

/// Fallback initial date when the field configures none.
fn fallback_date() -> NaiveDate {
    // chrono's epoch default (1970-01-01)
    NaiveDate::default()
}

impl DatePicker {
    /// Creates a picker from the field's date parameters.
    #[must_use]
    pub fn new(config: &DateFieldConfig) -> Self {
        let mut picker = Self {
            date: config.default.unwrap_or_else(fallback_date),
            column: DateColumn::Day,
            min: config.min,
            max: config.max,
        };
        picker.clamp();
        picker
    }

    /// Replaces the selected date (clamped to the configured bounds).
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.clamp();
    }

    fn clamp(&mut self) {
        if let Some(min) = self.min {
            if self.date < min {
                self.date = min;
            }
        }
        if let Some(max) = self.max {
            if self.date > max {
                self.date = max;
            }
        }
    }

    fn step(&mut self, forward: bool) {
        let stepped = match (self.column, forward) {
            (DateColumn::Day, true) => self.date.checked_add_days(Days::new(1)),
            (DateColumn::Day, false) => self.date.checked_sub_days(Days::new(1)),
            (DateColumn::Month, true) => self.date.checked_add_months(Months::new(1)),
            (DateColumn::Month, false) => self.date.checked_sub_months(Months::new(1)),
            (DateColumn::Year, true) => self.date.checked_add_months(Months::new(12)),
            (DateColumn::Year, false) => self.date.checked_sub_months(Months::new(12)),
        };
        if let Some(date) = stepped {
            self.date = date;
            self.clamp();
        }
    }

    /// Handles one key event. Returns true if the selected date changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                let before = self.date;
                self.step(true);
                self.date != before
            }
            KeyCode::Down => {
                let before = self.date;
                self.step(false);
                self.date != before
            }
            KeyCode::Right | KeyCode::Tab => {
                self.column = self.column.next();
                false
            }
            KeyCode::Left => {
                self.column = self.column.previous();
                false
            }
            _ => false,
        }
    }

    /// Renders the formatted date label over the three wheel columns.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        // Headline: "12 December 2019"
        let label = self.date.format("%-d %B %Y").to_string();
        f.render_widget(
            Paragraph::new(Span::styled(
                label,
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(14),
                Constraint::Length(8),
            ])
            .split(chunks[1]);

        self.render_column(f, columns[0], theme, DateColumn::Day, focused);
        self.render_column(f, columns[1], theme, DateColumn::Month, focused);
        self.render_column(f, columns[2], theme, DateColumn::Year, focused);
    }

    fn render_column(
        &self,
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        column: DateColumn,
        focused: bool,
    ) {
        let active = focused && self.column == column;
        let value_of = |date: NaiveDate| match column {
            DateColumn::Day => date.format("%-d").to_string(),
            DateColumn::Month => date.format("%B").to_string(),
            DateColumn::Year => date.format("%Y").to_string(),
        };

        // Neighbor rows give the wheel feel: previous above, next below
        let mut wheel = self.clone();
        wheel.column = column;
        let mut above = wheel.clone();
        above.step(false);
        let mut below = wheel.clone();
        below.step(true);

        let selected_style = if active {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(
                value_of(above.date),
                Style::default().fg(theme.text_muted),
            )),
            Line::from(Span::styled(value_of(self.date), selected_style)),
            Line::from(Span::styled(
                value_of(below.date),
                Style::default().fg(theme.text_muted),
            )),
        ];

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn config(min: Option<(i32, u32, u32)>, max: Option<(i32, u32, u32)>, default: Option<(i32, u32, u32)>) -> DateFieldConfig {
        let to_date = |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        DateFieldConfig {
            min: min.map(to_date),
            max: max.map(to_date),
            default: default.map(to_date),
        }
    }

    #[test]
    fn test_starts_at_default_date() {
        let picker = DatePicker::new(&config(None, None, Some((1995, 6, 15))));
        assert_eq!(picker.date, NaiveDate::from_ymd_opt(1995, 6, 15).unwrap());
    }

    #[test]
    fn test_day_step_wraps_month() {
        let mut picker = DatePicker::new(&config(None, None, Some((1995, 6, 30))));
        picker.handle_key(press(KeyCode::Up));
        assert_eq!(picker.date, NaiveDate::from_ymd_opt(1995, 7, 1).unwrap());
    }

    #[test]
    fn test_clamped_to_max() {
        let mut picker = DatePicker::new(&config(None, Some((2000, 1, 1)), Some((2000, 1, 1))));
        assert!(!picker.handle_key(press(KeyCode::Up)));
        assert_eq!(picker.date, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    }

    #[test]
    fn test_clamped_to_min() {
        let mut picker = DatePicker::new(&config(Some((1990, 1, 1)), None, Some((1990, 1, 1))));
        assert!(!picker.handle_key(press(KeyCode::Down)));
        assert_eq!(picker.date, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
    }

    #[test]
    fn test_year_column_steps_twelve_months() {
        let mut picker = DatePicker::new(&config(None, None, Some((1995, 6, 15))));
        picker.column = DateColumn::Year;
        picker.handle_key(press(KeyCode::Up));
        assert_eq!(picker.date, NaiveDate::from_ymd_opt(1996, 6, 15).unwrap());
    }

    #[test]
    fn test_column_cycling() {
        let mut picker = DatePicker::new(&config(None, None, None));
        assert_eq!(picker.column, DateColumn::Day);
        picker.handle_key(press(KeyCode::Right));
        assert_eq!(picker.column, DateColumn::Month);
        picker.handle_key(press(KeyCode::Left));
        assert_eq!(picker.column, DateColumn::Day);
    }
}
