//! The reusable field presenter.
//!
//! One presenter instance is bound to one field at a time. It builds the
//! widget state matching the field's kind, feeds raw input into the
//! validation rules, and pushes `(ready, value)` to the host on every
//! edit. Recycling the presenter for a different field goes through
//! `reset`, which clears every widget and invalidates in-flight photo
//! decodes; nothing may leak from one field into the next.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::models::{by_iso, Country, FieldConfig, FieldKind, FieldValue, Photo};
use crate::services::{DecodeRequest, PhotoLoader};
use crate::validation::{FieldInput, Rules};

use super::code_input::CodeInput;
use super::date_picker::DatePicker;
use super::form::FormDelegate;
use super::photo_grid::PhotoGrid;
use super::range_picker::RangePicker;
use super::select_list::SelectList;
use super::text_area::TextArea;
use super::text_input::TextInput;
use super::Theme;

/// Presenter lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenterPhase {
    /// Just reset; no field bound
    #[default]
    Idle,
    /// Field bound, widgets built, not focused
    Configured,
    /// Current step; input flows into the widgets
    Active,
}

/// Events the presenter surfaces to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    /// User asked to advance (Enter on a single-value field)
    Submit,
    /// User tapped the country indicator on a phone field
    OpenCountryPicker,
    /// Host granted the photo-picker request
    OpenPhotoPicker,
    /// User asked for pictures but the host declined the capability
    PhotoPickerUnavailable,
}

/// Reusable render/input unit bound to one field at a time.
#[derive(Debug)]
pub struct FieldPresenter {
    rules: Rules,
    /// Lifecycle phase
    pub phase: PresenterPhase,
    /// Field currently bound, if any
    pub config: Option<FieldConfig>,

    // Widget state. Text widgets always exist and are cleared on reset;
    // kind-parameterized widgets exist only while a matching field is
    // bound.
    /// Single-line input (name, username, email, phone digits)
    pub text_input: TextInput,
    /// Multi-line input (large text)
    pub text_area: TextArea,
    /// Code boxes, present for verification-code fields
    pub code_input: Option<CodeInput>,
    /// Date wheel, present for date fields
    pub date_picker: Option<DatePicker>,
    /// Option list, present for select fields
    pub select_list: Option<SelectList>,
    /// Value wheel, present for range fields
    pub range_picker: Option<RangePicker>,
    /// Picture grid, present for photo fields
    pub photo_grid: Option<PhotoGrid>,

    /// Country used for the phone prefix; survives recycling so the last
    /// choice carries across phone fields in the same run
    pub country: &'static Country,
    /// Whether the presenter currently holds input focus
    pub focused: bool,
    // Focus changes are deferred to the next UI-loop turn so they never
    // interleave with an in-flight render pass
    pending_focus: Option<bool>,

    loader: PhotoLoader,
    // Bumped on reset; stale decode results are dropped on receipt
    generation: u64,
}

impl FieldPresenter {
    /// Creates an idle presenter.
    ///
    /// `country` is the phone prefix to start from: the cached preference
    /// when one exists, otherwise the "US" default.
    #[must_use]
    pub fn new(rules: Rules, country: &'static Country) -> Self {
        Self {
            rules,
            phase: PresenterPhase::Idle,
            config: None,
            text_input: TextInput::new(),
            text_area: TextArea::new(),
            code_input: None,
            date_picker: None,
            select_list: None,
            range_picker: None,
            photo_grid: None,
            country,
            focused: false,
            pending_focus: None,
            loader: PhotoLoader::new(),
            generation: 0,
        }
    }

    /// Convenience constructor resolving the cached country ISO code.
    pub fn with_cached_country(rules: Rules, cached_iso: Option<&str>) -> Self {
        let country = cached_iso
            .and_then(by_iso)
            .or_else(|| by_iso(crate::constants::DEFAULT_PHONE_COUNTRY))
            .expect("default phone country must exist in the table");
        Self::new(rules, country)
    }

    /// Binds a field: builds the widget state for its kind and restores a
    /// previously stored value from the host, if any.
    ///
    /// Must be called on an idle presenter; recycle through `reset`
    /// first.
    pub fn configure(&mut self, config: &FieldConfig, delegate: &dyn FormDelegate) {
        debug_assert_eq!(self.phase, PresenterPhase::Idle);

        let stored = delegate.value_for(&config.key).cloned();

        match &config.kind {
            FieldKind::Name | FieldKind::Username | FieldKind::Email => {
                if let Some(FieldValue::Text(text)) = &stored {
                    self.text_input.set_text(text);
                }
            }
            FieldKind::Phone => {
                self.text_input = TextInput::digits();
                if let Some(FieldValue::Text(text)) = &stored {
                    // Stored phone values carry the prefix; restore only
                    // the locally entered digits
                    let prefix = format!("+{}", self.country.calling_code);
                    let digits = text.strip_prefix(&prefix).unwrap_or(text);
                    let digits: String = digits.chars().filter(char::is_ascii_digit).collect();
                    self.text_input.set_text(&digits);
                }
            }
            FieldKind::LargeText => {
                if let Some(FieldValue::Text(text)) = &stored {
                    self.text_area.set_text(text);
                }
            }
            FieldKind::VerificationCode(code) => {
                let mut input = CodeInput::new(code.length);
                if let Some(FieldValue::Text(digits)) = &stored {
                    input.set_digits(digits);
                }
                self.code_input = Some(input);
            }
            FieldKind::Date(date) => {
                let mut picker = DatePicker::new(date);
                if let Some(FieldValue::Date(stored_date)) = &stored {
                    picker.set_date(*stored_date);
                }
                self.date_picker = Some(picker);
            }
            FieldKind::Select(select) => {
                let mut list = SelectList::new(select);
                match &stored {
                    Some(FieldValue::SingleSelect { id, .. }) if !select.multiple => {
                        list.restore_single(id);
                    }
                    Some(FieldValue::MultiSelect(map)) if select.multiple => {
                        list.restore_multi(map);
                    }
                    _ => {}
                }
                self.select_list = Some(list);
            }
            FieldKind::Range(range) => {
                let mut picker = RangePicker::new(range);
                if let Some(FieldValue::Range(value)) = &stored {
                    picker.restore(value);
                }
                self.range_picker = Some(picker);
            }
            FieldKind::PhotoSelect(photos) => {
                let mut grid = PhotoGrid::new(photos.slots);
                if let Some(FieldValue::Photos(stored_photos)) = &stored {
                    grid.restore(stored_photos);
                }
                self.photo_grid = Some(grid);
            }
        }

        self.config = Some(config.clone());
        self.phase = PresenterPhase::Configured;
    }

    /// Marks the field as the current step.
    ///
    /// Focus is deferred to the next `tick`; readiness is recomputed
    /// immediately, independent of the deferred focus change.
    pub fn activate(&mut self, delegate: &mut dyn FormDelegate) {
        if self.phase != PresenterPhase::Configured {
            return;
        }
        self.phase = PresenterPhase::Active;
        self.pending_focus = Some(true);
        self.check_ready(delegate);
    }

    /// Pushes the final `(ready, value)` for the bound field, then resets.
    pub fn deactivate(&mut self, delegate: &mut dyn FormDelegate) {
        if self.phase == PresenterPhase::Active {
            self.check_ready(delegate);
        }
        self.reset();
    }

    /// Clears every widget and returns to `Idle`.
    ///
    /// This is the recycling boundary: no text, selection, focus state,
    /// or in-flight decode survives it.
    pub fn reset(&mut self) {
        self.phase = PresenterPhase::Idle;
        self.config = None;
        self.text_input = TextInput::new();
        self.text_area.clear();
        self.code_input = None;
        self.date_picker = None;
        self.select_list = None;
        self.range_picker = None;
        self.photo_grid = None;
        self.focused = false;
        self.pending_focus = Some(false);
        // Invalidate in-flight photo decodes
        self.generation += 1;
    }

    /// Applies deferred focus changes. Called once per UI-loop turn.
    pub fn tick(&mut self) {
        if let Some(focus) = self.pending_focus.take() {
            self.focused = focus;
        }
    }

    /// Recomputes readiness from the current widget state and pushes
    /// `(ready, value)` to the host. Pushed unconditionally; the host
    /// tolerates redundant updates.
    pub fn check_ready(&self, delegate: &mut dyn FormDelegate) {
        let Some(config) = &self.config else {
            return;
        };

        let evaluation = match &config.kind {
            FieldKind::Name | FieldKind::Username | FieldKind::Email => self
                .rules
                .evaluate(config, &FieldInput::Text(self.text_input.text())),
            FieldKind::LargeText => {
                let text = self.text_area.text();
                self.rules.evaluate(config, &FieldInput::Text(&text))
            }
            FieldKind::VerificationCode(_) => {
                let digits = self.code_input.as_ref().map_or("", |c| c.digits.as_str());
                self.rules.evaluate(config, &FieldInput::Code(digits))
            }
            FieldKind::Date(_) => {
                let Some(picker) = &self.date_picker else {
                    return;
                };
                self.rules.evaluate(config, &FieldInput::Date(picker.date))
            }
            FieldKind::Phone => self.rules.evaluate(
                config,
                &FieldInput::Phone {
                    country: self.country,
                    digits: self.text_input.text(),
                },
            ),
            FieldKind::Select(select) => {
                let Some(list) = &self.select_list else {
                    return;
                };
                if select.multiple {
                    self.rules
                        .evaluate(config, &FieldInput::MultiSelect(&list.checked))
                } else {
                    self.rules
                        .evaluate(config, &FieldInput::SingleSelect(list.selected_option()))
                }
            }
            FieldKind::Range(_) => {
                let Some(picker) = &self.range_picker else {
                    return;
                };
                self.rules
                    .evaluate(config, &FieldInput::Range(picker.selected_value()))
            }
            FieldKind::PhotoSelect(_) => {
                let Some(grid) = &self.photo_grid else {
                    return;
                };
                let photos = grid.photos();
                self.rules.evaluate(config, &FieldInput::Photos(&photos))
            }
        };

        delegate.set_ready(evaluation.ready);
        delegate.set_value(&config.key, evaluation.value);
    }

    /// Routes a key event into the bound field's widget.
    ///
    /// Every edit re-evaluates readiness synchronously. Returns an event
    /// when the UI loop needs to act (advance, open a picker).
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        delegate: &mut dyn FormDelegate,
    ) -> Option<PresenterEvent> {
        if self.phase != PresenterPhase::Active {
            return None;
        }
        let kind = self.config.as_ref()?.kind.clone();

        let event = match kind {
            FieldKind::Name | FieldKind::Username | FieldKind::Email => {
                if key.code == KeyCode::Enter {
                    Some(PresenterEvent::Submit)
                } else {
                    self.text_input.handle_key(key);
                    None
                }
            }
            FieldKind::Phone => match key.code {
                KeyCode::Enter => Some(PresenterEvent::Submit),
                // Letters never reach the digit buffer, so 'c' is free to
                // open the country indicator
                KeyCode::Char('c') => Some(PresenterEvent::OpenCountryPicker),
                _ => {
                    self.text_input.handle_key(key);
                    None
                }
            },
            FieldKind::LargeText => {
                self.text_area.handle_key(key);
                None
            }
            FieldKind::VerificationCode(_) => {
                if key.code == KeyCode::Enter {
                    Some(PresenterEvent::Submit)
                } else {
                    if let Some(input) = &mut self.code_input {
                        input.handle_key(key);
                    }
                    None
                }
            }
            FieldKind::Date(_) => {
                if key.code == KeyCode::Enter {
                    Some(PresenterEvent::Submit)
                } else {
                    if let Some(picker) = &mut self.date_picker {
                        picker.handle_key(key);
                    }
                    None
                }
            }
            FieldKind::Select(_) => {
                if let Some(list) = &mut self.select_list {
                    list.handle_key(key);
                }
                None
            }
            FieldKind::Range(_) => {
                if key.code == KeyCode::Enter {
                    Some(PresenterEvent::Submit)
                } else {
                    if let Some(picker) = &mut self.range_picker {
                        picker.handle_key(key);
                    }
                    None
                }
            }
            FieldKind::PhotoSelect(_) => {
                let activated = self
                    .photo_grid
                    .as_mut()
                    .is_some_and(|grid| grid.handle_key(key));
                if activated {
                    if delegate.photo_picker_supported() {
                        delegate.request_photo_picker();
                        Some(PresenterEvent::OpenPhotoPicker)
                    } else {
                        Some(PresenterEvent::PhotoPickerUnavailable)
                    }
                } else {
                    None
                }
            }
        };

        // Readiness is recomputed on every edit, even no-op ones
        self.check_ready(delegate);
        event
    }

    /// Applies a country selection from the picker dialog.
    ///
    /// Re-focuses the digit input (deferred) and re-evaluates readiness
    /// immediately.
    pub fn set_country(&mut self, country: &'static Country, delegate: &mut dyn FormDelegate) {
        self.country = country;
        self.pending_focus = Some(true);
        self.check_ready(delegate);
    }

    /// Queues decodes for a picked batch of files.
    ///
    /// Files fill open slots in visual order; anything beyond the free
    /// slots is dropped.
    pub fn begin_photos(&mut self, paths: Vec<PathBuf>) {
        let Some(grid) = &mut self.photo_grid else {
            return;
        };
        let open = grid.open_slots();
        for (slot, path) in open.into_iter().zip(paths) {
            grid.begin_loading(slot, path.clone());
            self.loader.request(DecodeRequest {
                generation: self.generation,
                slot,
                path,
            });
        }
    }

    /// Drains finished decodes into the grid.
    ///
    /// Results from a previous generation are dropped; their field no
    /// longer exists. Returns decode failure messages for the status
    /// line; failed slots stay empty and the rest of the grid proceeds.
    pub fn poll_photos(&mut self, delegate: &mut dyn FormDelegate) -> Vec<String> {
        let mut failures = Vec::new();
        let mut applied = false;

        for result in self.loader.poll() {
            if result.generation != self.generation {
                continue;
            }
            let Some(grid) = &mut self.photo_grid else {
                continue;
            };
            match result.outcome {
                Ok((width, height)) => {
                    grid.complete(Photo {
                        slot: result.slot,
                        path: result.path,
                        width,
                        height,
                    });
                    applied = true;
                }
                Err(message) => {
                    grid.fail(result.slot);
                    failures.push(message);
                    applied = true;
                }
            }
        }

        if applied {
            self.check_ready(delegate);
        }
        failures
    }

    /// Renders the bound field: title, then the kind's widget subtree.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let Some(config) = &self.config else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Question title
                Constraint::Min(4),    // Widget
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            config.title.clone(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ))
        .wrap(Wrap { trim: true });
        f.render_widget(title, chunks[0]);

        let placeholder = config.placeholder.as_deref();
        match &config.kind {
            FieldKind::Name | FieldKind::Username | FieldKind::Email => {
                let input_area = Rect {
                    height: chunks[1].height.min(2),
                    ..chunks[1]
                };
                self.text_input
                    .render(f, input_area, theme, placeholder, self.focused);
            }
            FieldKind::Phone => self.render_phone(f, chunks[1], theme, placeholder),
            FieldKind::LargeText => {
                self.text_area
                    .render(f, chunks[1], theme, placeholder, self.focused);
            }
            FieldKind::VerificationCode(_) => {
                if let Some(input) = &self.code_input {
                    let input_area = Rect {
                        height: chunks[1].height.min(1),
                        ..chunks[1]
                    };
                    input.render(f, input_area, theme, self.focused);
                }
            }
            FieldKind::Date(_) => {
                if let Some(picker) = &self.date_picker {
                    picker.render(f, chunks[1], theme, self.focused);
                }
            }
            FieldKind::Select(_) => {
                if let Some(list) = &self.select_list {
                    list.render(f, chunks[1], theme);
                }
            }
            FieldKind::Range(_) => {
                if let Some(picker) = &self.range_picker {
                    picker.render(f, chunks[1], theme, self.focused);
                }
            }
            FieldKind::PhotoSelect(_) => {
                if let Some(grid) = &self.photo_grid {
                    let grid_area = Rect {
                        height: chunks[1].height.min(5),
                        ..chunks[1]
                    };
                    grid.render(f, grid_area, theme, self.focused);
                }
            }
        }
    }

    fn render_phone(&self, f: &mut Frame, area: Rect, theme: &Theme, placeholder: Option<&str>) {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(12), Constraint::Min(10)])
            .split(area);

        // Country indicator column: prefix over an underline, 'c' to change
        let prefix = Paragraph::new(vec![
            Line::from(Span::styled(
                self.country.prefix_label(),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "─".repeat(row[0].width.saturating_sub(2) as usize),
                Style::default().fg(theme.text_muted),
            )),
        ]);
        f.render_widget(prefix, row[0]);

        let input_area = Rect {
            height: row[1].height.min(2),
            ..row[1]
        };
        self.text_input
            .render(f, input_area, theme, placeholder, self.focused);
    }
}
