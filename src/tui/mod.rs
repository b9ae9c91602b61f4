//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `FormApp`, event handling,
//! and all form widgets using Ratatui.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod code_input;
pub mod component;
pub mod country_picker;
pub mod date_picker;
pub mod form;
pub mod photo_grid;
pub mod photo_picker;
pub mod presenter;
pub mod range_picker;
pub mod select_list;
pub mod status_bar;
pub mod text_area;
pub mod text_input;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;

use crate::config::Config;
use crate::models::{FieldKind, FormDefinition};
use crate::validation::Rules;

// Re-export TUI components
pub use code_input::CodeInput;
pub use component::Component;
pub use country_picker::{CountryPicker, CountryPickerEvent};
pub use date_picker::{DateColumn, DatePicker};
pub use form::{FormDelegate, FormState};
pub use photo_grid::{PhotoGrid, PhotoSlot};
pub use photo_picker::{PhotoPicker, PhotoPickerEvent};
pub use presenter::{FieldPresenter, PresenterEvent, PresenterPhase};
pub use range_picker::RangePicker;
pub use select_list::SelectList;
pub use status_bar::{StatusBar, StatusMessage};
pub use text_area::TextArea;
pub use text_input::TextInput;
pub use theme::Theme;

/// Modal dialog currently covering the form, if any.
#[derive(Debug)]
pub enum ActiveModal {
    /// Country picker for the phone field
    Country(CountryPicker),
    /// File browser for the photo field
    Photos(PhotoPicker),
}

/// Top-level application state for one running form.
#[derive(Debug)]
pub struct FormApp {
    /// Host state (field list, values, readiness)
    pub form: FormState,
    /// The single reusable field presenter
    pub presenter: FieldPresenter,
    /// Application configuration
    pub config: Config,
    /// Active theme, refreshed each tick
    pub theme: Theme,
    /// Modal dialog on top of the form, if any
    pub modal: Option<ActiveModal>,
    /// Transient status message
    pub status: Option<StatusMessage>,
    /// Set when the user abandons the form
    pub should_quit: bool,
}

impl FormApp {
    /// Builds the app: compiles the validation rules, binds the first
    /// field, and activates it.
    pub fn new(
        definition: FormDefinition,
        config: Config,
        photo_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let rules = Rules::new()?;
        let presenter =
            FieldPresenter::with_cached_country(rules, config.ui.last_phone_country.as_deref());
        let mut form = FormState::new(definition)?;
        if let Some(dir) = photo_dir {
            form = form.with_photo_dir(dir);
        }

        let theme = Theme::from_mode(config.ui.theme_mode);
        let mut app = Self {
            form,
            presenter,
            config,
            theme,
            modal: None,
            status: None,
            should_quit: false,
        };
        app.bind_current_field();
        Ok(app)
    }

    /// Sets an informational status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    /// Sets an error status message.
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Configures and activates the presenter for the host's current
    /// field. The presenter must be idle.
    fn bind_current_field(&mut self) {
        self.presenter
            .configure(&self.form.fields[self.form.current].clone(), &self.form);
        self.presenter.activate(&mut self.form);
    }

    /// Tries to advance past the current field.
    fn try_advance(&mut self) {
        if !self.form.ready {
            self.set_status("Complete this field to continue");
            return;
        }
        self.presenter.deactivate(&mut self.form);
        self.form.advance();
        self.status = None;
        if !self.form.completed {
            self.bind_current_field();
        }
    }

    /// Steps back to the previous field.
    fn try_retreat(&mut self) {
        if self.form.current == 0 {
            return;
        }
        self.presenter.deactivate(&mut self.form);
        self.form.retreat();
        self.status = None;
        self.bind_current_field();
    }

    /// Routes one key event: modal first, then global navigation, then
    /// the presenter.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.modal.is_some() {
            self.handle_modal_key(key);
            return Ok(());
        }

        // Global navigation
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return Ok(());
            }
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.try_advance();
                return Ok(());
            }
            (KeyCode::BackTab, _) => {
                self.try_retreat();
                return Ok(());
            }
            (KeyCode::Esc, _) => {
                if self.form.current == 0 {
                    self.should_quit = true;
                } else {
                    self.try_retreat();
                }
                return Ok(());
            }
            _ => {}
        }

        match self.presenter.handle_input(key, &mut self.form) {
            Some(PresenterEvent::Submit) => self.try_advance(),
            Some(PresenterEvent::OpenCountryPicker) => {
                self.modal = Some(ActiveModal::Country(CountryPicker::new()));
            }
            Some(PresenterEvent::OpenPhotoPicker) => self.open_photo_picker(),
            Some(PresenterEvent::PhotoPickerUnavailable) => {
                self.set_status("Photo selection isn't available here");
            }
            None => {}
        }

        Ok(())
    }

    fn open_photo_picker(&mut self) {
        // The host set the request flag from request_photo_picker; the UI
        // loop owns presenting the dialog
        if !self.form.photo_picker_requested {
            return;
        }
        self.form.photo_picker_requested = false;

        let Some(dir) = self.form.photo_dir.clone() else {
            return;
        };
        let open_slots = self
            .presenter
            .photo_grid
            .as_ref()
            .map_or(0, |grid| grid.open_slots().len());
        if open_slots == 0 {
            self.set_status("All picture slots are filled");
            return;
        }
        match PhotoPicker::new(&dir, open_slots) {
            Ok(picker) => self.modal = Some(ActiveModal::Photos(picker)),
            Err(e) => self.set_error(format!("{e:#}")),
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = &mut self.modal else {
            return;
        };
        match modal {
            ActiveModal::Country(picker) => match picker.handle_input(key) {
                Some(CountryPickerEvent::Selected(country)) => {
                    self.presenter.set_country(country, &mut self.form);
                    // Cache the choice; a config write failure is not
                    // worth interrupting the form for
                    if self
                        .config
                        .set_last_phone_country(country.iso.to_string())
                        .and_then(|()| self.config.save())
                        .is_err()
                    {
                        self.set_status("Could not remember the country choice");
                    }
                    self.modal = None;
                }
                Some(CountryPickerEvent::Cancelled) => {
                    self.modal = None;
                }
                None => {}
            },
            ActiveModal::Photos(picker) => match picker.handle_input(key) {
                Some(PhotoPickerEvent::Picked(paths)) => {
                    self.presenter.begin_photos(paths);
                    self.modal = None;
                }
                Some(PhotoPickerEvent::Cancelled) => {
                    self.modal = None;
                }
                None => {}
            },
        }
    }

    /// Key hints for the current field kind.
    fn hints(&self) -> &'static str {
        match self.form.current_field().kind {
            FieldKind::Name | FieldKind::Username | FieldKind::Email => {
                "Enter/Tab Next  |  Esc Back"
            }
            FieldKind::Phone => "c Country  |  Enter/Tab Next  |  Esc Back",
            FieldKind::VerificationCode(_) => "Digits to enter  |  Enter/Tab Next  |  Esc Back",
            FieldKind::Date(_) => "↑↓ Adjust  |  ←→ Column  |  Enter/Tab Next  |  Esc Back",
            FieldKind::Select(_) => "↑↓ Navigate  |  Space/Enter Toggle  |  Tab Next  |  Esc Back",
            FieldKind::LargeText => "Tab Next  |  Esc Back",
            FieldKind::Range(_) => "↑↓ Spin  |  Enter/Tab Next  |  Esc Back",
            FieldKind::PhotoSelect(_) => {
                "←→ Slot  |  Enter Pick files  |  Tab Next  |  Esc Back"
            }
        }
    }

    /// Renders the full frame: header, field, status bar, and any modal.
    pub fn render(&self, f: &mut Frame) {
        let size = f.area();
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(8),    // Field
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        // Header: form title and progress
        let (step, total) = self.form.progress();
        let title = self.form.title.as_deref().unwrap_or("Onboarding");
        let header = Line::from(vec![
            Span::styled(
                title.to_string(),
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {step}/{total}"),
                Style::default().fg(self.theme.text_muted),
            ),
        ]);
        f.render_widget(Paragraph::new(header), chunks[0]);

        self.presenter.render(f, chunks[1], &self.theme);

        StatusBar::render(
            f,
            chunks[2],
            &self.theme,
            self.form.ready,
            self.hints(),
            self.status.as_ref(),
            self.config.ui.show_key_hints,
        );

        if let Some(modal) = &self.modal {
            match modal {
                ActiveModal::Country(picker) => picker.render(f, size, &self.theme),
                ActiveModal::Photos(picker) => picker.render(f, size, &self.theme),
            }
        }
    }
}

/// Sets up the terminal in raw mode with the alternate screen.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
