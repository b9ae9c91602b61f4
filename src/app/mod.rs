//! Application entry points: terminal lifecycle around a running form.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};

use crate::config::Config;
use crate::models::{FieldValue, FormDefinition};
use crate::tui::{self, FormApp};

/// What a finished form run produced.
#[derive(Debug)]
pub struct FormOutcome {
    /// Whether the user advanced past the last field (vs. abandoning)
    pub completed: bool,
    /// Captured answers in field order: (key, value)
    pub answers: Vec<(String, FieldValue)>,
}

/// Runs a form in the terminal and returns the captured answers.
pub fn run_form_terminal(
    definition: FormDefinition,
    config: Config,
    photo_dir: Option<PathBuf>,
) -> Result<FormOutcome> {
    let mut terminal = tui::setup_terminal()?;
    let mut app = FormApp::new(definition, config, photo_dir)?;

    let run_result = run_loop(&mut terminal, &mut app);

    // Restore the terminal before surfacing any error
    tui::restore_terminal(terminal)?;
    run_result?;

    let answers = app
        .form
        .fields
        .iter()
        .filter_map(|field| {
            app.form
                .values
                .get(&field.key)
                .map(|value| (field.key.clone(), value.clone()))
        })
        .collect();

    Ok(FormOutcome {
        completed: app.form.completed,
        answers,
    })
}

fn run_loop(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut FormApp,
) -> Result<()> {
    loop {
        // Re-resolve the theme each tick so Auto follows OS changes
        app.theme = tui::Theme::from_mode(app.config.ui.theme_mode);

        terminal.draw(|f| app.render(f))?;

        // Apply deferred focus changes before processing new input
        app.presenter.tick();

        // Marshal finished photo decodes back onto the UI thread
        let failures = app.presenter.poll_photos(&mut app.form);
        for failure in failures {
            app.set_error(failure);
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key)?;
            }
        }

        if app.form.completed || app.should_quit {
            return Ok(());
        }
    }
}
