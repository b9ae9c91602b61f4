//! Status bar widget for the ready indicator, key hints, and messages.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;

/// A transient message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text
    pub text: String,
    /// Render in the error color
    pub is_error: bool,
}

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar: ready indicator, message, and key hints.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        theme: &Theme,
        ready: bool,
        hints: &str,
        status: Option<&StatusMessage>,
        show_hints: bool,
    ) {
        let ready_span = if ready {
            Span::styled(
                "● ready",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("○ incomplete", Style::default().fg(theme.text_muted))
        };

        let mut spans = vec![ready_span, Span::raw("  ")];

        if let Some(message) = status {
            let color = if message.is_error {
                theme.error
            } else {
                theme.text_secondary
            };
            spans.push(Span::styled(
                message.text.clone(),
                Style::default().fg(color),
            ));
        } else if show_hints {
            spans.push(Span::styled(
                hints.to_string(),
                Style::default().fg(theme.text_muted),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme.text_muted)));
        f.render_widget(paragraph, area);
    }
}
