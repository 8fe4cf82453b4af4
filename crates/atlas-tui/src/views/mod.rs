//! One module per screen. Each view owns its state struct, its key
//! handling, and its render function.

pub mod board;
pub mod create_job;
pub mod home;
pub mod login;
pub mod signup;

use atlas_core::forms::FieldError;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::common::form::TextField;

/// Column where field values start, after the padded label.
pub(crate) const FIELD_VALUE_COL: u16 = 15;

/// One `label: value` line for a form field.
pub(crate) fn field_line<'a>(label: &'a str, field: &TextField, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let padded = format!("{label:<14} ");
    Line::from(vec![
        Span::styled(padded, label_style),
        Span::raw(field.display()),
    ])
}

/// Red line per validation error, prefixed with the field name.
pub(crate) fn error_lines(errors: &[FieldError]) -> Vec<Line<'static>> {
    errors
        .iter()
        .map(|e| {
            Line::from(Span::styled(
                format!("{}: {}", e.field, e.message),
                Style::default().fg(Color::Red),
            ))
        })
        .collect()
}
