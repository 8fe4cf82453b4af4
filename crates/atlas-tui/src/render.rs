//! Pure view/render functions.
//!
//! Functions here take `&AppState`, draw to a ratatui frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::route::Route;
use crate::state::AppState;
use crate::views;

/// Height of the status line below the active view.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for the status line animation.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(STATUS_HEIGHT)])
        .split(area);

    match state.route {
        Route::Home => views::home::render(state, frame, chunks[0]),
        Route::Login => views::login::render(state, frame, chunks[0]),
        Route::Signup => views::signup::render(state, frame, chunks[0]),
        Route::Board => views::board::render(state, frame, chunks[0]),
        Route::CreateJob => views::create_job::render(state, frame, chunks[0]),
    }

    frame.render_widget(Paragraph::new(status_line(state)), chunks[1]);
}

fn status_line(state: &AppState) -> Line<'_> {
    let mut spans = vec![Span::styled(
        format!(" {} ", state.route.title()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];

    if state.is_busy() {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {spinner}"),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(status) = &state.status {
        spans.push(Span::raw(format!("  {status}")));
    } else if let Some(name) = state.username() {
        spans.push(Span::styled(
            format!("  {name}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}
