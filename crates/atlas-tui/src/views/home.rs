//! Landing screen with navigation hints.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::route::Route;
use crate::state::AppState;
use crate::update;

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            vec![]
        }
        KeyCode::Char('l') => update::navigate(state, Route::Login),
        KeyCode::Char('s') => update::navigate(state, Route::Signup),
        KeyCode::Char('b') => update::navigate(state, Route::Board),
        KeyCode::Char('c') => update::navigate(state, Route::CreateJob),
        KeyCode::Char('o') => start_logout(state),
        _ => vec![],
    }
}

fn start_logout(state: &mut AppState) -> Vec<UiEffect> {
    if state.identity.is_none() {
        state.status = Some("Not logged in.".to_string());
        return vec![];
    }
    if state.tasks.logout.is_running() {
        return vec![];
    }
    let task = update::start_task(state, TaskKind::Logout);
    vec![UiEffect::Logout { task }]
}

pub fn render(state: &AppState, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "AtlasList",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Freelance job marketplace"),
        Line::default(),
    ];

    match state.username() {
        Some(name) => lines.push(Line::from(format!("Logged in as {name}"))),
        None => lines.push(Line::from(Span::styled(
            "Not logged in",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::default());

    lines.push(Line::from("  b  Job board"));
    lines.push(Line::from("  c  Post a job"));
    if state.identity.is_some() {
        lines.push(Line::from("  o  Log out"));
    } else {
        lines.push(Line::from("  l  Log in"));
        lines.push(Line::from("  s  Sign up"));
    }
    lines.push(Line::from("  q  Quit"));

    if state.tasks.logout.is_running() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Logging out...",
            Style::default().fg(Color::Yellow),
        )));
    }

    let block = Block::default().borders(Borders::ALL).title(" AtlasList ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
