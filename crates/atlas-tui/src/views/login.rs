//! Username/password form.

use atlas_core::forms::{FieldError, LoginForm};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::form::TextField;
use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::route::Route;
use crate::state::AppState;
use crate::update;
use crate::views::{FIELD_VALUE_COL, error_lines, field_line};

const FIELD_COUNT: usize = 2;

#[derive(Debug)]
pub struct LoginView {
    pub username: TextField,
    pub password: TextField,
    pub focus: usize,
    pub errors: Vec<FieldError>,
    /// Server-side failure or a redirect explanation from the route gate.
    pub notice: Option<String>,
    pub submitting: bool,
}

impl Default for LoginView {
    fn default() -> Self {
        Self {
            username: TextField::default(),
            password: TextField::masked(),
            focus: 0,
            errors: Vec::new(),
            notice: None,
            submitting: false,
        }
    }
}

impl LoginView {
    fn focused_field(&mut self) -> &mut TextField {
        if self.focus == 0 {
            &mut self.username
        } else {
            &mut self.password
        }
    }
}

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if state.login.submitting {
        return vec![];
    }
    match key.code {
        KeyCode::Esc => update::navigate(state, Route::Home),
        KeyCode::Tab | KeyCode::Down => {
            state.login.focus = (state.login.focus + 1) % FIELD_COUNT;
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.login.focus = (state.login.focus + FIELD_COUNT - 1) % FIELD_COUNT;
            vec![]
        }
        KeyCode::Enter => submit(state),
        _ => {
            state.login.focused_field().apply_key(key);
            vec![]
        }
    }
}

fn submit(state: &mut AppState) -> Vec<UiEffect> {
    let form = LoginForm {
        username: state.login.username.value().to_string(),
        password: state.login.password.value().to_string(),
    };
    match form.validate() {
        Ok(request) => {
            state.login.errors.clear();
            state.login.notice = None;
            state.login.submitting = true;
            let task = update::start_task(state, TaskKind::Login);
            vec![UiEffect::Login { task, request }]
        }
        Err(errors) => {
            state.login.errors = errors;
            vec![]
        }
    }
}

pub fn render(state: &AppState, frame: &mut Frame, area: Rect) {
    let view = &state.login;
    let mut lines = vec![
        field_line("Username:", &view.username, view.focus == 0),
        field_line("Password:", &view.password, view.focus == 1),
        Line::default(),
    ];

    if view.submitting {
        lines.push(Line::from(Span::styled(
            "Logging in...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(notice) = &view.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.extend(error_lines(&view.errors));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "enter submit · tab next field · esc back",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default().borders(Borders::ALL).title(" Log in ");
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if !view.submitting {
        let field = if view.focus == 0 {
            &view.username
        } else {
            &view.password
        };
        let focus = u16::try_from(view.focus).unwrap_or(0);
        frame.set_cursor_position((
            area.x + 1 + FIELD_VALUE_COL + field.cursor_column(),
            area.y + 1 + focus,
        ));
    }
}
