//! Account creation form.

use atlas_core::forms::{FieldError, SignupForm};
use atlas_types::Role;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::form::TextField;
use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::route::Route;
use crate::state::AppState;
use crate::update;
use crate::views::{FIELD_VALUE_COL, error_lines, field_line};

/// Four text fields plus the role selector row.
const FIELD_COUNT: usize = 5;
const ROLE_ROW: usize = 4;

#[derive(Debug)]
pub struct SignupView {
    pub username: TextField,
    pub email: TextField,
    pub password: TextField,
    pub confirm: TextField,
    pub role: Role,
    pub focus: usize,
    pub errors: Vec<FieldError>,
    pub notice: Option<String>,
    pub submitting: bool,
}

impl Default for SignupView {
    fn default() -> Self {
        Self {
            username: TextField::default(),
            email: TextField::default(),
            password: TextField::masked(),
            confirm: TextField::masked(),
            role: Role::Freelancer,
            focus: 0,
            errors: Vec::new(),
            notice: None,
            submitting: false,
        }
    }
}

impl SignupView {
    fn field_mut(&mut self, index: usize) -> Option<&mut TextField> {
        match index {
            0 => Some(&mut self.username),
            1 => Some(&mut self.email),
            2 => Some(&mut self.password),
            3 => Some(&mut self.confirm),
            _ => None,
        }
    }

    fn field(&self, index: usize) -> Option<&TextField> {
        match index {
            0 => Some(&self.username),
            1 => Some(&self.email),
            2 => Some(&self.password),
            3 => Some(&self.confirm),
            _ => None,
        }
    }

    fn toggle_role(&mut self) {
        self.role = match self.role {
            Role::Client => Role::Freelancer,
            Role::Freelancer => Role::Client,
        };
    }
}

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if state.signup.submitting {
        return vec![];
    }
    match key.code {
        KeyCode::Esc => update::navigate(state, Route::Home),
        KeyCode::Tab | KeyCode::Down => {
            state.signup.focus = (state.signup.focus + 1) % FIELD_COUNT;
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.signup.focus = (state.signup.focus + FIELD_COUNT - 1) % FIELD_COUNT;
            vec![]
        }
        KeyCode::Enter => submit(state),
        KeyCode::Left | KeyCode::Right if state.signup.focus == ROLE_ROW => {
            state.signup.toggle_role();
            vec![]
        }
        _ => {
            let focus = state.signup.focus;
            if let Some(field) = state.signup.field_mut(focus) {
                field.apply_key(key);
            }
            vec![]
        }
    }
}

fn submit(state: &mut AppState) -> Vec<UiEffect> {
    let form = SignupForm {
        username: state.signup.username.value().to_string(),
        email: state.signup.email.value().to_string(),
        password: state.signup.password.value().to_string(),
        confirm_password: state.signup.confirm.value().to_string(),
        role: Some(state.signup.role),
    };
    match form.validate() {
        Ok(request) => {
            state.signup.errors.clear();
            state.signup.notice = None;
            state.signup.submitting = true;
            let task = update::start_task(state, TaskKind::Signup);
            vec![UiEffect::Signup { task, request }]
        }
        Err(errors) => {
            state.signup.errors = errors;
            vec![]
        }
    }
}

pub fn render(state: &AppState, frame: &mut Frame, area: Rect) {
    let view = &state.signup;
    let role_style = if view.focus == ROLE_ROW {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut lines = vec![
        field_line("Username:", &view.username, view.focus == 0),
        field_line("Email:", &view.email, view.focus == 1),
        field_line("Password:", &view.password, view.focus == 2),
        field_line("Confirm:", &view.confirm, view.focus == 3),
        Line::from(vec![
            Span::styled(format!("{:<14} ", "Role:"), role_style),
            Span::raw(view.role.label()),
            Span::styled("  (←/→ to change)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::default(),
    ];

    if view.submitting {
        lines.push(Line::from(Span::styled(
            "Creating account...",
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

    let block = Block::default().borders(Borders::ALL).title(" Sign up ");
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if !view.submitting
        && let Some(field) = view.field(view.focus)
    {
        let focus = u16::try_from(view.focus).unwrap_or(0);
        frame.set_cursor_position((
            area.x + 1 + FIELD_VALUE_COL + field.cursor_column(),
            area.y + 1 + focus,
        ));
    }
}
