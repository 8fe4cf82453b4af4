//! Job posting form plus the user's created jobs.

use atlas_core::forms::{FieldError, JobForm};
use atlas_types::{Job, JobLevel};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::form::TextField;
use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::route::{Route, ViewPhase};
use crate::state::AppState;
use crate::update;
use crate::views::{FIELD_VALUE_COL, error_lines, field_line};

/// Three text fields plus the level selector row.
const FIELD_COUNT: usize = 4;
const LEVEL_ROW: usize = 3;

#[derive(Debug)]
pub struct CreateJobView {
    /// Lifecycle of the created-jobs panel fetch.
    pub phase: ViewPhase,
    pub created: Vec<Job>,
    pub title: TextField,
    pub description: TextField,
    pub rate: TextField,
    pub level_idx: usize,
    pub focus: usize,
    pub errors: Vec<FieldError>,
    pub notice: Option<String>,
    pub submitting: bool,
}

impl Default for CreateJobView {
    fn default() -> Self {
        Self {
            phase: ViewPhase::Loading,
            created: Vec::new(),
            title: TextField::default(),
            description: TextField::default(),
            rate: TextField::default(),
            level_idx: 0,
            focus: 0,
            errors: Vec::new(),
            notice: None,
            submitting: false,
        }
    }
}

impl CreateJobView {
    fn level(&self) -> JobLevel {
        JobLevel::all()
            .get(self.level_idx)
            .copied()
            .unwrap_or(JobLevel::EntryLevel)
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut TextField> {
        match index {
            0 => Some(&mut self.title),
            1 => Some(&mut self.description),
            2 => Some(&mut self.rate),
            _ => None,
        }
    }

    fn field(&self, index: usize) -> Option<&TextField> {
        match index {
            0 => Some(&self.title),
            1 => Some(&self.description),
            2 => Some(&self.rate),
            _ => None,
        }
    }

    pub(crate) fn reset_form(&mut self) {
        self.title.clear();
        self.description.clear();
        self.rate.clear();
        self.level_idx = 0;
        self.focus = 0;
        self.errors.clear();
    }
}

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if state.create_job.submitting {
        return vec![];
    }
    match key.code {
        KeyCode::Esc => update::navigate(state, Route::Home),
        KeyCode::Char('l') if !matches!(state.create_job.phase, ViewPhase::Ready) => {
            update::navigate(state, Route::Login)
        }
        KeyCode::Char('r') if !matches!(state.create_job.phase, ViewPhase::Ready) => {
            update::navigate(state, Route::CreateJob)
        }
        KeyCode::Tab | KeyCode::Down => {
            state.create_job.focus = (state.create_job.focus + 1) % FIELD_COUNT;
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.create_job.focus = (state.create_job.focus + FIELD_COUNT - 1) % FIELD_COUNT;
            vec![]
        }
        KeyCode::Enter => submit(state),
        KeyCode::Left if state.create_job.focus == LEVEL_ROW => {
            let count = JobLevel::all().len();
            state.create_job.level_idx = (state.create_job.level_idx + count - 1) % count;
            vec![]
        }
        KeyCode::Right if state.create_job.focus == LEVEL_ROW => {
            state.create_job.level_idx = (state.create_job.level_idx + 1) % JobLevel::all().len();
            vec![]
        }
        _ => {
            let focus = state.create_job.focus;
            if let Some(field) = state.create_job.field_mut(focus) {
                field.apply_key(key);
            }
            vec![]
        }
    }
}

fn submit(state: &mut AppState) -> Vec<UiEffect> {
    let form = JobForm {
        title: state.create_job.title.value().to_string(),
        description: state.create_job.description.value().to_string(),
        rate: state.create_job.rate.value().to_string(),
        level: Some(state.create_job.level()),
    };
    match form.validate() {
        Ok(draft) => {
            state.create_job.errors.clear();
            state.create_job.notice = None;
            state.create_job.submitting = true;
            let task = update::start_task(state, TaskKind::JobCreate);
            vec![UiEffect::CreateJob { task, draft }]
        }
        Err(errors) => {
            state.create_job.errors = errors;
            vec![]
        }
    }
}

pub fn render(state: &AppState, frame: &mut Frame, area: Rect) {
    let view = &state.create_job;
    match &view.phase {
        ViewPhase::Loading => return render_message(frame, area, "Loading...", Color::Yellow),
        ViewPhase::ErrorNoSession | ViewPhase::ErrorExpired => {
            let message = super::board::phase_message(&view.phase);
            return render_message(frame, area, &format!("{message}  (l to log in)"), Color::Red);
        }
        ViewPhase::Failed(message) => {
            return render_message(frame, area, &format!("{message}  (r to retry)"), Color::Red);
        }
        ViewPhase::Ready => {}
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(4)])
        .split(area);

    let level_style = if view.focus == LEVEL_ROW {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut lines = vec![
        field_line("Title:", &view.title, view.focus == 0),
        field_line("Description:", &view.description, view.focus == 1),
        field_line("Rate ($/hr):", &view.rate, view.focus == 2),
        Line::from(vec![
            Span::styled(format!("{:<14} ", "Level:"), level_style),
            Span::raw(view.level().label()),
            Span::styled("  (←/→ to change)", Style::default().fg(Color::DarkGray)),
        ]),
        Line::default(),
    ];

    if view.submitting {
        lines.push(Line::from(Span::styled(
            "Posting job...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(notice) = &view.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.extend(error_lines(&view.errors));
    lines.push(Line::from(Span::styled(
        "enter submit · tab next field · esc back",
        Style::default().fg(Color::DarkGray),
    )));

    let form_block = Block::default().borders(Borders::ALL).title(" Post a job ");
    frame.render_widget(Paragraph::new(lines).block(form_block), chunks[0]);

    let mut created_lines = Vec::new();
    if view.created.is_empty() {
        created_lines.push(Line::from(Span::styled(
            "No jobs posted yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for job in &view.created {
        created_lines.push(Line::from(format!(
            "  {} · ${:.2}/hr · {}",
            job.title,
            job.rate,
            job.level.label()
        )));
    }
    let created_block = Block::default()
        .borders(Borders::ALL)
        .title(" Your posted jobs ");
    frame.render_widget(Paragraph::new(created_lines).block(created_block), chunks[1]);

    if !view.submitting
        && let Some(field) = view.field(view.focus)
    {
        let focus = u16::try_from(view.focus).unwrap_or(0);
        frame.set_cursor_position((
            chunks[0].x + 1 + FIELD_VALUE_COL + field.cursor_column(),
            chunks[0].y + 1 + focus,
        ));
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let block = Block::default().borders(Borders::ALL).title(" Post a job ");
    let text = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color),
    )))
    .block(block);
    frame.render_widget(text, area);
}
