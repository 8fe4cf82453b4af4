//! Open jobs plus the user's applications.

use atlas_types::Job;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::task::TaskKind;
use crate::effects::UiEffect;
use crate::route::{Route, ViewPhase};
use crate::state::AppState;
use crate::update;

#[derive(Debug)]
pub struct BoardView {
    pub phase: ViewPhase,
    /// Fetches still outstanding before the view is `Ready`.
    pub pending_loads: u8,
    pub jobs: Vec<Job>,
    pub applied: Vec<Job>,
    pub selected: usize,
    /// Job id of an in-flight application, if any.
    pub applying: Option<u64>,
    pub notice: Option<String>,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            phase: ViewPhase::Loading,
            pending_loads: 0,
            jobs: Vec::new(),
            applied: Vec::new(),
            selected: 0,
            applying: None,
            notice: None,
        }
    }
}

impl BoardView {
    pub fn has_applied(&self, job_id: u64) -> bool {
        self.applied.iter().any(|j| j.id == job_id)
    }

    fn selected_job(&self) -> Option<&Job> {
        self.jobs.get(self.selected)
    }
}

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => update::navigate(state, Route::Home),
        KeyCode::Char('l') if !matches!(state.board.phase, ViewPhase::Ready) => {
            update::navigate(state, Route::Login)
        }
        KeyCode::Char('r') => update::navigate(state, Route::Board),
        KeyCode::Up | KeyCode::Char('k') => {
            state.board.selected = state.board.selected.saturating_sub(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let last = state.board.jobs.len().saturating_sub(1);
            if state.board.selected < last {
                state.board.selected += 1;
            }
            vec![]
        }
        KeyCode::Enter | KeyCode::Char('a') => apply_to_selected(state),
        _ => vec![],
    }
}

fn apply_to_selected(state: &mut AppState) -> Vec<UiEffect> {
    if !matches!(state.board.phase, ViewPhase::Ready) || state.board.applying.is_some() {
        return vec![];
    }
    let Some(job) = state.board.selected_job() else {
        return vec![];
    };
    let job_id = job.id;
    if state.board.has_applied(job_id) {
        state.board.notice = Some("Already applied to this job.".to_string());
        return vec![];
    }
    state.board.applying = Some(job_id);
    state.board.notice = None;
    let task = update::start_task(state, TaskKind::JobApply);
    vec![UiEffect::Apply { task, job_id }]
}

pub fn render(state: &AppState, frame: &mut Frame, area: Rect) {
    let view = &state.board;
    match &view.phase {
        ViewPhase::Loading => return render_message(frame, area, "Loading...", Color::Yellow),
        ViewPhase::ErrorNoSession | ViewPhase::ErrorExpired => {
            let message = phase_message(&view.phase);
            return render_message(frame, area, &format!("{message}  (l to log in)"), Color::Red);
        }
        ViewPhase::Failed(message) => {
            return render_message(
                frame,
                area,
                &format!("{message}  (r to retry)"),
                Color::Red,
            );
        }
        ViewPhase::Ready => {}
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(6)])
        .split(area);

    let mut lines = Vec::new();
    if view.jobs.is_empty() {
        lines.push(Line::from(Span::styled(
            "No open jobs right now.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, job) in view.jobs.iter().enumerate() {
        let marker = if i == view.selected { "> " } else { "  " };
        let mut spans = vec![
            Span::raw(marker.to_string()),
            Span::styled(
                job.title.clone(),
                if i == view.selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            ),
            Span::styled(
                format!("  ${:.2}/hr · {} · by {}", job.rate, job.level.label(), job.creator),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if view.applying == Some(job.id) {
            spans.push(Span::styled(
                "  applying...",
                Style::default().fg(Color::Yellow),
            ));
        } else if view.has_applied(job.id) {
            spans.push(Span::styled("  applied", Style::default().fg(Color::Green)));
        }
        lines.push(Line::from(spans));
    }
    if let Some(job) = view.selected_job() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            job.description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(notice) = &view.notice {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let jobs_block = Block::default()
        .borders(Borders::ALL)
        .title(" Open jobs (enter apply · r refresh · esc back) ");
    frame.render_widget(Paragraph::new(lines).block(jobs_block), chunks[0]);

    let mut applied_lines = Vec::new();
    if view.applied.is_empty() {
        applied_lines.push(Line::from(Span::styled(
            "No applications yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for job in &view.applied {
        applied_lines.push(Line::from(format!(
            "  {} · ${:.2}/hr · {}",
            job.title,
            job.rate,
            job.level.label()
        )));
    }
    let applied_block = Block::default()
        .borders(Borders::ALL)
        .title(" Your applications ");
    frame.render_widget(Paragraph::new(applied_lines).block(applied_block), chunks[1]);
}

pub(crate) fn phase_message(phase: &ViewPhase) -> String {
    match phase {
        ViewPhase::ErrorNoSession => atlas_core::api::ApiError::Unauthenticated.to_string(),
        ViewPhase::ErrorExpired => atlas_core::api::ApiError::AuthorizationExpired.to_string(),
        ViewPhase::Failed(message) => message.clone(),
        ViewPhase::Loading | ViewPhase::Ready => String::new(),
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let block = Block::default().borders(Borders::ALL).title(" Job board ");
    let text = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color),
    )))
    .block(block);
    frame.render_widget(text, area);
}
