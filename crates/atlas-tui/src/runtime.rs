//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox pattern
//!
//! Spawned request tasks send their completion `UiEvent` to `inbox_tx`;
//! the loop drains `inbox_rx` each frame. This eliminates per-operation
//! receivers and keeps event collection in one place.

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use atlas_core::api::ApiClient;
use atlas_core::auth;
use atlas_core::session::SessionStore;
use crossterm::event::{self, Event};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::warn;

use crate::common::task::TaskId;
use crate::effects::UiEffect;
use crate::events::{TaskDone, TaskPayload, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame interval while a request is in flight (spinner animation).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Poll interval when idle. Longer timeout reduces CPU usage when
/// nothing is happening.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on exit and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: Arc<ApiClient>,
    store: SessionStore,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Sets up the terminal and seeds state from the session store.
    pub fn new(client: ApiClient, store: SessionStore) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let identity = store.get().map(|session| session.identity);
        let state = AppState::new(identity);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client: Arc::new(client),
            store,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// Must be called from within a tokio runtime; request effects are
    /// executed on spawned tasks.
    pub fn run(&mut self) -> Result<()> {
        let result = self.event_loop();
        let restore = terminal::restore_terminal();
        result.and(restore)
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                dirty = true;
                let effects = update::update(&mut self.state, event);
                for effect in effects {
                    self.execute_effect(effect);
                }
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, emitting a Tick
    /// when the interval has elapsed.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.is_busy() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Block until the next tick is due unless events are already
        // waiting; terminal input wakes the poll early.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            read_terminal_event(&mut events)?;
            while event::poll(Duration::ZERO)? {
                read_terminal_event(&mut events)?;
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Login { task, request } => {
                self.spawn_task(task, move |client, store| async move {
                    TaskPayload::LoginDone(auth::login(&client, &store, &request).await)
                });
            }
            UiEffect::Signup { task, request } => {
                self.spawn_task(task, move |client, _| async move {
                    TaskPayload::SignupDone(auth::signup(&client, &request).await)
                });
            }
            UiEffect::Logout { task } => {
                self.spawn_task(task, move |client, store| async move {
                    TaskPayload::LogoutDone(auth::logout(&client, &store).await)
                });
            }
            UiEffect::FetchOpenJobs { task } => {
                self.spawn_task(task, move |client, _| async move {
                    TaskPayload::OpenJobs(client.open_jobs().await)
                });
            }
            UiEffect::FetchAppliedJobs { task } => {
                self.spawn_task(task, move |client, _| async move {
                    TaskPayload::AppliedJobs(client.applied_jobs().await)
                });
            }
            UiEffect::FetchCreatedJobs { task } => {
                self.spawn_task(task, move |client, _| async move {
                    TaskPayload::CreatedJobs(client.created_jobs().await)
                });
            }
            UiEffect::CreateJob { task, draft } => {
                self.spawn_task(task, move |client, _| async move {
                    TaskPayload::JobCreated(client.create_job(&draft).await)
                });
            }
            UiEffect::Apply { task, job_id } => {
                self.spawn_task(task, move |client, _| async move {
                    TaskPayload::Applied {
                        job_id,
                        result: client.apply(job_id).await,
                    }
                });
            }
            UiEffect::ClearSession => {
                if let Err(err) = self.store.clear() {
                    warn!(error = %err, "failed to clear session store");
                }
            }
        }
    }

    /// Spawns a request task and routes its completion into the inbox.
    fn spawn_task<F, Fut>(&self, id: TaskId, f: F)
    where
        F: FnOnce(Arc<ApiClient>, SessionStore) -> Fut + Send + 'static,
        Fut: Future<Output = TaskPayload> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let store = self.store.clone();
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let payload = f(client, store).await;
            let _ = tx.send(UiEvent::Task(TaskDone { id, payload }));
        });
    }
}

fn read_terminal_event(events: &mut Vec<UiEvent>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        events.push(UiEvent::Key(key));
    }
    Ok(())
}
