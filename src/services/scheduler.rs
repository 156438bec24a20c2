//! Debounced render scheduler.
//!
//! A single tokio task owns the current source, the latest parameters and a
//! generation counter. Edits arrive over a command channel; the task waits
//! for a quiet period after the last edit, renders once with whatever is
//! current at that moment, and publishes the result only if nothing changed
//! in the meantime.

use crate::error::EditorError;
use crate::models::Frame;
use crate::services::RenderService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tone_pipeline::{ParameterSet, RenderedImage, SourceImage};

/// What the scheduler is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing queued, nothing running
    Idle,
    /// A change is waiting for the settle delay or for a running render
    Pending,
    /// A render is running and no newer change is queued
    Rendering,
}

/// Outcome of a render that was not superseded
#[derive(Debug, Clone)]
pub enum RenderEvent {
    Rendered(Frame),
    Failed { generation: u64, error: EditorError },
}

#[derive(Debug)]
enum Command {
    Params(ParameterSet),
    Source {
        source: Arc<SourceImage>,
        params: ParameterSet,
    },
    Clear,
    Settled(oneshot::Sender<()>),
    Shutdown,
}

struct RenderOutcome {
    generation: u64,
    params: ParameterSet,
    elapsed: Duration,
    result: Result<RenderedImage, EditorError>,
}

enum Wakeup {
    Command(Option<Command>),
    Completed(RenderOutcome),
    SettleElapsed,
}

/// Spawns the scheduler task
pub struct RecomputeScheduler;

impl RecomputeScheduler {
    /// Start a scheduler on the current tokio runtime.
    pub fn spawn(render: RenderService, settle_delay: Duration) -> SchedulerHandle {
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (done_tx, completions) = mpsc::unbounded_channel();
        let (frame_tx, frame_rx) = watch::channel(None);
        let (state_tx, state_rx) = watch::channel(SchedulerState::Idle);
        let (events, _) = broadcast::channel(16);

        let task = SchedulerTask {
            render,
            settle_delay,
            commands,
            done_tx,
            completions,
            source: None,
            params: ParameterSet::default(),
            generation: 0,
            deadline: None,
            in_flight: false,
            deferred: false,
            waiters: Vec::new(),
            frame_tx,
            state_tx,
            events: events.clone(),
        };

        tracing::debug!(settle_delay_ms = settle_delay.as_millis() as u64, "Scheduler started");
        let join = tokio::spawn(task.run());

        SchedulerHandle {
            commands: commands_tx,
            frame: frame_rx,
            state: state_rx,
            events,
            join: Some(join),
        }
    }
}

/// Caller side of a running scheduler.
///
/// Dropping the handle stops the scheduler once its command channel drains.
pub struct SchedulerHandle {
    commands: mpsc::UnboundedSender<Command>,
    frame: watch::Receiver<Option<Frame>>,
    state: watch::Receiver<SchedulerState>,
    events: broadcast::Sender<RenderEvent>,
    join: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Record new parameters and (re)arm the settle timer.
    pub fn set_params(&self, params: ParameterSet) -> Result<(), EditorError> {
        self.send(Command::Params(params))
    }

    /// Replace the source and render it right away with `params`.
    pub fn set_source(
        &self,
        source: Arc<SourceImage>,
        params: ParameterSet,
    ) -> Result<(), EditorError> {
        self.send(Command::Source { source, params })
    }

    /// Drop the source and the displayed frame.
    pub fn clear(&self) -> Result<(), EditorError> {
        self.send(Command::Clear)
    }

    /// Wait until no change is queued and no render is running.
    pub async fn settled(&self) -> Result<(), EditorError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Settled(tx))?;
        rx.await.map_err(|_| EditorError::SchedulerStopped)
    }

    /// The most recent published frame, if any
    pub fn latest_frame(&self) -> Option<Frame> {
        self.frame.borrow().clone()
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<SchedulerState> {
        self.state.clone()
    }

    /// Subscribe to render results and failures
    pub fn subscribe(&self) -> broadcast::Receiver<RenderEvent> {
        self.events.subscribe()
    }

    /// Stop the scheduler and wait for its task to exit.
    ///
    /// A render still running is not interrupted; its result is discarded.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                tracing::warn!(error = %e, "Scheduler task ended abnormally");
            }
        }
    }

    fn send(&self, command: Command) -> Result<(), EditorError> {
        self.commands
            .send(command)
            .map_err(|_| EditorError::SchedulerStopped)
    }
}

struct SchedulerTask {
    render: RenderService,
    settle_delay: Duration,
    commands: mpsc::UnboundedReceiver<Command>,
    done_tx: mpsc::UnboundedSender<RenderOutcome>,
    completions: mpsc::UnboundedReceiver<RenderOutcome>,

    source: Option<Arc<SourceImage>>,
    params: ParameterSet,
    generation: u64,
    deadline: Option<Instant>,
    in_flight: bool,
    /// Settle timer fired while a render was running
    deferred: bool,
    waiters: Vec<oneshot::Sender<()>>,

    frame_tx: watch::Sender<Option<Frame>>,
    state_tx: watch::Sender<SchedulerState>,
    events: broadcast::Sender<RenderEvent>,
}

impl SchedulerTask {
    async fn run(mut self) {
        loop {
            let deadline = self.deadline;
            let settle = async move {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            let wakeup = tokio::select! {
                command = self.commands.recv() => Wakeup::Command(command),
                Some(outcome) = self.completions.recv() => Wakeup::Completed(outcome),
                _ = settle => Wakeup::SettleElapsed,
            };

            match wakeup {
                Wakeup::Command(None) | Wakeup::Command(Some(Command::Shutdown)) => break,
                Wakeup::Command(Some(command)) => self.handle(command),
                Wakeup::Completed(outcome) => self.complete(outcome),
                Wakeup::SettleElapsed => {
                    self.deadline = None;
                    self.trigger();
                }
            }

            self.publish_state();
        }

        tracing::debug!(generation = self.generation, "Scheduler stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Params(params) => {
                self.generation += 1;
                self.params = params;
                if self.source.is_some() {
                    self.deadline = Some(Instant::now() + self.settle_delay);
                    tracing::trace!(generation = self.generation, "Settle timer armed");
                } else {
                    tracing::debug!(generation = self.generation, "Parameters stored, no image loaded");
                }
            }
            Command::Source { source, params } => {
                self.generation += 1;
                tracing::debug!(
                    generation = self.generation,
                    width = source.width(),
                    height = source.height(),
                    "New source image"
                );
                self.source = Some(source);
                self.params = params;
                self.deadline = None;
                self.trigger();
            }
            Command::Clear => {
                self.generation += 1;
                self.source = None;
                self.deadline = None;
                self.deferred = false;
                self.frame_tx.send_replace(None);
                tracing::debug!(generation = self.generation, "Source cleared");
            }
            Command::Settled(reply) => self.waiters.push(reply),
            Command::Shutdown => {}
        }
    }

    /// Start a render of the current snapshot, or defer it behind the
    /// render already running.
    fn trigger(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        if self.in_flight {
            self.deferred = true;
            tracing::trace!(generation = self.generation, "Render deferred");
            return;
        }

        self.in_flight = true;
        let generation = self.generation;
        let params = self.params;
        let render = self.render.clone();
        let done_tx = self.done_tx.clone();

        tracing::debug!(generation, %params, "Render started");
        tokio::spawn(async move {
            let started = std::time::Instant::now();
            let result = render.render(source, params).await;
            let _ = done_tx.send(RenderOutcome {
                generation,
                params,
                elapsed: started.elapsed(),
                result,
            });
        });
    }

    fn complete(&mut self, outcome: RenderOutcome) {
        self.in_flight = false;
        let elapsed_ms = outcome.elapsed.as_millis() as u64;

        if outcome.generation != self.generation {
            tracing::debug!(
                generation = outcome.generation,
                current = self.generation,
                elapsed_ms,
                "Discarding superseded render"
            );
        } else {
            match outcome.result {
                Ok(image) => {
                    tracing::info!(
                        generation = outcome.generation,
                        width = image.width(),
                        height = image.height(),
                        elapsed_ms,
                        "Render complete"
                    );
                    let frame = Frame::new(outcome.generation, outcome.params, image);
                    self.frame_tx.send_replace(Some(frame.clone()));
                    let _ = self.events.send(RenderEvent::Rendered(frame));
                }
                Err(error) => {
                    tracing::warn!(
                        generation = outcome.generation,
                        %error,
                        "Render failed, keeping last frame"
                    );
                    let _ = self.events.send(RenderEvent::Failed {
                        generation: outcome.generation,
                        error,
                    });
                }
            }
        }

        if std::mem::take(&mut self.deferred) && self.deadline.is_none() {
            self.trigger();
        }
    }

    fn current_state(&self) -> SchedulerState {
        if self.deadline.is_some() || self.deferred {
            SchedulerState::Pending
        } else if self.in_flight {
            SchedulerState::Rendering
        } else {
            SchedulerState::Idle
        }
    }

    fn publish_state(&mut self) {
        let state = self.current_state();
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });

        if state == SchedulerState::Idle {
            for waiter in self.waiters.drain(..) {
                let _ = waiter.send(());
            }
        }
    }
}
