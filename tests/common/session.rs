//! Test session harness.

use super::fixtures::{SETTLE, WAIT};
use greyroom::services::{
    EditSession, InMemoryPresetStore, PresetStore, RenderEvent, RenderService, Renderer,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// An [`EditSession`] over an inspectable renderer, with its event stream
/// subscribed from the start.
pub struct TestSession<R: Renderer + 'static> {
    pub session: EditSession,
    pub renderer: Arc<R>,
    pub events: broadcast::Receiver<RenderEvent>,
}

impl<R: Renderer + 'static> TestSession<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_store(renderer, Arc::new(InMemoryPresetStore::new()), SETTLE)
    }

    pub fn with_delay(renderer: R, settle_delay: Duration) -> Self {
        Self::with_store(renderer, Arc::new(InMemoryPresetStore::new()), settle_delay)
    }

    pub fn with_store(renderer: R, store: Arc<dyn PresetStore>, settle_delay: Duration) -> Self {
        let renderer = Arc::new(renderer);
        let service = RenderService::new(renderer.clone());
        let session = EditSession::new(service, store, settle_delay);
        let events = session.subscribe();
        Self {
            session,
            renderer,
            events,
        }
    }

    /// Wait until the scheduler is idle
    pub async fn settle(&self) {
        tokio::time::timeout(WAIT, self.session.settled())
            .await
            .expect("session did not settle in time")
            .expect("scheduler stopped");
    }

    /// Next render event, failing the test if none arrives
    pub async fn next_event(&mut self) -> RenderEvent {
        tokio::time::timeout(WAIT, self.events.recv())
            .await
            .expect("no render event in time")
            .expect("event stream closed")
    }

    /// Every event delivered so far, without waiting
    pub fn drain_events(&mut self) -> Vec<RenderEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}
