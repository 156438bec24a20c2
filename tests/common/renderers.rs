//! Instrumented render backends for scheduler tests.

use greyroom::services::Renderer;
use std::sync::{Condvar, Mutex};
use tokio::sync::mpsc;
use tone_pipeline::{
    AdjustmentPipeline, ParameterSet, PipelineError, RenderedImage, SourceImage,
};

/// Real pipeline that records every call
#[derive(Default)]
pub struct CountingRenderer {
    calls: Mutex<Vec<ParameterSet>>,
}

impl CountingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<ParameterSet> {
        self.calls.lock().unwrap().clone()
    }
}

impl Renderer for CountingRenderer {
    fn render(
        &self,
        source: &SourceImage,
        params: &ParameterSet,
    ) -> Result<RenderedImage, PipelineError> {
        self.calls.lock().unwrap().push(*params);
        AdjustmentPipeline::new().render(source, params)
    }
}

/// Real pipeline whose renders block until the gate is opened.
///
/// Every render reports its parameters on the `started` channel before it
/// blocks, so a test can tell exactly when a render is in flight.
pub struct GatedRenderer {
    open: Mutex<bool>,
    opened: Condvar,
    started: mpsc::UnboundedSender<ParameterSet>,
    calls: Mutex<Vec<ParameterSet>>,
}

impl GatedRenderer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ParameterSet>) {
        let (started, rx) = mpsc::unbounded_channel();
        let renderer = Self {
            open: Mutex::new(false),
            opened: Condvar::new(),
            started,
            calls: Mutex::new(Vec::new()),
        };
        (renderer, rx)
    }

    /// Let every blocked and future render through.
    pub fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.opened.notify_all();
    }

    pub fn calls(&self) -> Vec<ParameterSet> {
        self.calls.lock().unwrap().clone()
    }
}

impl Renderer for GatedRenderer {
    fn render(
        &self,
        source: &SourceImage,
        params: &ParameterSet,
    ) -> Result<RenderedImage, PipelineError> {
        self.calls.lock().unwrap().push(*params);
        let _ = self.started.send(*params);

        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.opened.wait(open).unwrap();
        }
        drop(open);

        AdjustmentPipeline::new().render(source, params)
    }
}

/// Real pipeline that fails whenever brightness is above a threshold
pub struct FailingRenderer {
    pub threshold: f32,
}

impl FailingRenderer {
    pub fn above(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Renderer for FailingRenderer {
    fn render(
        &self,
        source: &SourceImage,
        params: &ParameterSet,
    ) -> Result<RenderedImage, PipelineError> {
        if params.brightness() > self.threshold {
            return Err(PipelineError::RenderFailed(format!(
                "brightness {} rejected",
                params.brightness()
            )));
        }
        AdjustmentPipeline::new().render(source, params)
    }
}
