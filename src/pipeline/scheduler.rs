//! Debounced render scheduling.
//!
//! The scheduler sits between an interactive host and the pipeline:
//! settings submissions are debounced over a quiet window, each run
//! executes on the blocking thread pool, and a newer submission
//! cancels the in-flight run at its next stage boundary. Only the
//! newest completed artwork is published.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use super::cancel::CancelToken;
use super::orchestrator::{Artwork, ArtworkPipeline, RunOutcome};
use crate::settings::Settings;

/// Quiet window before a submission becomes a run.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Handle to the scheduling task.
///
/// Dropping the handle closes the submission channel; the worker
/// finishes (or cancels) its current run and exits.
pub struct RenderScheduler {
    pipeline: Arc<Mutex<ArtworkPipeline>>,
    submissions: mpsc::UnboundedSender<Settings>,
    results: watch::Receiver<Option<Arc<Artwork>>>,
}

impl RenderScheduler {
    /// Spawn the scheduler onto the current tokio runtime.
    pub fn spawn(pipeline: ArtworkPipeline) -> Self {
        let pipeline = Arc::new(Mutex::new(pipeline));
        let (submissions, rx) = mpsc::unbounded_channel();
        let (publish, results) = watch::channel(None);

        tokio::spawn(worker(pipeline.clone(), rx, publish));

        Self {
            pipeline,
            submissions,
            results,
        }
    }

    /// Queue a settings change. Rapid submissions coalesce; the last
    /// one wins.
    pub fn submit(&self, settings: Settings) {
        // Send fails only when the worker is gone, which means the
        // runtime is shutting down; nothing useful to do then.
        let _ = self.submissions.send(settings);
    }

    /// Watch the newest completed artwork.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Artwork>>> {
        self.results.clone()
    }

    /// Access the shared pipeline, e.g. to load a new image.
    ///
    /// Loading an image does not trigger a render by itself; submit
    /// settings afterwards.
    pub fn pipeline(&self) -> Arc<Mutex<ArtworkPipeline>> {
        self.pipeline.clone()
    }
}

async fn worker(
    pipeline: Arc<Mutex<ArtworkPipeline>>,
    mut rx: mpsc::UnboundedReceiver<Settings>,
    publish: watch::Sender<Option<Arc<Artwork>>>,
) {
    let mut next = rx.recv().await;

    while let Some(mut settings) = next.take() {
        // Debounce: absorb newer submissions until the quiet window
        // passes (the teacher pattern: collect, then flush).
        let mut closed = false;
        loop {
            match tokio::time::timeout(DEBOUNCE, rx.recv()).await {
                Ok(Some(newer)) => settings = newer,
                Ok(None) => {
                    closed = true;
                    break;
                }
                Err(_) => break,
            }
        }

        let token = CancelToken::new();
        let run_pipeline = pipeline.clone();
        let run_settings = settings.clone();
        let run_token = token.clone();
        let mut run = tokio::task::spawn_blocking(move || {
            let mut guard = run_pipeline.lock().expect("pipeline lock poisoned");
            guard.render(&run_settings, &run_token)
        });

        // Wait for the run while listening for newer submissions; a
        // newer one cancels the in-flight run at its next boundary.
        let outcome = loop {
            tokio::select! {
                result = &mut run => break result,
                newer = rx.recv(), if !closed => match newer {
                    Some(newer_settings) => {
                        token.cancel();
                        next = Some(newer_settings);
                    }
                    None => closed = true,
                },
            }
        };

        match outcome {
            Ok(Ok(RunOutcome::Complete(artwork))) => {
                tracing::debug!(bytes = artwork.svg.len(), "artwork published");
                let _ = publish.send(Some(artwork));
            }
            Ok(Ok(RunOutcome::Cancelled)) => {
                tracing::debug!("superseded run discarded");
            }
            Ok(Err(error)) => {
                tracing::warn!(%error, "pipeline run failed");
            }
            Err(join_error) => {
                tracing::warn!(%join_error, "render task panicked");
            }
        }

        if next.is_none() {
            if closed {
                break;
            }
            next = rx.recv().await;
        }
    }
}
