use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use tracing::{debug, warn};

use super::{DirectionsError, DirectionsProvider, RouteRequest, RouteResolution};

/// Execute a request synchronously on the calling thread.
pub fn fetch_now(provider: &dyn DirectionsProvider, request: RouteRequest) -> RouteResolution {
    let outcome = provider.fetch(request.start, request.end, request.option);
    RouteResolution { request, outcome }
}

/// Runs route fetches on background threads.
///
/// The owning (UI) thread submits requests and polls [`RouteFetchWorker::drain`]
/// once per frame; all simulation state stays on that thread.
pub struct RouteFetchWorker {
    provider: Arc<dyn DirectionsProvider>,
    sender: Sender<RouteResolution>,
    receiver: Receiver<RouteResolution>,
    inflight: usize,
}

impl RouteFetchWorker {
    pub fn new(provider: Arc<dyn DirectionsProvider>) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        Self {
            provider,
            sender,
            receiver,
            inflight: 0,
        }
    }

    pub fn submit(&mut self, request: RouteRequest) {
        self.inflight += 1;
        debug!(generation = request.generation, "route fetch submitted");
        let provider = Arc::clone(&self.provider);
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            // Every submit must produce exactly one resolution, or `wait` blocks.
            let resolution = panic::catch_unwind(AssertUnwindSafe(|| {
                fetch_now(provider.as_ref(), request)
            }))
            .unwrap_or_else(|_| {
                warn!(generation = request.generation, "directions provider panicked");
                RouteResolution {
                    request,
                    outcome: Err(DirectionsError::Unavailable(
                        "directions provider failed".to_string(),
                    )),
                }
            });
            let _ = sender.send(resolution);
        });
    }

    /// Collect every resolution that has arrived since the last call.
    pub fn drain(&mut self) -> Vec<RouteResolution> {
        let mut resolved = Vec::new();
        while let Ok(resolution) = self.receiver.try_recv() {
            self.inflight = self.inflight.saturating_sub(1);
            resolved.push(resolution);
        }
        resolved
    }

    /// Block until the next resolution arrives (headless runs).
    pub fn wait(&mut self) -> Option<RouteResolution> {
        if self.inflight == 0 {
            return None;
        }
        let resolution = self.receiver.recv().ok()?;
        self.inflight = self.inflight.saturating_sub(1);
        Some(resolution)
    }

    pub fn inflight(&self) -> usize {
        self.inflight
    }
}
