//! Single-slot request orchestration: at most one live content request at a time.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use results_core::ResultPayload;
use results_logging::{results_debug, results_trace};
use tokio_util::sync::CancellationToken;

use crate::fetch::Fetcher;
use crate::fixtures::FixtureSet;
use crate::{FailureKind, FetchError};

pub type RequestId = u64;

/// Completion callbacks for one request. At most one of them runs, and neither runs
/// once the request has been cancelled or superseded.
pub struct RequestCallbacks {
    pub on_success: Box<dyn FnOnce(ResultPayload) + Send>,
    pub on_error: Box<dyn FnOnce(FetchError) + Send>,
}

impl RequestCallbacks {
    pub fn new(
        on_success: impl FnOnce(ResultPayload) + Send + 'static,
        on_error: impl FnOnce(FetchError) + Send + 'static,
    ) -> Self {
        Self {
            on_success: Box::new(on_success),
            on_error: Box::new(on_error),
        }
    }
}

#[derive(Debug)]
struct RequestHandle {
    id: RequestId,
    cancel: CancellationToken,
}

type Slot = Arc<Mutex<Option<RequestHandle>>>;

pub struct RequestOrchestrator {
    fetcher: Arc<dyn Fetcher>,
    current: Slot,
    next_id: RequestId,
    rng: StdRng,
}

impl RequestOrchestrator {
    /// `seed` makes fixture shuffling reproducible; `None` seeds from the OS.
    pub fn new(fetcher: Arc<dyn Fetcher>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            fetcher,
            current: Arc::new(Mutex::new(None)),
            next_id: 0,
            rng,
        }
    }

    /// Cancels any live request, then issues a GET for `url`. Must be called from
    /// inside a tokio runtime.
    pub fn request(
        &mut self,
        url: String,
        callbacks: RequestCallbacks,
        timeout: Duration,
    ) -> RequestId {
        self.cancel();

        self.next_id += 1;
        let id = self.next_id;
        let token = CancellationToken::new();
        *lock(&self.current) = Some(RequestHandle {
            id,
            cancel: token.clone(),
        });

        let fetcher = Arc::clone(&self.fetcher);
        let slot = Arc::clone(&self.current);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    results_trace!("request {} aborted", id);
                    return;
                }
                outcome = tokio::time::timeout(timeout, fetcher.fetch(&url)) => outcome,
            };

            let result = match outcome {
                Ok(Ok(output)) => ResultPayload::from_json_slice(&output.body)
                    .map_err(|err| FetchError::new(FailureKind::Parse, err.to_string())),
                Ok(Err(err)) => Err(err),
                Err(_) => Err(FetchError::timeout(timeout)),
            };

            if !release(&slot, id) {
                results_trace!("request {} superseded before completion", id);
                return;
            }
            match result {
                Ok(payload) => (callbacks.on_success)(payload),
                Err(err) => (callbacks.on_error)(err),
            }
        });

        results_debug!("request {} issued", id);
        id
    }

    /// Synthesizes a payload from fixtures after `delay`. Not cancelable and has no
    /// error path; it does not occupy the request slot.
    pub fn request_fixture(
        &mut self,
        fixtures: Arc<FixtureSet>,
        path: &str,
        on_success: impl FnOnce(ResultPayload) + Send + 'static,
        delay: Duration,
    ) {
        let payload = fixtures.synthesize(path, &mut self.rng);
        results_debug!("fixture response for {:?} in {} ms", path, delay.as_millis());
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_success(payload);
        });
    }

    /// Cancels the live request, if any. Its callbacks will never run.
    pub fn cancel(&mut self) -> bool {
        match lock(&self.current).take() {
            Some(handle) => {
                handle.cancel.cancel();
                results_debug!("request {} cancelled", handle.id);
                true
            }
            None => false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        lock(&self.current).is_some()
    }

    pub fn current_id(&self) -> Option<RequestId> {
        lock(&self.current).as_ref().map(|handle| handle.id)
    }
}

impl Drop for RequestOrchestrator {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Clears the slot if it still holds request `id`. Returns whether the caller owned it.
fn release(slot: &Slot, id: RequestId) -> bool {
    let mut guard = lock(slot);
    match guard.as_ref() {
        Some(handle) if handle.id == id => {
            *guard = None;
            true
        }
        _ => false,
    }
}

fn lock(slot: &Slot) -> std::sync::MutexGuard<'_, Option<RequestHandle>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
