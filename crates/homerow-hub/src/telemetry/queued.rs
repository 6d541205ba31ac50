//! Non-blocking sink: hands events to a background task over a bounded queue.
//!
//! Hooks run on the UI thread, so `record` only ever does a `try_send`.
//! When the queue is full the event is dropped with a warning. There is no
//! retry. `flush` and `Drop` drain whatever is still queued into the inner
//! sink synchronously, so nothing is left behind when the runtime stops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::warn;

use homerow_core::telemetry::{TelemetryEvent, TelemetrySink};

/// State shared between the sink and its drain task.
struct Shared {
    rx: Mutex<mpsc::Receiver<TelemetryEvent>>,
    inner: Arc<dyn TelemetrySink>,
    wake: Notify,
    closed: AtomicBool,
}

impl Shared {
    /// Move every queued event into the inner sink, oldest first.
    fn drain(&self) -> usize {
        let Ok(mut rx) = self.rx.lock() else {
            warn!("Telemetry queue lock poisoned, events lost");
            return 0;
        };
        let mut moved = 0;
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    self.inner.record(event);
                    moved += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return moved,
            }
        }
    }
}

/// Sink that forwards events to `inner` from a spawned task.
pub struct QueuedTelemetry {
    tx: mpsc::Sender<TelemetryEvent>,
    shared: Arc<Shared>,
}

impl QueuedTelemetry {
    /// Spawn the drain task on the current tokio runtime.
    ///
    /// The task exits once the returned sink is dropped.
    pub fn spawn(inner: Arc<dyn TelemetrySink>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel::<TelemetryEvent>(capacity.max(1));
        let shared = Arc::new(Shared {
            rx: Mutex::new(rx),
            inner,
            wake: Notify::new(),
            closed: AtomicBool::new(false),
        });

        let task = Arc::clone(&shared);
        let handle = tokio::spawn(async move {
            loop {
                task.wake.notified().await;
                if task.closed.load(Ordering::Acquire) {
                    break;
                }
                task.drain();
            }
            tracing::debug!(sink = task.inner.name(), "Telemetry queue drained");
        });
        (Self { tx, shared }, handle)
    }

    /// Free slots left in the queue.
    pub fn remaining_capacity(&self) -> usize {
        self.tx.capacity()
    }
}

impl TelemetrySink for QueuedTelemetry {
    fn record(&self, event: TelemetryEvent) {
        match self.tx.try_send(event) {
            Ok(()) => self.shared.wake.notify_one(),
            Err(TrySendError::Full(event)) => {
                warn!(event = event.name(), "Telemetry queue full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                warn!(event = event.name(), "Telemetry queue closed, dropping event");
            }
        }
    }

    /// Drain the queue into the inner sink on the calling thread, then flush it.
    fn flush(&self) {
        let moved = self.shared.drain();
        tracing::debug!(moved, "Telemetry queue flushed");
        self.shared.inner.flush();
    }

    fn name(&self) -> &str {
        "queued"
    }
}

impl Drop for QueuedTelemetry {
    fn drop(&mut self) {
        self.flush();
        self.shared.closed.store(true, Ordering::Release);
        self.shared.wake.notify_one();
    }
}
