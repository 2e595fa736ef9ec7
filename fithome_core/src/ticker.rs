//! Scheduled ticks with a cancellation handle.
//!
//! A `Ticker` runs a background thread that sends a message every interval.
//! Once [`TickerHandle::cancel`] returns (or the handle is dropped) the
//! thread has exited and no further message will be sent.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct Ticker;

impl Ticker {
    /// Send `message` on `tx` every `interval` until cancelled
    ///
    /// The thread also stops on its own if the receiving side hangs up.
    pub fn spawn<T>(interval: Duration, tx: Sender<T>, message: T) -> TickerHandle
    where
        T: Clone + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if tx.send(message.clone()).is_err() {
                        tracing::debug!("Tick receiver dropped, stopping ticker");
                        break;
                    }
                }
                // Explicit stop or handle dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        tracing::debug!("Ticker started ({:?} interval)", interval);
        TickerHandle {
            stop: Some(stop_tx),
            thread: Some(thread),
        }
    }
}

/// Owning handle for a running ticker
pub struct TickerHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Stop the ticker and wait for its thread to exit
    pub fn cancel(mut self) {
        self.shutdown();
    }

    pub fn is_active(&self) -> bool {
        self.thread.is_some()
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("Ticker thread panicked");
            }
            tracing::debug!("Ticker cancelled");
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
