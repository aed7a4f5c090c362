//! The terminal host's event loop.
//!
//! # Design
//! `Driver` owns the `FollowerSession` and is only ever touched from one
//! task, which plays the role of a UI thread. Each trigger ships its request
//! to a blocking worker; the worker sends `(RequestId, outcome)` back over an
//! mpsc channel and the owning task applies it. Nothing is shared, so nothing
//! is locked.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use follower_core::{ApiError, FollowerSession, HttpResponse, RequestId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::transport::Transport;

/// A finished round-trip on its way back to the owning task.
#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub outcome: Result<HttpResponse, ApiError>,
}

pub struct Driver {
    session: FollowerSession,
    transport: Arc<dyn Transport>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl Driver {
    pub fn new(session: FollowerSession, transport: Arc<dyn Transport>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            transport,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn session(&self) -> &FollowerSession {
        &self.session
    }

    pub fn display_text(&self) -> String {
        self.session.display_text()
    }

    /// Requests dispatched but not yet reported back.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start a load and return immediately. Must be called inside a tokio
    /// runtime.
    pub fn trigger(&mut self) -> Option<RequestId> {
        let pending = self.session.trigger()?;
        let id = pending.id;
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();

        tracing::debug!(request = %id, url = %pending.request.url, "dispatching");
        self.in_flight += 1;
        tokio::task::spawn_blocking(move || {
            let outcome = catch_unwind(AssertUnwindSafe(|| transport.execute(&pending.request)))
                .unwrap_or_else(|_| Err(ApiError::Transport("transport panicked".into())));
            // The receiver lives in the driver; if it is gone nobody is
            // waiting for this result.
            let _ = tx.send(Completion { id, outcome });
        });
        Some(id)
    }

    /// Wait for the next worker to report and apply its outcome.
    ///
    /// Returns `None` when nothing is in flight, otherwise whether the
    /// outcome changed the display (`false` for superseded requests).
    pub async fn next_completion(&mut self) -> Option<bool> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(self.session.complete(completion.id, completion.outcome))
    }

    /// Apply every outstanding completion.
    pub async fn drain(&mut self) {
        while self.next_completion().await.is_some() {}
    }
}

/// Read taps from `input` (one per line, `q` quits) and write the display
/// text to `output` every time it changes. On end of input, outstanding
/// requests are awaited before returning.
pub async fn run<R, W>(driver: &mut Driver, input: R, mut output: W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut shown = driver.display_text();
    let mut input_open = true;

    while input_open || driver.in_flight() > 0 {
        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(line) if matches!(line.trim(), "q" | "quit") => break,
                Some(_) => {
                    driver.trigger();
                }
                None => input_open = false,
            },
            Some(_) = driver.next_completion(), if driver.in_flight() > 0 => {}
        }

        let text = driver.display_text();
        if text != shown {
            output.write_all(text.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
            shown = text;
        }
    }

    Ok(())
}
