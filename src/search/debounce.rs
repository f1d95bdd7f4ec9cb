//! Debounce timer with cancel-then-replace semantics
//!
//! At most one [`PendingQuery`] is outstanding. Scheduling a new one aborts
//! the previous timer task before spawning the next, and every fire carries
//! a [`DebounceToken`] so a message that was already queued when its timer
//! got cancelled can still be recognised as stale.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, sleep_until};

/// Identifies one scheduled fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceToken(u64);

/// A scheduled-but-not-yet-fired timer
#[derive(Debug)]
pub struct PendingQuery {
    token: DebounceToken,
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl PendingQuery {
    /// Token the fire will carry
    #[must_use]
    pub const fn token(&self) -> DebounceToken {
        self.token
    }

    /// When the timer fires
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    fn cancel(self) {
        self.handle.abort();
    }
}

/// Owned debounce timer
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    next_token: u64,
    pending: Option<PendingQuery>,
}

impl Debouncer {
    /// Create a debouncer with a fixed quiet period
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_token: 0,
            pending: None,
        }
    }

    /// Quiet period before a fire
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any outstanding timer and schedule a new one
    ///
    /// When the quiet period elapses, the event built by `event` is sent on
    /// `tx`. Must be called from within a tokio runtime.
    pub fn schedule<E, F>(&mut self, tx: &UnboundedSender<E>, event: F) -> DebounceToken
    where
        E: Send + 'static,
        F: FnOnce(DebounceToken) -> E,
    {
        self.cancel();

        self.next_token += 1;
        let token = DebounceToken(self.next_token);
        // Deadline is fixed here, not at the task's first poll
        let deadline = Instant::now() + self.delay;
        let message = event(token);
        let tx = tx.clone();

        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            // Receiver gone means the owner was torn down
            let _ = tx.send(message);
        });

        self.pending = Some(PendingQuery {
            token,
            deadline,
            handle,
        });
        token
    }

    /// Cancel the outstanding timer, if any
    ///
    /// Returns `true` if a timer was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancel();
                true
            }
            None => false,
        }
    }

    /// Accept a fire if it belongs to the outstanding timer
    ///
    /// Clears the pending slot and returns `true` for the current token;
    /// returns `false` for a superseded or cancelled one.
    pub fn accept(&mut self, token: DebounceToken) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.token == token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Whether a timer is outstanding
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The outstanding timer
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingQuery> {
        self.pending.as_ref()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
