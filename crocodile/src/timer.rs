//! Cancellable background task tied to one engine generation.

use std::future::Future;

use tokio::task::JoinHandle;

/// Handle to the expiry task spawned after a correct guess.
///
/// Aborting stops a timer that has not fired yet; the task itself re-checks the
/// generation under the engine lock before every effect, so a timer that already woke up
/// cannot touch a newer game.
#[derive(Debug)]
pub(crate) struct ExpiryTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

impl ExpiryTimer {
    pub(crate) fn spawn<F>(generation: u64, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            generation,
            handle: tokio::spawn(task),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn cancel(self) {
        self.handle.abort();
    }
}
