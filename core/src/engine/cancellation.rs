use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Cooperative cancellation flag.
///
/// Clones share the same flag. Cancelling never interrupts running work: the engine consults the flag at its
/// dispatch checkpoints, and actions may consult it themselves.
#[derive(Clone, Default, Debug)]
pub struct CancellationSignal {
  inner: Arc<Inner>,
}
#[derive(Default, Debug)]
struct Inner {
  cancelled: AtomicBool,
  notify: Notify,
}

impl CancellationSignal {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Sets the flag and wakes everything waiting in [`cancelled`](Self::cancelled). Idempotent.
  pub fn cancel(&self) {
    if !self.inner.cancelled.swap(true, Ordering::AcqRel) {
      self.inner.notify.notify_waiters();
    }
  }

  #[inline]
  pub fn is_cancelled(&self) -> bool {
    self.inner.cancelled.load(Ordering::Acquire)
  }

  /// Completes once the flag is set; immediately if it already is.
  pub async fn cancelled(&self) {
    // Create the notification future before checking the flag, so that a `cancel` in between is not missed.
    let notified = self.inner.notify.notified();
    if self.is_cancelled() {
      return;
    }
    notified.await;
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  #[test]
  fn clones_share_the_flag() {
    let signal = CancellationSignal::new();
    let clone = signal.clone();
    assert!(!clone.is_cancelled());
    signal.cancel();
    signal.cancel();
    assert!(clone.is_cancelled());
  }

  #[tokio::test]
  async fn cancelled_completes_when_already_set() {
    let signal = CancellationSignal::new();
    signal.cancel();
    tokio::time::timeout(Duration::from_secs(1), signal.cancelled()).await.unwrap();
  }

  #[tokio::test]
  async fn cancelled_wakes_waiters() {
    let signal = CancellationSignal::new();
    let waiter = {
      let signal = signal.clone();
      tokio::spawn(async move { signal.cancelled().await })
    };
    tokio::task::yield_now().await;
    signal.cancel();
    tokio::time::timeout(Duration::from_secs(1), waiter).await.unwrap().unwrap();
  }
}
