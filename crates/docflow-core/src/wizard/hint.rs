//! Auto-hide timer for the step hint.
//!
//! The hint stays visible while the active step is invalid. Once the step
//! becomes valid, a hide is scheduled after a short delay. The schedule is a
//! tokio task guarded by a `CancellationToken` and stamped with the step id
//! and a generation counter:
//! - scheduling always cancels the previous task first, so at most one
//!   timer exists at a time;
//! - an expiry is only accepted if it matches the pending step and
//!   generation, so a late message can never hide another step's hint.
//!
//! Expiries are delivered over a channel and applied by the owner on its
//! own turn, keeping all hint state single-owner.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use docflow_types::wizard::StepId;

/// Message sent when a scheduled hide fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintExpired {
    pub step: StepId,
    pub generation: u64,
}

#[derive(Debug)]
struct PendingHide {
    step: StepId,
    generation: u64,
    cancel: CancellationToken,
}

/// Single-slot cancellable scheduler for hint hides.
#[derive(Debug)]
pub struct HintTimer {
    delay: Duration,
    generation: u64,
    pending: Option<PendingHide>,
    tx: mpsc::UnboundedSender<HintExpired>,
    rx: mpsc::UnboundedReceiver<HintExpired>,
}

impl HintTimer {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a hide for `step`, replacing any pending one.
    ///
    /// Returns `false` when no tokio runtime is available; the hint then
    /// simply stays visible until the step changes.
    pub fn schedule(&mut self, step: StepId) -> bool {
        self.cancel();

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(%step, "no async runtime, hint auto-hide disabled");
            return false;
        };

        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let tx = self.tx.clone();
        let delay = self.delay;

        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(HintExpired { step, generation });
                }
            }
        });

        tracing::trace!(%step, generation, "hint hide scheduled");
        self.pending = Some(PendingHide {
            step,
            generation,
            cancel,
        });
        true
    }

    /// Cancel the pending hide, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
            tracing::trace!(step = %pending.step, generation = pending.generation, "hint hide cancelled");
        }
    }

    pub fn is_pending_for(&self, step: StepId) -> bool {
        self.pending.as_ref().is_some_and(|p| p.step == step)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume an expiry. True iff it belongs to the pending schedule.
    pub fn accept(&mut self, expired: HintExpired) -> bool {
        match &self.pending {
            Some(p) if p.step == expired.step && p.generation == expired.generation => {
                self.pending = None;
                true
            }
            _ => {
                tracing::debug!(
                    step = %expired.step,
                    generation = expired.generation,
                    "ignoring stale hint expiry"
                );
                false
            }
        }
    }

    /// Next delivered expiry without waiting.
    pub fn try_next(&mut self) -> Option<HintExpired> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next delivered expiry.
    pub async fn next(&mut self) -> Option<HintExpired> {
        self.rx.recv().await
    }
}

impl Drop for HintTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_without_runtime_is_noop() {
        let mut timer = HintTimer::new(Duration::from_secs(2));
        assert!(!timer.schedule(StepId::Basics));
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_delivered_after_delay() {
        let mut timer = HintTimer::new(Duration::from_secs(2));
        assert!(timer.schedule(StepId::Basics));
        assert!(timer.is_pending_for(StepId::Basics));

        let expired = timer.next().await.expect("expiry");
        assert_eq!(expired.step, StepId::Basics);
        assert!(timer.accept(expired));
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_never_fires() {
        let mut timer = HintTimer::new(Duration::from_secs(2));
        timer.schedule(StepId::Basics);
        timer.cancel();

        let waited = tokio::time::timeout(Duration::from_secs(10), timer.next()).await;
        assert!(waited.is_err(), "cancelled timer must not deliver");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_replaces_previous_timer() {
        let mut timer = HintTimer::new(Duration::from_secs(2));
        timer.schedule(StepId::Basics);
        tokio::time::sleep(Duration::from_secs(1)).await;
        timer.schedule(StepId::TriggerConfig);

        let expired = timer.next().await.expect("expiry");
        assert_eq!(expired.step, StepId::TriggerConfig);
        assert!(timer.accept(expired));

        // Nothing else arrives: the first timer was cancelled
        let waited = tokio::time::timeout(Duration::from_secs(10), timer.next()).await;
        assert!(waited.is_err());
    }

    #[test]
    fn test_stale_expiry_rejected() {
        let mut timer = HintTimer::new(Duration::from_secs(2));
        assert!(!timer.accept(HintExpired {
            step: StepId::Basics,
            generation: 1,
        }));
    }
}
