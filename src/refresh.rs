//! Auto-refresh scheduling
//!
//! After a render completes with auto-refresh enabled, a timer task waits out
//! the interval and enqueues exactly one [`Action::RefreshTick`]. The wait can
//! be cancelled at any point, in which case no tick is delivered.
//!
//! Each wait has its own generation. A tick already queued when its wait was
//! cancelled carries an old generation and is rejected by [`RefreshLoop::on_tick`].

use crate::model::RefreshInterval;
use crate::ui::Action;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Waiting {
        generation: u64,
        started_at: Instant,
        interval: Duration,
    },
}

#[derive(Debug)]
pub struct RefreshLoop {
    phase: RefreshPhase,
    cancel_token: Option<CancellationToken>,
    action_sender: mpsc::Sender<Action>,
    /// Generation of the most recently armed wait.
    generation: u64,
}

impl RefreshLoop {
    pub fn new(action_sender: mpsc::Sender<Action>) -> Self {
        Self {
            phase: RefreshPhase::Idle,
            cancel_token: None,
            action_sender,
            generation: 0,
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.phase, RefreshPhase::Waiting { .. })
    }

    /// Starts waiting for `interval`. Does nothing if a wait is already pending.
    pub fn arm(&mut self, interval: RefreshInterval) {
        if self.is_waiting() {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let duration = interval.as_duration();
        let token = CancellationToken::new();
        let child = token.clone();
        let sender = self.action_sender.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = sleep(duration) => {
                    let _ = sender.send(Action::RefreshTick(generation)).await;
                }
            }
        });

        self.cancel_token = Some(token);
        self.phase = RefreshPhase::Waiting {
            generation,
            started_at: Instant::now(),
            interval: duration,
        };
    }

    /// Abandons a pending wait; its tick will never be delivered.
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.phase = RefreshPhase::Idle;
    }

    /// Consumes the pending wait if `generation` is its tick.
    ///
    /// Returns false for ticks of cancelled or finished waits, which must be
    /// ignored.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        match self.phase {
            RefreshPhase::Waiting {
                generation: current,
                ..
            } if current == generation => {
                self.cancel_token = None;
                self.phase = RefreshPhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Time left before the next tick, with the total wait, while waiting.
    pub fn remaining(&self) -> Option<(Duration, Duration)> {
        match &self.phase {
            RefreshPhase::Idle => None,
            RefreshPhase::Waiting {
                started_at,
                interval,
                ..
            } => Some((interval.saturating_sub(started_at.elapsed()), *interval)),
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tick_arrives_after_full_interval() {
        let (sender, mut receiver) = mpsc::channel(4);
        let mut refresh = RefreshLoop::new(sender);

        let start = Instant::now();
        refresh.arm(RefreshInterval::new(5));
        assert!(refresh.is_waiting());

        let action = receiver.recv().await.unwrap();
        assert_eq!(action, Action::RefreshTick(1));
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(300));
        assert!(waited < Duration::from_secs(301));

        assert!(refresh.on_tick(1));
        assert_eq!(refresh.phase, RefreshPhase::Idle);
        assert!(!refresh.on_tick(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_interval() {
        let (sender, mut receiver) = mpsc::channel(4);
        let mut refresh = RefreshLoop::new(sender);
        refresh.arm(RefreshInterval::new(1));

        tokio::time::advance(Duration::from_secs(59)).await;
        tokio::task::yield_now().await;
        assert!(receiver.try_recv().is_err());

        let (remaining, total) = refresh.remaining().unwrap();
        assert_eq!(total, Duration::from_secs(60));
        assert_eq!(remaining, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_tick() {
        let (sender, mut receiver) = mpsc::channel(4);
        let mut refresh = RefreshLoop::new(sender);
        refresh.arm(RefreshInterval::new(1));
        refresh.cancel();
        assert!(!refresh.is_waiting());

        tokio::time::advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_while_waiting_keeps_single_timer() {
        let (sender, mut receiver) = mpsc::channel(4);
        let mut refresh = RefreshLoop::new(sender);
        refresh.arm(RefreshInterval::new(1));
        refresh.arm(RefreshInterval::new(1));

        assert_eq!(receiver.recv().await, Some(Action::RefreshTick(1)));
        tokio::time::advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_tick_of_cancelled_wait_is_rejected() {
        let (sender, mut receiver) = mpsc::channel(4);
        let mut refresh = RefreshLoop::new(sender);
        refresh.arm(RefreshInterval::new(1));

        // The timer fires before the cancel reaches it
        tokio::time::advance(Duration::from_secs(61)).await;
        tokio::task::yield_now().await;
        refresh.cancel();
        refresh.arm(RefreshInterval::new(2));

        assert_eq!(receiver.try_recv().unwrap(), Action::RefreshTick(1));
        assert!(!refresh.on_tick(1));
        assert!(refresh.is_waiting());

        assert_eq!(receiver.recv().await, Some(Action::RefreshTick(2)));
        assert!(refresh.on_tick(2));
    }
}
