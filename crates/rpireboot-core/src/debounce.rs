//! Trailing-window debounce and the filter loop that fires the reboot action.
//!
//! The policy is purely time based: the first interrupt is always accepted,
//! and every later one is accepted only if strictly more than the window has
//! passed since the last *accepted* interrupt. The level carried by the
//! interrupt is logged but never consulted.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::interrupt::Interrupt;
use crate::reboot::RebootAction;

/// Outcome of evaluating one interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Genuine edge. `elapsed` is the gap to the previous accepted interrupt,
    /// `None` for the first one.
    Accepted { elapsed: Option<Duration> },
    /// Bounce inside the window; state was left untouched.
    Rejected { elapsed: Duration },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Last accepted interrupt, private to the filter.
#[derive(Debug, Default)]
pub struct DebounceState {
    last_accepted: Option<Interrupt>,
}

impl DebounceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_accepted(&self) -> Option<&Interrupt> {
        self.last_accepted.as_ref()
    }

    /// Decide whether `interrupt` is genuine and record it if so.
    ///
    /// Rejected interrupts never modify the state.
    pub fn evaluate(&mut self, interrupt: Interrupt, window: Duration) -> Verdict {
        let elapsed = match &self.last_accepted {
            None => None,
            Some(last) => {
                let elapsed = interrupt.since(last);
                if elapsed <= window {
                    return Verdict::Rejected { elapsed };
                }
                Some(elapsed)
            }
        };
        self.last_accepted = Some(interrupt);
        Verdict::Accepted { elapsed }
    }
}

/// Counters reported when the interrupt stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenOutcome {
    pub accepted: u64,
    pub rejected: u64,
}

/// Consumer half of the pipeline.
pub struct DebounceFilter<A> {
    window: Duration,
    state: DebounceState,
    reboot: A,
    outcome: ListenOutcome,
}

impl<A: RebootAction> DebounceFilter<A> {
    pub fn new(window: Duration, reboot: A) -> Self {
        Self {
            window,
            state: DebounceState::new(),
            reboot,
            outcome: ListenOutcome::default(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    pub fn reboot_action(&self) -> &A {
        &self.reboot
    }

    /// Evaluate one interrupt and fire the reboot action if it is accepted.
    ///
    /// A failed reboot is logged and otherwise ignored; the filter keeps
    /// listening.
    pub fn handle(&mut self, interrupt: Interrupt) -> Verdict {
        let level = interrupt.level();
        let verdict = self.state.evaluate(interrupt, self.window);

        match verdict {
            Verdict::Rejected { elapsed } => {
                self.outcome.rejected += 1;
                debug!(
                    %level,
                    elapsed_us = elapsed.as_micros() as u64,
                    window_us = self.window.as_micros() as u64,
                    "Rejected bounce"
                );
            }
            Verdict::Accepted { elapsed } => {
                self.outcome.accepted += 1;
                info!(
                    %level,
                    elapsed_ms = elapsed.map(|e| e.as_millis() as u64),
                    "Accepted interrupt, rebooting"
                );
                if let Err(e) = self.reboot.reboot() {
                    error!(error = %e, "Reboot action failed, still listening");
                }
            }
        }

        verdict
    }

    /// Receive interrupts in order until the sender goes away.
    ///
    /// The receive is the only suspension point. Returns the accept/reject
    /// counters once the channel is closed and drained.
    pub async fn listen(&mut self, mut rx: mpsc::Receiver<Interrupt>) -> ListenOutcome {
        while let Some(interrupt) = rx.recv().await {
            debug!(level = %interrupt.level(), "Received interrupt");
            self.handle(interrupt);
        }

        warn!(
            accepted = self.outcome.accepted,
            rejected = self.outcome.rejected,
            "Interrupt stream closed"
        );
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RebootError;
    use crate::interrupt::Level;
    use std::time::Instant;

    const WINDOW: Duration = Duration::from_millis(5);

    fn at(t0: Instant, ms: u64) -> Interrupt {
        Interrupt::new(Level::Low, t0 + Duration::from_millis(ms))
    }

    #[derive(Default)]
    struct CountingReboot {
        calls: usize,
        fail: bool,
    }

    impl RebootAction for CountingReboot {
        fn reboot(&mut self) -> Result<(), RebootError> {
            self.calls += 1;
            if self.fail {
                return Err(RebootError::Restart(std::io::Error::from_raw_os_error(1)));
            }
            Ok(())
        }
    }

    #[test]
    fn test_first_event_always_accepted() {
        let mut state = DebounceState::new();
        let verdict = state.evaluate(at(Instant::now(), 0), Duration::from_secs(3600));

        assert_eq!(verdict, Verdict::Accepted { elapsed: None });
        assert!(state.last_accepted().is_some());
    }

    #[test]
    fn test_window_boundary_is_strict() {
        let t0 = Instant::now();
        let mut state = DebounceState::new();
        state.evaluate(at(t0, 0), WINDOW);

        let on_boundary = state.evaluate(at(t0, 5), WINDOW);
        assert_eq!(on_boundary, Verdict::Rejected { elapsed: WINDOW });

        let just_past = Interrupt::new(Level::Low, t0 + WINDOW + Duration::from_nanos(1));
        let verdict = state.evaluate(just_past.clone(), WINDOW);
        assert!(verdict.is_accepted());
        assert_eq!(state.last_accepted(), Some(&just_past));
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let t0 = Instant::now();
        let mut state = DebounceState::new();
        let first = at(t0, 0);
        state.evaluate(first.clone(), WINDOW);

        for ms in [1, 2, 4, 5] {
            assert!(!state.evaluate(at(t0, ms), WINDOW).is_accepted());
            assert_eq!(state.last_accepted(), Some(&first));
        }
    }

    #[test]
    fn test_window_measured_from_last_accepted() {
        let t0 = Instant::now();
        let mut state = DebounceState::new();

        assert!(state.evaluate(at(t0, 0), WINDOW).is_accepted());
        assert!(!state.evaluate(at(t0, 4), WINDOW).is_accepted());
        assert!(state.evaluate(at(t0, 8), WINDOW).is_accepted());
        // 12ms is outside the window of 0 but inside the window of 8
        assert!(!state.evaluate(at(t0, 12), WINDOW).is_accepted());
        assert!(state.evaluate(at(t0, 14), WINDOW).is_accepted());
        assert_eq!(state.last_accepted(), Some(&at(t0, 14)));
    }

    #[test]
    fn test_level_is_ignored() {
        let t0 = Instant::now();
        let mut state = DebounceState::new();
        state.evaluate(Interrupt::new(Level::Low, t0), WINDOW);

        let opposite = Interrupt::new(Level::High, t0 + Duration::from_millis(1));
        assert!(!state.evaluate(opposite, WINDOW).is_accepted());
    }

    #[test]
    fn test_handle_fires_reboot_only_on_accept() {
        let t0 = Instant::now();
        let mut filter = DebounceFilter::new(WINDOW, CountingReboot::default());

        filter.handle(at(t0, 0));
        filter.handle(at(t0, 3));
        filter.handle(at(t0, 9));

        assert_eq!(filter.reboot_action().calls, 2);
        assert_eq!(filter.state().last_accepted(), Some(&at(t0, 9)));
    }

    #[test]
    fn test_failed_reboot_still_updates_state() {
        let t0 = Instant::now();
        let mut filter = DebounceFilter::new(
            WINDOW,
            CountingReboot {
                calls: 0,
                fail: true,
            },
        );

        assert!(filter.handle(at(t0, 0)).is_accepted());
        assert!(!filter.handle(at(t0, 2)).is_accepted());
        assert!(filter.handle(at(t0, 20)).is_accepted());
        assert_eq!(filter.reboot_action().calls, 2);
    }

    #[tokio::test]
    async fn test_listen_ends_when_sender_dropped() {
        let t0 = Instant::now();
        let (tx, rx) = mpsc::channel(4);
        tx.send(at(t0, 0)).await.unwrap();
        tx.send(at(t0, 1)).await.unwrap();
        drop(tx);

        let mut filter = DebounceFilter::new(WINDOW, CountingReboot::default());
        let outcome = filter.listen(rx).await;

        assert_eq!(
            outcome,
            ListenOutcome {
                accepted: 1,
                rejected: 1
            }
        );
        assert_eq!(filter.reboot_action().calls, 1);
    }
}
