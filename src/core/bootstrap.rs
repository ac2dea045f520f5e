//! # Bootstrap Timing
//!
//! The engine must not touch the page before the host has rendered its
//! initial content. [`start`] polls [`Host::is_ready`] at a fixed interval
//! (bounded), runs the first registry refresh, waits a settle delay for the
//! page's own scripts to finish laying out, and only then applies first focus.

use std::fmt;
use std::time::Duration;

use log::{info, warn};

use crate::core::config::{DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_DELAY_MS};
use crate::core::engine::Engine;
use crate::core::host::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapTiming {
    pub poll_interval: Duration,
    pub max_polls: u32,
    pub settle_delay: Duration,
}

impl Default for BootstrapTiming {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            max_polls: DEFAULT_MAX_POLLS,
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum BootstrapError {
    /// The host never reported ready within `polls` checks.
    HostNotReady { polls: u32 },
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::HostNotReady { polls } => {
                write!(f, "host content not rendered after {polls} checks")
            }
        }
    }
}

impl std::error::Error for BootstrapError {}

/// Polls until the host is ready. The first check happens immediately, and
/// there is always at least one check: `max_polls = 0` means "don't wait".
pub async fn wait_until_ready<H: Host>(
    host: &H,
    timing: &BootstrapTiming,
) -> Result<u32, BootstrapError> {
    let max_polls = timing.max_polls.max(1);
    for poll in 1..=max_polls {
        if host.is_ready() {
            return Ok(poll);
        }
        if poll < max_polls {
            tokio::time::sleep(timing.poll_interval).await;
        }
    }
    warn!("Host not ready after {} polls", max_polls);
    Err(BootstrapError::HostNotReady { polls: max_polls })
}

/// Waits for the host, refreshes the registry, settles, then applies first
/// focus. Returns the element focused, if any.
pub async fn start<H: Host>(
    engine: &mut Engine<H>,
    timing: &BootstrapTiming,
) -> Result<Option<H::Element>, BootstrapError> {
    let polls = wait_until_ready(engine.host(), timing).await?;
    let eligible = engine.on_mutation();
    info!("Host ready after {} poll(s), {} eligible elements", polls, eligible);

    tokio::time::sleep(timing.settle_delay).await;
    Ok(engine.bootstrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::EngineOptions;
    use crate::core::focus::FocusState;
    use crate::core::geometry::Rect;
    use crate::test_support::TestHost;
    use tokio::time::Instant;

    fn timing() -> BootstrapTiming {
        BootstrapTiming {
            poll_interval: Duration::from_millis(500),
            max_polls: 4,
            settle_delay: Duration::from_millis(1500),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_host_returns_on_first_poll() {
        let host = TestHost::new();
        let before = Instant::now();
        assert_eq!(wait_until_ready(&host, &timing()).await, Ok(1));
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_ready_gives_up() {
        let mut host = TestHost::new();
        host.ready = false;
        let before = Instant::now();

        let err = wait_until_ready(&host, &timing()).await.unwrap_err();
        assert_eq!(err, BootstrapError::HostNotReady { polls: 4 });
        // three sleeps between four checks
        assert_eq!(before.elapsed(), Duration::from_millis(1500));
        assert!(err.to_string().contains("4 checks"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_polls_still_checks_once() {
        let no_wait = BootstrapTiming {
            max_polls: 0,
            ..timing()
        };
        let mut host = TestHost::new();
        let before = Instant::now();
        assert_eq!(wait_until_ready(&host, &no_wait).await, Ok(1));

        host.ready = false;
        assert_eq!(
            wait_until_ready(&host, &no_wait).await,
            Err(BootstrapError::HostNotReady { polls: 1 })
        );
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_with_zero_max_polls_focuses_ready_host() {
        let mut host = TestHost::new();
        let only = host.add_tagged("button", Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut engine = Engine::new(host, EngineOptions::default());
        let no_wait = BootstrapTiming {
            max_polls: 0,
            ..timing()
        };

        assert_eq!(start(&mut engine, &no_wait).await, Ok(Some(only)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_waits_settle_delay_then_focuses_first() {
        let mut host = TestHost::new();
        let first = host.add_tagged("button", Rect::new(0.0, 0.0, 100.0, 100.0));
        host.add_tagged("button", Rect::new(200.0, 0.0, 100.0, 100.0));
        let mut engine = Engine::new(host, EngineOptions::default());
        let before = Instant::now();

        let focused = start(&mut engine, &timing()).await.unwrap();

        assert_eq!(focused, Some(first));
        assert_eq!(engine.focus_state(), FocusState::Focused(first));
        assert_eq!(before.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_on_empty_page_stays_unset() {
        let mut engine = Engine::new(TestHost::new(), EngineOptions::default());
        assert_eq!(start(&mut engine, &timing()).await, Ok(None));
        assert_eq!(engine.focus_state(), FocusState::Unset);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_fails_without_focusing() {
        let mut host = TestHost::new();
        host.ready = false;
        host.add_tagged("button", Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut engine = Engine::new(host, EngineOptions::default());

        assert!(start(&mut engine, &timing()).await.is_err());
        assert!(engine.host().focus_calls.is_empty());
    }
}
