use std::future::Future;
use std::net::Ipv4Addr;

use tracing::{debug, instrument};

use crate::adapters::tcp_client;
use crate::domain::config::Config;
use crate::domain::probe::{ProbeResult, SessionOutcome, SessionStats};
use crate::error::TcppingError;

/// Receives probe outcomes as soon as each probe finishes.
///
/// A callback runs before the next probe starts, so whatever it writes is
/// ordered with the probes. An error returned here aborts the session.
pub trait ProbeObserver {
    /// A connection was established; `seq` is 1-based.
    fn on_reply(
        &mut self,
        ip: Ipv4Addr,
        port: u16,
        seq: u32,
        result: &ProbeResult,
    ) -> Result<(), TcppingError>;

    /// A probe failed and was counted.
    fn on_failure(
        &mut self,
        _ip: Ipv4Addr,
        _port: u16,
        _seq: u32,
        _result: &ProbeResult,
    ) -> Result<(), TcppingError> {
        Ok(())
    }
}

/// Lifecycle of a probe loop; only the final outcome leaves the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running,
    Completed,
    Interrupted,
    Finalizing,
    Done,
}

/// Sequential driver issuing up to `count` probes against one address.
pub struct ProbeLoop<'a> {
    config: &'a Config,
    ip: Ipv4Addr,
    state: LoopState,
    stats: SessionStats,
}

impl<'a> ProbeLoop<'a> {
    pub fn new(config: &'a Config, ip: Ipv4Addr) -> Self {
        Self {
            config,
            ip,
            state: LoopState::Idle,
            stats: SessionStats::default(),
        }
    }

    /// Run the loop until `count` probes were made or `cancel` resolves.
    ///
    /// Cancellation is checked while a probe is in flight and while sleeping
    /// between probes; an interrupted probe is not counted.
    #[instrument(skip_all, fields(ip = %self.ip, port = self.config.port, count = self.config.count))]
    pub async fn run<O, C>(
        mut self,
        observer: &mut O,
        cancel: C,
    ) -> Result<SessionStats, TcppingError>
    where
        O: ProbeObserver + ?Sized,
        C: Future<Output = ()>,
    {
        tokio::pin!(cancel);
        let Config {
            port,
            count,
            interval,
            connect_timeout,
            ..
        } = *self.config;
        let ip = self.ip;

        self.transition(LoopState::Running);
        let mut seq = 0u32;
        let end = loop {
            if seq >= count {
                break LoopState::Completed;
            }
            seq += 1;

            let result = tokio::select! {
                biased;
                _ = &mut cancel => break LoopState::Interrupted,
                r = tcp_client::attempt(ip, port, connect_timeout) => r,
            };

            self.stats.record(&result);
            if result.success {
                observer.on_reply(ip, port, seq, &result)?;
            } else {
                observer.on_failure(ip, port, seq, &result)?;
            }

            if seq < count {
                tokio::select! {
                    biased;
                    _ = &mut cancel => break LoopState::Interrupted,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        };
        self.transition(end);

        Ok(self.finish())
    }

    fn finish(mut self) -> SessionStats {
        self.stats.outcome = match self.state {
            LoopState::Interrupted => SessionOutcome::Interrupted,
            _ => SessionOutcome::Completed,
        };
        self.transition(LoopState::Finalizing);
        debug_assert_eq!(
            self.stats.attempted,
            self.stats.succeeded + self.stats.failed
        );
        self.transition(LoopState::Done);
        self.stats
    }

    fn transition(&mut self, next: LoopState) {
        debug!(from = ?self.state, to = ?next, attempted = self.stats.attempted, "probe loop state");
        self.state = next;
    }
}
