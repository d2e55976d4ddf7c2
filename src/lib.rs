//! tcpping library: TCP connect probing, latency statistics and reporting.

pub mod adapters;
pub mod domain;
mod error;
pub mod fmt;
pub mod services;
pub mod stats;

pub use adapters::resolver::resolve;
pub use adapters::tcp_client::attempt;
pub use domain::config::Config;
pub use domain::probe::{ProbeErrorKind, ProbeResult, SessionOutcome, SessionStats, TargetAddress};
pub use error::TcppingError;
pub use services::session::{ProbeLoop, ProbeObserver};
