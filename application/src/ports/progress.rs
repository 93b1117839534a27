//! Progress notification port
//!
//! Lets the presentation layer show a loading indicator while an exchange is
//! waiting on the server.

use revchat_domain::{ExchangeState, Model};

/// Callbacks fired while an exchange runs. All methods default to no-ops.
pub trait ExchangeProgressNotifier: Send + Sync {
    /// The request was handed to the gateway.
    fn on_request_started(&self, _model: &Model) {}

    /// The first body chunk arrived.
    fn on_first_chunk(&self) {}

    /// The exchange reached a terminal state.
    fn on_finished(&self, _state: ExchangeState) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoExchangeProgress;

impl ExchangeProgressNotifier for NoExchangeProgress {}
