//! The message-board extension: per-vhost context, per-connection state,
//! form accumulation, persistence, and the event dispatcher tying them
//! together.

pub mod context;
pub mod dispatcher;
pub mod form;
pub mod store;

pub use context::BoardContext;
pub use dispatcher::MessageBoard;

use std::any::Any;

use crate::protocol::SessionInfo;

use form::FormAccumulator;

/// State for one connection, alive for one HTTP transaction or one live
/// session. Owns the sibling extension's opaque sub-state, which is lent
/// back to the sibling on every forwarded event.
pub struct ConnectionState {
    /// Identity snapshot, populated only from the sibling's answer.
    pub auth: SessionInfo,
    /// Source address recorded into committed messages.
    pub peer: String,
    pub(crate) auth_session: Box<dyn Any>,
    pub(crate) accumulator: Option<FormAccumulator>,
    pub(crate) is_form_target: bool,
}

impl ConnectionState {
    /// Whether the current HTTP transaction targets the form endpoint.
    pub fn is_form_target(&self) -> bool {
        self.is_form_target
    }

    /// Whether a body is currently being accumulated.
    pub fn has_accumulator(&self) -> bool {
        self.accumulator.is_some()
    }

    fn reset_transaction(&mut self) {
        self.is_form_target = false;
        self.accumulator = None;
    }
}
