//! Interface to the sibling session-authentication extension.
//!
//! The message board never authenticates anyone itself. It resolves the
//! session extension once at vhost init, embeds that extension's opaque
//! per-connection sub-state inside its own connection state, and forwards
//! every event it does not own to the sibling with that sub-state attached.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::http::response::{self, StatusCode};
use crate::protocol::{Disposition, Event, HostActions};

/// Identity snapshot answered by the session extension.
///
/// An empty `username` means no valid session exists on this connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInfo {
    pub username: String,
    pub email: String,
    pub mask: u32,
    pub session: String,
}

/// Contract of the sibling session extension.
///
/// `handle_event` is the same event entry point the host itself would use,
/// so a forwarded event is indistinguishable from a direct delivery. The
/// identity query is an explicit method rather than an in-band event; it is
/// answered synchronously from the connection's embedded sub-state.
pub trait AuthExtension {
    /// Allocate the extension's per-connection sub-state.
    fn open_session(&self) -> Box<dyn Any>;

    /// Service one event against the given connection sub-state.
    fn handle_event(
        &self,
        session: &mut dyn Any,
        event: &Event<'_>,
        actions: &mut dyn HostActions,
    ) -> Disposition;

    /// Current identity for the connection, if any.
    fn session_info(&self, session: &dyn Any) -> SessionInfo;
}

/// Named extension lookup, consulted exactly once per vhost at init.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Rc<dyn AuthExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, extension: Rc<dyn AuthExtension>) {
        self.extensions.insert(name.into(), extension);
    }

    pub fn lookup(&self, name: &str) -> Option<Rc<dyn AuthExtension>> {
        self.extensions.get(name).cloned()
    }
}

/// Stand-in session extension with a fixed identity.
///
/// Real deployments register the actual session extension under the same
/// name; this one exists for the demo binary and tests. It answers unowned
/// HTTP requests with a plain 404 and reports the identity it was built
/// with for every connection.
pub struct StaticAuth {
    info: SessionInfo,
}

impl StaticAuth {
    pub fn new(info: SessionInfo) -> Self {
        Self { info }
    }

    /// A stand-in that never has a session, so live connections get
    /// rejected.
    pub fn anonymous() -> Self {
        Self {
            info: SessionInfo::default(),
        }
    }
}

impl AuthExtension for StaticAuth {
    fn open_session(&self) -> Box<dyn Any> {
        Box::new(())
    }

    fn handle_event(
        &self,
        _session: &mut dyn Any,
        event: &Event<'_>,
        actions: &mut dyn HostActions,
    ) -> Disposition {
        match event {
            Event::HttpRequest { .. } => {
                if response::send_plain_text(actions, StatusCode::NotFound, b"404 Not Found")
                    .is_err()
                {
                    return Disposition::Close;
                }
                if !actions.transaction_completed() {
                    return Disposition::Close;
                }
                Disposition::Continue
            }
            _ => Disposition::Continue,
        }
    }

    fn session_info(&self, _session: &dyn Any) -> SessionInfo {
        self.info.clone()
    }
}
