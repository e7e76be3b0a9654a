//! Per-vhost extension context.

use std::rc::Rc;

use anyhow::bail;
use tracing::error;

use crate::config::VhostConfig;
use crate::protocol::auth::{AuthExtension, ExtensionRegistry};

use super::store::MessageStore;

/// Registry name the sibling session extension must be registered under.
pub const AUTH_PROTOCOL: &str = "session-auth";

/// Required vhost option naming the store file.
pub const MESSAGE_DB_OPTION: &str = "message-db";

/// Shared state for one virtual host: the open store and the resolved
/// sibling extension. Created once at vhost init and owned by the host for
/// the vhost's lifetime; never shared across event loops.
pub struct BoardContext {
    store: MessageStore,
    auth: Rc<dyn AuthExtension>,
}

impl BoardContext {
    /// Bring up the message board for one vhost. Any failure here aborts
    /// this vhost's protocol only; the store stays unopened unless the
    /// configuration is complete.
    pub fn init(vhost: &VhostConfig, registry: &ExtensionRegistry) -> anyhow::Result<Self> {
        let Some(auth) = registry.lookup(AUTH_PROTOCOL) else {
            error!(vhost = %vhost.name, "messageboard requires the {AUTH_PROTOCOL} extension");
            bail!("vhost {}: {AUTH_PROTOCOL} extension not registered", vhost.name);
        };

        let Some(path) = vhost.option(MESSAGE_DB_OPTION) else {
            error!(vhost = %vhost.name, "messageboard needs the \"{MESSAGE_DB_OPTION}\" vhost option");
            bail!("vhost {}: missing \"{MESSAGE_DB_OPTION}\" option", vhost.name);
        };

        let store = MessageStore::open(path)?;
        store.ensure_schema()?;

        Ok(Self { store, auth })
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn auth(&self) -> &Rc<dyn AuthExtension> {
        &self.auth
    }
}
