use std::rc::Rc;

use anyhow::Context as _;
use tokio::net::TcpListener;
use tracing::info;

use crate::board::{BoardContext, MessageBoard};
use crate::config::Config;
use crate::http::connection::Connection;
use crate::protocol::auth::ExtensionRegistry;

/// Bring up the configured vhost and serve connections until cancelled.
///
/// Connections are spawned onto the current `LocalSet`: the vhost context
/// owns a single store connection and must stay confined to this one event
/// loop.
pub async fn run(cfg: &Config, registry: &ExtensionRegistry) -> anyhow::Result<()> {
    let vhost = cfg.vhosts.first().context("no vhosts configured")?;
    let ctx = Rc::new(BoardContext::init(vhost, registry)?);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let board = MessageBoard::new(ctx.clone());
        tokio::task::spawn_local(async move {
            let mut conn = Connection::new(socket, board);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
