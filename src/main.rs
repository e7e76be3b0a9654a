use std::rc::Rc;

use noticeboard::board::context::AUTH_PROTOCOL;
use noticeboard::config::Config;
use noticeboard::protocol::auth::{ExtensionRegistry, SessionInfo, StaticAuth};
use noticeboard::server;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    // Stand-in session extension; a real deployment registers the actual
    // session-auth extension under the same name.
    let mut registry = ExtensionRegistry::new();
    registry.register(
        AUTH_PROTOCOL,
        Rc::new(StaticAuth::new(SessionInfo {
            username: "guest".to_string(),
            email: "guest@localhost".to_string(),
            ..Default::default()
        })),
    );

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            tokio::select! {
                res = server::listener::run(&cfg, &registry) => {
                    res?;
                }

                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received");
                }
            }

            Ok(())
        })
        .await
}
