use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hostconfig_fixture::{
    config::{DEFAULT_PORT, ServerConfig},
    fixture::HostConfigFixture,
    server::FixtureServer,
};

/// Stub hostconfigs endpoint. Point the plugin's `restconf_uri` at
/// `http://localhost:<port>/`.
#[derive(Parser, Debug)]
#[command(name = "hostconfig-fixture")]
struct Opt {
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let fixture = HostConfigFixture::devstack();
    let server = FixtureServer::bind(ServerConfig::new(opt.port), &fixture).await?;

    tokio::select! {
        result = server.serve() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, shutting down");
            Ok(())
        }
    }
}
