use std::net::SocketAddr;

use clap::Parser;
use mun_server::{app_with_state, commands::Command, config::read_config, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};


#[derive(clap::Parser)]
#[command(version, about = "Conference directory server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = read_config();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.logging_config.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = AppState::new(config).await?;

    match cli.command {
        Some(command) => command.run(state).await,
        None => {
            let app = app_with_state(state).await;
            tracing::info!("Listening on {}", addr);
            axum::Server::bind(&addr)
                .serve(app.into_make_service())
                .await?;
            Ok(())
        }
    }
}
