use clap::Parser;
use tracing_subscriber::EnvFilter;

use chess_relay::app;
use chess_relay::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // logs go to stderr so stdout stays clean for the board and payloads
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log))
        .with_writer(std::io::stderr)
        .init();

    app::run(config)
}
