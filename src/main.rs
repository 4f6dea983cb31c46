use config::Config;
use shell::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod chart;
mod compute;
mod config;
mod data;
mod display;
mod erase;
mod query;
mod shell;
mod store;
mod validate;

fn main() -> Result<(), anyhow::Error> {
    // logs go to stderr so they don't get mixed with the menu
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(stdin.lock(), stdout.lock(), Config::default()).run()
}
