use anyhow::Context;
use clap::Parser;
use scorebook::cli::command::Cli;
use scorebook::cli::{self, output};
use scorebook::config::Config;
use tracing::error;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));
    output::set_color(cli.color.enabled());

    if let Err(e) = run(&cli) {
        let message = format!("{e:#}");
        error!(error = %message, "Command failed");
        output::error(&message);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;
    config.init_logging();
    cli::execute(cli, &config)?;
    Ok(())
}
