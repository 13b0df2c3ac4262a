use clap::Parser;
use dotenv::dotenv;
use std::process::ExitCode;
use tracing::{error, warn};

use solr_client::commands::run;
use solr_client::logging::init_tracing;
use solr_client::output::render;
use solr_client::{Cli, CliError, Dependencies, Settings};

async fn execute(cli: Cli) -> Result<String, CliError> {
    let settings = Settings::from_env()?.with_overrides(cli.url, cli.core, cli.format);
    let dependencies = Dependencies::new(&settings)?;

    let response = run(&cli.command, &dependencies.client).await?;
    render(&response, cli.output)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = tokio::select! {
        result = execute(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, abandoning in-flight request");
            return ExitCode::from(130);
        }
    };

    match result {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
