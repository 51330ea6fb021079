use anstream::{eprintln as aeprintln, println as aprintln};
use clap::Parser;
use dynamodb_anime::{
    config::Cli,
    prompt::TerminalPrompter,
    scenario::{self, ScenarioSettings},
    seed::SeedLoader,
    table::TableConfig,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dynamodb_anime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let aws_config = cli.aws_config();
    aprintln!("Target: {}", aws_config.target_display());
    let client = aws_config.create_client().await;

    let settings = ScenarioSettings {
        table: TableConfig::records(&cli.table_name),
        seed_file: cli.seed_file,
        seed_loader: SeedLoader::new(Some(cli.seed_archive_url)),
        scan_page_size: cli.scan_page_size,
    };

    match scenario::run_scenario(&client, &settings, &mut TerminalPrompter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            aeprintln!("Something went wrong with the demo: {err}");
            ExitCode::FAILURE
        }
    }
}
