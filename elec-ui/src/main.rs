use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use elec_core::{ElectricForm, FormSession, Locale};
use tracing::{debug, info};

use elec_ui::{
    app::{self, App},
    config::{AppConfig, Overrides},
    csv_loader, logging,
    submit::SubmitOutcome,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Electricity bill savings simulation form.
///
/// Runs the form interactively, or replays a CSV of entries with `--batch`
/// and prints one confirmation or list of blocking errors per row.
#[derive(Debug, Parser)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Language for labels and messages (`en` or `ja`).
    #[arg(long)]
    locale: Option<Locale>,

    /// Area check backend (`local` or `http`).
    #[arg(long)]
    backend: Option<String>,

    /// Area check endpoint URL for the `http` backend.
    #[arg(long)]
    endpoint: Option<String>,

    /// Log filter, e.g. `debug` or `info,elec_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// CSV file of form entries to replay instead of prompting.
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Keep log output off stdout.
    #[arg(long, short)]
    quiet: bool,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = AppConfig::load_optional(cli.config.as_deref())?;
    config.apply_overrides(Overrides {
        locale: cli.locale,
        backend: cli.backend,
        endpoint: cli.endpoint,
        log_level: cli.log_level,
        quiet: cli.quiet,
    });
    logging::apply_config(&config.logging).context("applying logging configuration")?;

    let checker_config = config.checker_config();
    debug!(backend = %checker_config.backend, locale = %config.locale, "creating area checker");
    let checker = app::build_registry()
        .create(&checker_config)
        .context("creating area checker")?;

    let mut app = App::new(FormSession::new(ElectricForm::new(config.locale), checker));

    let Some(batch) = cli.batch else {
        return app::run_interactive(app).await;
    };

    let entries = csv_loader::load_from_file(&batch)?;
    info!(rows = entries.len(), file = %batch.display(), "replaying batch");

    let outcomes = app::run_batch(&mut app, &entries).await;
    for (idx, outcome) in outcomes.iter().enumerate() {
        match outcome {
            SubmitOutcome::Confirmed(text) => println!("row {}:\n{text}\n", idx + 1),
            SubmitOutcome::Blocked(reasons) => {
                println!("row {}: blocked\n{}\n", idx + 1, app::bullet_list(reasons))
            }
        }
    }

    let confirmed = outcomes.iter().filter(|o| o.is_confirmed()).count();
    info!(confirmed, blocked = outcomes.len() - confirmed, "batch finished");
    Ok(())
}
