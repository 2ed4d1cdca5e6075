mod display;

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use sentinela_core::{AlertList, MapShell, Notice, OccurrenceKind, SubmitOutcome};
use sentinela_sync::{
    AddressSearch, ClientConfig, OccurrenceApi, OccurrenceClient, PlacesClient, PlacesConfig,
    Submitter, load_alerts,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sentinela", version, about = "Report and browse civil-defense occurrences")]
struct Cli {
    #[command(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ApiArgs {
    /// Base URL of the occurrence API.
    #[arg(long, env = "SENTINELA_API_URL", default_value = "http://localhost:8000", global = true)]
    api_url: String,

    /// Key for the place text-search service.
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true, global = true)]
    places_key: Option<String>,

    /// Reporting user id sent with new occurrences.
    #[arg(long, env = "SENTINELA_USER_ID", default_value_t = 1, global = true)]
    user_id: i64,
}

#[derive(Subcommand)]
enum Command {
    /// List reported occurrences.
    Alerts {
        /// Row indexes to show expanded.
        #[arg(long)]
        expand: Vec<usize>,
    },
    /// Pin reported occurrences on the map and optionally open one marker's panel.
    Map {
        #[arg(long)]
        open: Option<usize>,
    },
    /// Resolve an address to a coordinate.
    Search { text: Vec<String> },
    /// Walk through the report wizard and register an occurrence.
    Report(ReportArgs),
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long, default_value = "")]
    address: String,

    /// One of: chuvas, incendio, deslizamento.
    #[arg(long)]
    kind: Option<OccurrenceKind>,

    #[arg(long, default_value = "")]
    description: String,

    /// Submit after showing the confirmation; without it the report is cancelled.
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("sentinela v{}", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::new(cli.api.api_url.clone(), cli.api.user_id);
    let api = Arc::new(OccurrenceClient::new(&config));

    match cli.command {
        Command::Alerts { expand } => {
            let mut list = AlertList::new();
            load_alerts(api.as_ref(), &mut list).await;
            for index in expand {
                list.toggle(index)?;
            }
            display::print_alerts(&list);
        }
        Command::Map { open } => {
            let occurrences = api
                .list_occurrences()
                .await
                .context("fetching occurrences")?;
            let mut shell = MapShell::new();
            let pinned = shell.show_occurrences(&occurrences);
            let region = shell.camera().region();
            println!(
                "Região: {:.4}, {:.4} ({} marcadores)",
                region.center.latitude, region.center.longitude, pinned
            );
            display::print_markers(shell.markers());
            if let Some(index) = open {
                let detail = shell.open_detail(index)?;
                println!();
                println!("=== {} ===", detail.title);
                println!("{}", detail.description);
            }
        }
        Command::Search { text } => {
            let places = places_client(&cli.api)?;
            let search = AddressSearch::new(Arc::new(places));
            match search.search(&text.join(" ")).await {
                Some(c) => println!("{:.6}, {:.6}", c.latitude, c.longitude),
                None => println!("Nenhum resultado"),
            }
        }
        Command::Report(args) => run_report(&cli.api, api, args).await?,
    }

    Ok(())
}

fn places_client(args: &ApiArgs) -> anyhow::Result<PlacesClient> {
    let key = args.places_key.clone().unwrap_or_default();
    PlacesClient::new(PlacesConfig::new(key)).context("creating place search client")
}

async fn run_report(
    api_args: &ApiArgs,
    api: Arc<OccurrenceClient>,
    args: ReportArgs,
) -> anyhow::Result<()> {
    let search = match places_client(api_args) {
        Ok(places) => Some(AddressSearch::new(Arc::new(places))),
        Err(e) => {
            warn!(error = %e, "address search disabled");
            None
        }
    };
    let (results_tx, mut results_rx) = mpsc::unbounded_channel();

    let mut shell = MapShell::new();

    // Step 1: location.
    let wizard = shell.open_report();
    display::print_wizard_header(wizard);
    wizard.set_address(args.address);
    let mut awaiting_search = false;
    if let Some(request) = shell.advance_wizard()
        && let Some(search) = &search
    {
        let _ = search.spawn(request, results_tx.clone());
        awaiting_search = true;
    }
    drop(results_tx);

    // Step 2: type and description.
    let wizard = shell.wizard_mut().context("report wizard closed")?;
    display::print_wizard_header(wizard);
    wizard.select_kind(args.kind);
    wizard.set_description(args.description);
    shell.advance_wizard();

    // Step 3: media. Nothing to attach yet.
    if let Some(wizard) = shell.wizard() {
        display::print_wizard_header(wizard);
    }

    // The wizard never waits on the search, but a one-shot CLI run has
    // nothing else to do before showing the confirmation.
    if awaiting_search && let Some(outcome) = results_rx.recv().await {
        shell.apply_search(outcome.ticket, outcome.coordinate);
    }
    for camera_move in shell.camera_mut().take_animations() {
        info!(
            latitude = camera_move.target.center.latitude,
            longitude = camera_move.target.center.longitude,
            duration_ms = camera_move.duration.as_millis() as u64,
            "map recentred on address"
        );
    }

    let summary = shell
        .finish_wizard()
        .context("report wizard is not on its last step")?
        .summary();
    println!();
    display::print_confirmation(&summary);

    if !args.yes {
        shell.cancel_confirmation();
        println!("Registro cancelado.");
        return Ok(());
    }

    let submitter = Submitter::new(api, api_args.user_id);
    let submission = submitter
        .confirm(&mut shell)
        .await
        .context("no confirmation open")?;
    match submission.outcome {
        SubmitOutcome::Created => {
            println!("{}", Notice::Success.message());
            Ok(())
        }
        SubmitOutcome::Failed { reason } => {
            eprintln!("{}", Notice::Failure.message());
            bail!("registration failed: {reason}")
        }
    }
}
