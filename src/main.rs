use cardkit::application::engine::{CardEngine, EngineConfig};
use cardkit::domain::card::CardInput;
use cardkit::domain::payment::PaymentSnapshot;
use cardkit::domain::ports::{ProfileStore, ProfileStoreBox};
use cardkit::domain::profile::StoredProfile;
use cardkit::infrastructure::in_memory::InMemoryProfileStore;
use cardkit::interfaces::csv::card_writer::{CardWriter, write_cards_json};
use cardkit::interfaces::csv::record_reader::RecordReader;
use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize and validate card input rows
    Normalize {
        /// Input card CSV file
        input: PathBuf,

        /// CSV of cards already stored against gateway profiles
        #[arg(long)]
        profiles: Option<PathBuf>,

        /// Date expiry is judged against (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        reference_date: Option<String>,

        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },
    /// Report which lifecycle actions each payment allows
    Capabilities {
        /// Input payments CSV file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            input,
            profiles,
            reference_date,
            format,
        } => normalize(input, profiles, reference_date, format).await,
        Commands::Capabilities { input } => capabilities(input),
    }
}

async fn normalize(
    input: PathBuf,
    profiles: Option<PathBuf>,
    reference_date: Option<String>,
    format: Format,
) -> Result<()> {
    let config = match reference_date {
        Some(date) => EngineConfig::with_reference_date(&date).into_diagnostic()?,
        None => EngineConfig::default(),
    };

    let store = InMemoryProfileStore::new();
    if let Some(path) = profiles {
        let file = File::open(path).into_diagnostic()?;
        let mut loaded = 0;
        for profile in RecordReader::new(file).records::<StoredProfile>() {
            match profile {
                Ok(profile) => {
                    store.store(profile).await.into_diagnostic()?;
                    loaded += 1;
                }
                Err(e) => warn!("Error reading profile: {}", e),
            }
        }
        info!("Loaded {} stored profiles", loaded);
    }
    let store: ProfileStoreBox = Box::new(store);
    let engine = CardEngine::new(store, config);

    let file = File::open(input).into_diagnostic()?;
    let mut outcomes = Vec::new();
    for card in RecordReader::new(file).records::<CardInput>() {
        match card {
            Ok(card) => outcomes.push(engine.create(card).await.into_diagnostic()?),
            Err(e) => warn!("Error reading card: {}", e),
        }
    }

    let invalid = outcomes.iter().filter(|o| !o.is_valid()).count();
    info!(
        "Processed {} cards ({} invalid) against {}",
        outcomes.len(),
        invalid,
        engine.config().reference_date
    );

    let stdout = io::stdout();
    match format {
        Format::Csv => CardWriter::new(stdout.lock())
            .write_cards(&outcomes)
            .into_diagnostic()?,
        Format::Json => write_cards_json(stdout.lock(), &outcomes).into_diagnostic()?,
    }

    Ok(())
}

fn capabilities(input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let mut payments = Vec::new();
    for payment in RecordReader::new(file).records::<PaymentSnapshot>() {
        match payment {
            Ok(payment) => payments.push(payment),
            Err(e) => warn!("Error reading payment: {}", e),
        }
    }

    let stdout = io::stdout();
    CardWriter::new(stdout.lock())
        .write_capabilities(&payments)
        .into_diagnostic()?;

    Ok(())
}
