//! LifeLink CLI
//!
//! Loads a JSON seed file into the in-memory stores and runs matching
//! queries against it. Results are printed as JSON.
//!
//! Usage:
//!   lifelink [--seed <file>] match <blood-type>
//!   lifelink [--seed <file>] donors [--blood-type <type>]
//!   lifelink [--seed <file>] help-requests <donor-type>
//!   lifelink [--seed <file>] pending
//!   lifelink [--seed <file>] stats [--summary]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lifelink::store::{SeedData, load_seed};
use lifelink::{BloodType, DirectoryStats, LifeLinkConfig, MatchService, RequestMatcher};
use log::info;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "lifelink")]
#[command(version = "0.1.0")]
#[command(about = "Match blood donors with patients", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed file with donors and requests (empty stores if not specified)
    #[arg(short, long)]
    seed: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find available donors compatible with a patient's blood type
    Match {
        /// Patient blood type, e.g. AB+
        blood_type: String,
    },

    /// List available donors
    Donors {
        /// Only donors of exactly this type
        #[arg(short, long)]
        blood_type: Option<String>,
    },

    /// Pending requests a donor of the given type could help
    HelpRequests {
        /// Donor blood type
        donor_type: String,
    },

    /// Match every pending request, most urgent first
    Pending,

    /// Directory statistics
    Stats {
        /// Print a text summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = LifeLinkConfig::from_env();
    info!("{config}");

    let seed = match &cli.seed {
        Some(path) => load_seed(path)
            .await
            .with_context(|| format!("Failed to load seed file {}", path.display()))?,
        None => SeedData::default(),
    };
    let (donors, requests) = seed.into_stores(config.parallel_scan_threshold);
    let donors = Arc::new(donors);
    let requests = Arc::new(requests);

    let service = MatchService::with_config(Arc::clone(&donors), &config);

    match cli.command {
        Commands::Match { blood_type } => {
            let result = service
                .find_matches_str(&blood_type)
                .await
                .with_context(|| format!("Failed to match blood type {blood_type:?}"))?;
            print_json(&result)
        }
        Commands::Donors { blood_type } => {
            let blood_type = blood_type
                .as_deref()
                .map(BloodType::parse)
                .transpose()
                .context("Invalid --blood-type")?;
            let listed = service.list_available_donors(blood_type).await?;
            print_json(&listed)
        }
        Commands::HelpRequests { donor_type } => {
            let donor_type = BloodType::parse(&donor_type).context("Invalid donor type")?;
            let matcher = RequestMatcher::new(service, Arc::clone(&requests), &config);
            let pending = matcher.find_requests_for_donor(donor_type).await?;
            print_json(&pending)
        }
        Commands::Pending => {
            let matcher = RequestMatcher::new(service, Arc::clone(&requests), &config);
            let matches = matcher.match_pending_requests().await?;
            print_json(&matches)
        }
        Commands::Stats { summary } => {
            let stats = DirectoryStats::collect(donors.as_ref(), requests.as_ref()).await?;
            if summary {
                print!("{}", stats.summary());
                Ok(())
            } else {
                print_json(&stats)
            }
        }
    }
}
