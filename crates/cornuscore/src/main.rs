//! CornuScore CLI - Main Entry Point
//!
//! Resolves people from free-text queries and manages community reviews.
//! Results are printed as JSON on stdout; logs go to stderr.
//!
//! Usage:
//!     cornuscore lookup "Ana Perez"
//!     cornuscore --data profiles.json submit --identifier charlyg --category theft --text "..."
//!     cornuscore rankings --limit 3

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use cornuscore::{logging, snapshot, LookupResult, ReputationService, DEFAULT_RANKING_LIMIT};
use cornuscore_core::seed::initial_profiles;
use cornuscore_core::{MatchConfig, Matcher, NewReview, ReviewCategory};

#[derive(Parser, Debug)]
#[command(name = "cornuscore")]
#[command(about = "Reputation lookup with fuzzy identity resolution")]
#[command(version)]
struct Args {
    /// JSON snapshot holding profiles (created from demo data if missing)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// JSON file with match configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to info
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the profile that best matches a name, handle or phone number
    Lookup { query: String },

    /// List every profile above the match threshold, best first
    Search {
        query: String,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show how a query scores against specific identifiers
    Explain {
        query: String,

        #[arg(required = true)]
        identifiers: Vec<String>,
    },

    /// Record a review, creating the profile if the identifier is new
    Submit {
        #[arg(long)]
        identifier: String,

        /// Required when the identifier does not belong to an existing profile
        #[arg(long, default_value = "")]
        country: String,

        /// infidelity, theft, betrayal, toxic or positive
        #[arg(long)]
        category: ReviewCategory,

        #[arg(long)]
        text: String,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        instagram: Option<String>,

        #[arg(long)]
        evidence_url: Option<String>,
    },

    /// Most negative and most positive profiles
    Rankings {
        #[arg(long, default_value_t = DEFAULT_RANKING_LIMIT)]
        limit: usize,
    },
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    query: &'a str,
    #[serde(rename = "match")]
    matched: Option<LookupResult>,
}

fn load_config(path: Option<&Path>) -> Result<MatchConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let data = fs::read_to_string(path)
                .map_err(|e| format!("failed to read config '{}': {}", path.display(), e))?;
            MatchConfig::from_json(&data)?
        }
        None => MatchConfig::default(),
    };
    Ok(config.with_overrides(|key| std::env::var(key).ok())?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.log_level.as_deref() {
        Some(level) => logging::init_with_filter(level)?,
        None => logging::init()?,
    }

    let config = load_config(args.config.as_deref())?;
    let matcher = Matcher::with_config(config);

    let profiles = match &args.data {
        Some(path) => snapshot::load_or_seed(path)?,
        None => initial_profiles(),
    };
    let service = ReputationService::in_memory(profiles, matcher)?;

    match args.command {
        Command::Lookup { query } => {
            let matched = service.lookup(&query)?;
            print_json(&LookupOutput {
                query: &query,
                matched,
            })?;
        }
        Command::Search { query, limit } => {
            print_json(&service.search(&query, limit)?)?;
        }
        Command::Explain { query, identifiers } => {
            let explanations: Vec<_> = identifiers
                .iter()
                .map(|identifier| service.matcher().explain(&query, identifier))
                .collect();
            print_json(&explanations)?;
        }
        Command::Submit {
            identifier,
            country,
            category,
            text,
            author,
            instagram,
            evidence_url,
        } => {
            let review = service.submit_review(NewReview {
                person_identifier: identifier,
                country,
                category,
                text,
                pseudo_author: author,
                reviewer_instagram: instagram,
                evidence_url,
            })?;

            if let Some(path) = &args.data {
                snapshot::save(path, &service.profiles()?)?;
                info!(path = %path.display(), review = %review.id, "Snapshot updated");
            }
            print_json(&review)?;
        }
        Command::Rankings { limit } => {
            print_json(&service.rankings(limit)?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let args = Args::try_parse_from([
            "cornuscore",
            "--data",
            "profiles.json",
            "submit",
            "--identifier",
            "charlyg",
            "--category",
            "theft",
            "--text",
            "Nunca devolvió el dinero",
        ])
        .unwrap();

        assert_eq!(args.data, Some(PathBuf::from("profiles.json")));
        match args.command {
            Command::Submit {
                identifier,
                category,
                country,
                ..
            } => {
                assert_eq!(identifier, "charlyg");
                assert_eq!(category, ReviewCategory::Theft);
                assert_eq!(country, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = Args::try_parse_from([
            "cornuscore",
            "submit",
            "--identifier",
            "x",
            "--category",
            "gossip",
            "--text",
            "t",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_explain_requires_identifiers() {
        assert!(Args::try_parse_from(["cornuscore", "explain", "ana"]).is_err());
    }
}
