//! Exercise the storage facade from the command line and print JSON results.
//!
//! Destinations are read through the relational store when `DB_*` settings
//! point at a reachable database, and from the seeded in-memory store
//! otherwise. Set `RUST_LOG=warn` to see fallback decisions.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use backend::domain::{CurrencyConverter, ServiceKind, StorageFacade};
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{ConnectionManager, DatabaseSettings, DieselConnector};
use backend::outbound::{hybrid_facade, in_memory_facade};
use clap::{Parser, Subcommand};
use mockable::{DefaultClock, DefaultEnv};
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `storage-probe` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "storage-probe",
    about = "Query the travel storage core and print JSON",
    version
)]
struct CliArgs {
    /// Skip the relational store and use only the in-memory sample data.
    #[arg(long = "in-memory")]
    in_memory: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List destinations, optionally only featured ones or a search.
    Destinations {
        #[arg(long)]
        featured: bool,
        /// Case-insensitive search over name, description and state.
        #[arg(long, value_name = "text", conflicts_with = "featured")]
        search: Option<String>,
    },
    /// Local services within 10 km of a point.
    NearbyServices {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// One of atm, currency_exchange, taxi, food_delivery, medical, tourist_info.
        #[arg(long, value_parser = parse_service_kind)]
        kind: Option<ServiceKind>,
    },
    /// Sightseeing spots within 20 km of a point.
    NearbySightseeing {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Convert an amount between supported currencies.
    Convert {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: f64,
    },
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let clock = Arc::new(DefaultClock);

    if let Command::Convert { from, to, amount } = &args.command {
        let conversion = CurrencyConverter::new(clock)
            .convert(from, to, *amount)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;
        return print_json(&conversion);
    }

    let facade = build_facade(args.in_memory, clock)?;
    run(&facade, args.command).await
}

fn build_facade(in_memory: bool, clock: Arc<DefaultClock>) -> io::Result<StorageFacade> {
    let memory = Arc::new(InMemoryStore::with_sample_data(clock.clone()));
    if in_memory {
        return Ok(in_memory_facade(memory));
    }
    let settings = DatabaseSettings::from_env(&DefaultEnv::new())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;
    Ok(hybrid_facade(
        ConnectionManager::new(DieselConnector, settings),
        memory,
        clock,
    ))
}

async fn run(facade: &StorageFacade, command: Command) -> io::Result<()> {
    match command {
        Command::Destinations { featured, search } => {
            let destinations = match (featured, search) {
                (_, Some(query)) => facade.search_destinations(&query).await,
                (true, None) => facade.get_featured_destinations().await,
                (false, None) => facade.get_destinations().await,
            }
            .map_err(storage_error)?;
            print_json(&destinations)
        }
        Command::NearbyServices { lat, lng, kind } => {
            let services = facade
                .get_nearby_services(lat, lng, kind)
                .await
                .map_err(storage_error)?;
            print_json(&services)
        }
        Command::NearbySightseeing { lat, lng } => {
            let spots = facade
                .get_nearby_sightseeing(lat, lng)
                .await
                .map_err(storage_error)?;
            print_json(&spots)
        }
        Command::Convert { .. } => Ok(()),
    }
}

fn parse_service_kind(raw: &str) -> Result<ServiceKind, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unknown service kind '{raw}'"))
}

fn storage_error(error: backend::domain::DomainError) -> io::Error {
    io::Error::other(format!("storage query failed: {error}"))
}

fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).map_err(io::Error::other)?;
    io::Write::write_all(&mut handle, b"\n")
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing helpers.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("atm", ServiceKind::Atm)]
    #[case("Currency_Exchange", ServiceKind::CurrencyExchange)]
    #[case(" tourist_info ", ServiceKind::TouristInfo)]
    fn service_kinds_parse(#[case] raw: &str, #[case] expected: ServiceKind) {
        assert_eq!(parse_service_kind(raw), Ok(expected));
    }

    #[rstest]
    fn unknown_service_kind_is_rejected() {
        let error = parse_service_kind("spa").expect_err("unknown kind");
        assert!(error.contains("spa"));
    }

    #[rstest]
    fn nearby_arguments_accept_negative_coordinates() {
        let args = CliArgs::try_parse_from([
            "storage-probe",
            "--in-memory",
            "nearby-services",
            "--lat",
            "-33.86",
            "--lng",
            "151.21",
            "--kind",
            "taxi",
        ])
        .expect("arguments parse");

        assert!(args.in_memory);
        match args.command {
            Command::NearbyServices { lat, lng, kind } => {
                assert_eq!((lat, lng, kind), (-33.86, 151.21, Some(ServiceKind::Taxi)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[rstest]
    fn hybrid_facade_builds_without_connecting() {
        let built = build_facade(false, Arc::new(DefaultClock));
        assert!(built.is_ok(), "facade construction failed: {:?}", built.err());
    }

    #[tokio::test]
    async fn featured_destinations_come_from_sample_data() {
        let facade = build_facade(true, Arc::new(DefaultClock)).expect("facade");
        let featured = facade
            .get_featured_destinations()
            .await
            .expect("featured destinations");
        assert_eq!(featured.len(), 2);
    }
}
