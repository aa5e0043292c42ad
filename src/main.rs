// Porto Taxi Replay - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/porto-taxi-replay
// ```
//
// Or query a single driver:
//
// ```console
// $ ./target/release/porto-taxi-replay --driver-id 20000589 --latest
// ```

use chrono::{DateTime, Utc};
use clap::Parser;
use porto_taxi_replay::replay::{FixedTimeSource, SystemTimeSource, TimeSource};
use porto_taxi_replay::store::{load_store, StoreStatistics};
use porto_taxi_replay::types::config::CliArgs;
use porto_taxi_replay::{
    DriverId, LoggingConfig, ReplayConfig, ReplayService, TripId,
};
use serde::Serialize;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = ReplayConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: minimal logging so stdout carries only query output
        LoggingConfig::init_quiet()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Porto Taxi Replay");

    // Load configuration from CLI arguments and optional config file
    let config = match ReplayConfig::from_cli_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - dataset will not be loaded.");
        print_configuration_summary(&config);
        return;
    }

    // Resolve the query instant up front so a bad --at fails before loading
    let now = match resolve_query_instant(&args.at) {
        Ok(now) => now,
        Err(e) => {
            error!("Invalid --at timestamp: {}", e);
            process::exit(1);
        }
    };

    // Load the dataset
    info!(trips_path = %config.trips_path, drivers_path = %config.drivers_path, "Loading dataset");
    let store = match load_store(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load dataset: {}", e);
            process::exit(1);
        }
    };

    let stats = store.statistics();
    print_store_summary(&stats);

    let service = ReplayService::with_store(config, store);

    if let Err(e) = run_query(&service, &args, now) {
        error!("Query failed: {}", e);
        process::exit(1);
    }

    info!("Porto Taxi Replay completed successfully");
}

/// Resolve the wall-clock instant the query runs at
///
/// `--at` pins the query to a fixed RFC 3339 instant; otherwise the system
/// clock is used.
fn resolve_query_instant(at: &Option<String>) -> Result<DateTime<Utc>, chrono::ParseError> {
    match at {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw)?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(SystemTimeSource.now()),
    }
}

/// Dispatch the requested query and print its result as pretty JSON
fn run_query(
    service: &ReplayService,
    args: &CliArgs,
    now: DateTime<Utc>,
) -> Result<(), porto_taxi_replay::ReplayError> {
    let engine = service.engine()?;
    let time_source = FixedTimeSource(now);

    if args.list_drivers {
        let listing = driver_listing(service);
        return print_json(&listing);
    }

    match (args.driver_id, args.trip_id) {
        (Some(driver), Some(trip)) => {
            let outcome =
                engine.trip_detail(DriverId::new(driver), TripId::new(trip), time_source.now());
            print_json(&outcome)
        }
        (Some(driver), None) if args.latest => {
            let snapshot = engine.driver_latest(DriverId::new(driver), time_source.now());
            print_json(&snapshot)
        }
        (Some(driver), None) => {
            let snapshot = engine.active_trips_for_driver(DriverId::new(driver), time_source.now());
            print_json(&snapshot)
        }
        (None, _) => {
            let snapshot = engine.active_trips(time_source.now());
            print_json(&snapshot)
        }
    }
}

/// The `--list-drivers` output
#[derive(Debug, Serialize)]
struct DriverListing {
    driver_count: usize,
    drivers: Vec<DriverEntry>,
}

/// One driver row of the `--list-drivers` output
#[derive(Debug, Serialize)]
struct DriverEntry {
    driver_id: DriverId,
    trip_count: usize,
    license_plate: Option<String>,
    vehicle_model: Option<String>,
}

/// Known drivers with their recorded trip counts, in dataset order
fn driver_listing(service: &ReplayService) -> DriverListing {
    let drivers: Vec<DriverEntry> = service
        .store()
        .map(|store| {
            store
                .drivers()
                .into_iter()
                .map(|driver| DriverEntry {
                    driver_id: driver.driver_id,
                    trip_count: store.trips_for_driver(driver.driver_id).len(),
                    license_plate: driver.license_plate.clone(),
                    vehicle_model: driver.vehicle_model.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    DriverListing { driver_count: drivers.len(), drivers }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), porto_taxi_replay::ReplayError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print configuration summary
fn print_configuration_summary(config: &ReplayConfig) {
    eprintln!("Configuration:");
    eprintln!("  Cycle Length: {} seconds", config.cycle_seconds);
    eprintln!("  Sample Cadence: {} seconds", config.sample_cadence_seconds);
    eprintln!(
        "  Replayed Window: {} - {}",
        config.reference_epoch,
        config.reference_window_end()
    );
    eprintln!("  Trips Path: {}", config.trips_path);
    eprintln!("  Drivers Path: {}", config.drivers_path);
    eprintln!();
}

/// Print dataset summary after a successful load
fn print_store_summary(stats: &StoreStatistics) {
    eprintln!("Dataset loaded:");
    eprintln!("  Trips: {}", stats.trip_count);
    eprintln!("  Drivers on record: {}", stats.driver_count);
    eprintln!("  Distinct trip drivers: {}", stats.distinct_trip_drivers);
    eprintln!("  Average path points per trip: {:.1}", stats.average_path_points());
    if stats.trips_without_path > 0 {
        eprintln!("  Trips without a usable path: {}", stats.trips_without_path);
    }
    if let Some(span) = stats.recorded_span_seconds() {
        eprintln!("  Recorded span: {} seconds", span);
    }
    eprintln!();
}
