use chrono::Local;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_view::api::{ApiConfig, TransitClient};
use transit_view::domain::Record;
use transit_view::join::ViewSlot;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "transit_view=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // Get the API location from the environment
    let base_url = std::env::var("TRANSIT_API_BASE_URL").unwrap_or_else(|_| {
        eprintln!("Warning: TRANSIT_API_BASE_URL not set, using http://localhost:8000");
        "http://localhost:8000".to_string()
    });

    let mut config = ApiConfig::new(base_url);
    if let Some(secs) = std::env::var("TRANSIT_API_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config = config.with_timeout(secs);
    }

    let client = TransitClient::http(config).expect("Failed to create transit client");

    // Load lines and stations
    let slot = ViewSlot::new();
    if let Err(e) = slot.refresh(&client).await {
        error!(stage = %e.stage, "failed to load transit network: {}", e.source);
        std::process::exit(1);
    }
    let Some(view) = slot.current().await else {
        return;
    };

    for (station, line) in view.stations_with_lines() {
        println!(
            "{:<30} {}",
            station.name().unwrap_or("?"),
            line.and_then(Record::name).unwrap_or("(unknown line)")
        );
    }

    // Optional station ids on the command line: show their upcoming times
    let station_ids: Vec<String> = std::env::args().skip(1).collect();
    if station_ids.is_empty() {
        return;
    }

    let ids: Vec<&str> = station_ids.iter().map(String::as_str).collect();
    let now = Local::now().naive_local();
    match client.location_times(&ids, now).await {
        Ok(times) => {
            info!(count = times.len(), "upcoming times");
            println!();
            for entry in times {
                let name = view
                    .station(&entry.station)
                    .and_then(Record::name)
                    .unwrap_or(&entry.station);
                println!("{:<30} {}", name, entry.day_and_time());
            }
        }
        Err(e) => {
            error!("failed to load station times: {e}");
            std::process::exit(1);
        }
    }
}
