use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seat_allocator::{
    config::Config,
    services::AutoBookRequest,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting seat allocator");

    let occupant = std::env::var("BOOKING_OCCUPANT").unwrap_or_else(|_| "cli".to_string());
    let counts = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<u32>()
                .with_context(|| format!("seat count must be a number, got {arg:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if counts.is_empty() {
        warn!("No seat counts given, usage: seat_allocator <count> [<count> ...]");
        return Ok(());
    }

    let state = AppState::new(config)?;

    for count in counts {
        let outcome = state
            .bookings
            .auto_book(AutoBookRequest::new(occupant.clone(), count))
            .await?;
        println!("{}", serde_json::to_string(&outcome)?);
    }

    let stats = state.bookings.stats().await;
    info!("Booked seats: {}, available seats: {}", stats.booked, stats.available);

    Ok(())
}
