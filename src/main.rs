//! FitQuest - Fitness Gamification Application
//!
//! Main entry point: initializes logging and configuration, opens the
//! local database, and prints a snapshot of today's standing.

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitquest::storage::{config, Database};
use fitquest::FitQuestApp;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FitQuest v{}", env!("CARGO_PKG_VERSION"));

    let app_config = config::load_config().context("failed to load configuration")?;

    let db_path = config::get_database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    let app = FitQuestApp::new(db, &app_config.profile.display_name)
        .context("failed to initialize application")?;

    let today = Utc::now().date_naive();
    let summary = app.today_summary(today)?;
    let progress = app.user_progress()?;

    tracing::info!(
        user = %app_config.profile.display_name,
        total_points = progress.points,
        streak = summary.streak,
        logged_today = summary.log.is_some(),
        "ready"
    );

    let standings = app.leaderboard()?;
    for entry in standings.iter().take(3) {
        tracing::info!(rank = entry.rank, name = %entry.name, points = entry.points, "standings");
    }

    Ok(())
}
