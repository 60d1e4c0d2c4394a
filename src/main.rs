// src/main.rs
//
// Bootstrap: open the database, apply the schema, wire the services.
// Transports embed the library and build on `AppState`.

use std::sync::Arc;

use anyhow::Context;

use filmorate::application::AppState;
use filmorate::config::DatabaseConfig;
use filmorate::db::{create_connection_pool, get_connection, get_database_stats, initialize_database};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. INFRASTRUCTURE
    let config = DatabaseConfig::from_env().context("reading database configuration")?;
    let pool = Arc::new(
        create_connection_pool(&config)
            .with_context(|| format!("opening {}", config.path.display()))?,
    );

    // Initialize schema (idempotent)
    let stats = {
        let conn = get_connection(&pool)?;
        initialize_database(&conn).context("initializing schema")?;
        get_database_stats(&conn)?
    };

    log::info!(
        "Database ready at {}: {} films, {} users, {} genres, {} MPA ratings",
        config.path.display(),
        stats.film_count,
        stats.user_count,
        stats.genre_count,
        stats.mpa_count
    );

    // 2. SERVICES
    let state = AppState::from_pool(pool);

    let ratings: Vec<String> = state
        .catalog_service
        .get_all_mpa()?
        .into_iter()
        .map(|mpa| mpa.name)
        .collect();
    log::info!("MPA ratings: {}", ratings.join(", "));

    let popular = state
        .like_service
        .get_popular(filmorate::DEFAULT_POPULAR_COUNT)?;
    for (rank, film) in popular.iter().enumerate() {
        log::info!("#{} {} (id {})", rank + 1, film.name, film.id);
    }

    Ok(())
}
