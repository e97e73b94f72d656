use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

pub const DEFAULT_DATABASE_PATH: &str = "taskboard.db";

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);

    // Every pooled connection to sqlite::memory: opens its own empty database
    if database_url.contains(":memory:") {
        opt.max_connections(1).min_connections(1);
    } else {
        // SQLite serialises writes; a small pool is enough
        opt.max_connections(10).min_connections(1);
    }

    opt.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    Database::connect(opt).await
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(path) if path == ":memory:" => "sqlite::memory:".to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => format!("sqlite://{}?mode=rwc", DEFAULT_DATABASE_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_urls() {
        assert_eq!(get_database_url(Some(":memory:")), "sqlite::memory:");
        assert_eq!(
            get_database_url(Some("/tmp/board.db")),
            "sqlite:///tmp/board.db?mode=rwc"
        );
        assert_eq!(get_database_url(None), "sqlite://taskboard.db?mode=rwc");
    }
}
