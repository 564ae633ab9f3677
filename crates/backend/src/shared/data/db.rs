use once_cell::sync::OnceCell;
use sea_orm::{Database, DatabaseConnection};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub(crate) fn build_sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Opens the SQLite file (creating it and its directory if needed).
/// Schema comes from the migrations, which must run first.
pub async fn initialize_database(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_path.is_absolute() {
        db_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_path)
    };
    let db_url = build_sqlite_url(&absolute_path);
    tracing::info!("Connecting to database: {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_url_keeps_unix_paths() {
        assert_eq!(
            build_sqlite_url(Path::new("/var/lib/app.db")),
            "sqlite:///var/lib/app.db?mode=rwc"
        );
    }

    #[test]
    fn sqlite_url_normalizes_windows_paths() {
        assert_eq!(
            build_sqlite_url(Path::new("C:\\data\\app.db")),
            "sqlite:///C:/data/app.db?mode=rwc"
        );
    }
}
