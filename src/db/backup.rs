// One-way backup snapshots. Restore is deliberately not offered: swapping
// the database file requires every thread-local connection to be closed
// first, and the server keeps them open for its lifetime.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use log::info;
use rusqlite::backup::Backup;
use rusqlite::Connection;

use crate::db::connection::Database;
use crate::errors::ServerError;

/// Write a consistent snapshot of the live database into `backup_dir`,
/// named with a timestamp. Uses SQLite's online backup, so it is safe
/// against the open connection and never touches the live file.
pub fn backup_to_dir(db: &Database, backup_dir: &Path) -> Result<PathBuf, ServerError> {
    std::fs::create_dir_all(backup_dir)?;

    let stamp = Utc::now().format("%Y%m%d-%H%M%S");
    let dest_path = backup_dir.join(format!("sweepcrm-{stamp}.db"));

    db.with_conn(|conn| {
        let mut dest = Connection::open(&dest_path)
            .map_err(|e| ServerError::IoError(format!("Open backup file failed: {e}")))?;
        let backup = Backup::new(conn, &mut dest)?;
        backup.run_to_completion(64, Duration::from_millis(25), None)?;
        Ok(())
    })?;

    info!("backup written to {}", dest_path.display());
    Ok(dest_path)
}
