use std::path::Path;

use rusqlite::{Connection, OpenFlags, params};
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::normalize::ScorerRecord;

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS top_scorers (
        position INT,
        player VARCHAR(255),
        club VARCHAR(255),
        total_goals INT,
        penalty_goals INT,
        assists INT,
        matches INT,
        mins INT,
        age INT,
        PRIMARY KEY (player, club)
    );
"#;

const UPSERT_SQL: &str = r#"
    INSERT INTO top_scorers (
        position, player, club, total_goals, penalty_goals,
        assists, matches, mins, age
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(player, club) DO UPDATE SET
        position = excluded.position,
        total_goals = excluded.total_goals,
        penalty_goals = excluded.penalty_goals,
        assists = excluded.assists,
        matches = excluded.matches,
        mins = excluded.mins,
        age = excluded.age
"#;

/// Opens the scorer database. The parent directory must already exist.
pub fn connect(db: &DatabaseConfig) -> Result<Connection, StoreError> {
    match open_at(&db.path) {
        Ok(conn) => {
            info!(path = %db.path.display(), "database connection successful");
            Ok(conn)
        }
        Err(err) => {
            error!("[{}]: {}", err.marker(), err);
            Err(err)
        }
    }
}

fn open_at(path: &Path) -> Result<Connection, StoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Connection::open_with_flags(path, flags).map_err(|err| StoreError::Connect {
        path: path.display().to_string(),
        err,
    })
}

pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    match conn.execute_batch(CREATE_TABLE_SQL) {
        Ok(()) => {
            info!("top_scorers table ready");
            Ok(())
        }
        Err(source) => {
            let err = StoreError::Schema(source);
            error!("[{}]: {}", err.marker(), err);
            Err(err)
        }
    }
}

/// Inserts each scorer or overwrites the row already stored under the same
/// (player, club). All rows are committed in one transaction.
pub fn upsert_scorers(conn: &mut Connection, records: &[ScorerRecord]) -> Result<usize, StoreError> {
    let tx = conn.transaction().map_err(StoreError::Upsert)?;
    {
        let mut stmt = tx.prepare_cached(UPSERT_SQL).map_err(StoreError::Upsert)?;
        for r in records {
            stmt.execute(params![
                r.position,
                r.player,
                r.club,
                r.total_goals,
                r.penalty_goals,
                r.assists,
                r.matches,
                r.mins,
                r.age,
            ])
            .map_err(StoreError::Upsert)?;
        }
    }
    tx.commit().map_err(StoreError::Upsert)?;
    info!(rows = records.len(), "data inserted or updated");
    Ok(records.len())
}

pub fn load_scorers(conn: &Connection) -> Result<Vec<ScorerRecord>, StoreError> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT position, player, club, total_goals, penalty_goals,
                   assists, matches, mins, age
            FROM top_scorers
            ORDER BY position ASC, player ASC
            "#,
        )
        .map_err(StoreError::Load)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ScorerRecord {
                position: row.get(0)?,
                player: row.get(1)?,
                club: row.get(2)?,
                total_goals: row.get(3)?,
                penalty_goals: row.get(4)?,
                assists: row.get(5)?,
                matches: row.get(6)?,
                mins: row.get(7)?,
                age: row.get(8)?,
            })
        })
        .map_err(StoreError::Load)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(StoreError::Load)?);
    }
    Ok(out)
}
