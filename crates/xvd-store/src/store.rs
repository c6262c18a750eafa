//! SQLite tick table: schema, inserts, time-ordered reads.

use crate::error::StoreResult;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, warn};
use xvd_core::Tick;

/// Milliseconds per minute, for lookback-window arithmetic.
pub const MS_PER_MIN: i64 = 60_000;

/// Schema applied idempotently on open.
///
/// WAL mode lets a detection run read while a collector is still writing.
/// The composite primary key makes a re-polled `(ts, venue)` pair replace
/// its previous row instead of duplicating it.
const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS ticks (
    ts_ms INTEGER NOT NULL,
    venue TEXT NOT NULL,
    bid REAL,
    ask REAL,
    mid REAL,
    PRIMARY KEY (ts_ms, venue)
);
"#;

/// Tick store over a single SQLite database file.
pub struct TickStore {
    conn: Connection,
}

impl TickStore {
    /// Open (creating if needed) the database at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        debug!(path = %path.display(), "Opened tick store");
        Ok(Self { conn })
    }

    /// Open an in-memory store. Used by tests and ad-hoc replays.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Insert one tick, replacing any existing row for `(ts_ms, venue)`.
    pub fn insert_tick(&self, tick: &Tick) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO ticks (ts_ms, venue, bid, ask, mid)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![tick.ts_ms, tick.venue, tick.bid, tick.ask, tick.mid],
        )?;
        Ok(())
    }

    /// Insert a batch of ticks in one transaction.
    ///
    /// The collector calls this once per polling cycle so a cycle's venues
    /// land atomically.
    pub fn insert_batch(&mut self, ticks: &[Tick]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO ticks (ts_ms, venue, bid, ask, mid)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for tick in ticks {
                stmt.execute(params![
                    tick.ts_ms, tick.venue, tick.bid, tick.ask, tick.mid
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Latest timestamp in the store, or `None` if empty.
    pub fn max_ts(&self) -> StoreResult<Option<i64>> {
        let max: Option<i64> = self
            .conn
            .query_row("SELECT MAX(ts_ms) FROM ticks", [], |row| row.get(0))?;
        Ok(max)
    }

    /// Total number of tick rows.
    pub fn count(&self) -> StoreResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM ticks", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Start of a lookback window ending at the latest stored timestamp.
    ///
    /// `None` when the store is empty (there is no window to replay).
    pub fn lookback_start(&self, lookback_min: i64) -> StoreResult<Option<i64>> {
        Ok(self.max_ts()?.map(|max| max - lookback_min * MS_PER_MIN))
    }

    /// All ticks with `ts_ms >= min_ts`, ascending by `(ts_ms, venue)`.
    ///
    /// `min_ts = None` reads the full history. Ordering by venue within a
    /// timestamp makes same-instant replays deterministic. Rows with NULL
    /// or non-finite prices, or crossed quotes, are skipped with a warning
    /// rather than failing the read.
    pub fn ticks_since(&self, min_ts: Option<i64>) -> StoreResult<Vec<Tick>> {
        let mut stmt = self.conn.prepare(
            "SELECT ts_ms, venue, bid, ask, mid FROM ticks
             WHERE ts_ms >= ?1 ORDER BY ts_ms ASC, venue ASC",
        )?;
        let bound = min_ts.unwrap_or(i64::MIN);
        let rows = stmt.query_map(params![bound], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<f64>>(4)?,
            ))
        })?;

        let mut ticks = Vec::new();
        let mut skipped = 0usize;
        for row in rows {
            let (ts_ms, venue, bid, ask, mid) = row?;
            match (bid, ask, mid) {
                (Some(bid), Some(ask), Some(mid)) => {
                    let tick = Tick {
                        ts_ms,
                        venue,
                        bid,
                        ask,
                        mid,
                    };
                    if tick.is_valid() {
                        ticks.push(tick);
                    } else {
                        skipped += 1;
                    }
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(skipped, "Skipped tick rows with missing or invalid quotes");
        }
        Ok(ticks)
    }
}
