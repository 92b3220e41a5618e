use crate::schema;
use crate::util::{decode_postback, encode_postback, DbError};
use pb_core::error::PostbackError;
use pb_core::store::PostbackRepository;
use pb_core::types::Postback;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// SQLite-backed postback log.
///
/// Every operation opens its own connection; WAL mode is switched on once,
/// on open or before the first insert. Writes take an immediate
/// transaction, so SQLite admits one writer at a time; reads run in a
/// deferred transaction and see a WAL snapshot. Dropping an uncommitted
/// transaction rolls it back.
#[derive(Debug)]
pub struct DbStore {
    path: PathBuf,
    wal_enabled: AtomicBool,
}

impl DbStore {
    /// Opens the database at `path` and creates the postbacks table up front.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PostbackError> {
        let store = Self::new(path);
        schema::open_and_migrate(&store.path).map_err(PostbackError::persistence)?;
        store.wal_enabled.store(true, Ordering::Release);
        Ok(store)
    }

    /// Like [`DbStore::open`] but defers table creation to the first insert.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            wal_enabled: AtomicBool::new(false),
        }
    }

    fn ensure_wal(&self) -> Result<(), PostbackError> {
        if self.wal_enabled.load(Ordering::Acquire) {
            return Ok(());
        }
        let conn = self.connection()?;
        schema::enable_wal(&conn).map_err(PostbackError::persistence)?;
        self.wal_enabled.store(true, Ordering::Release);
        Ok(())
    }

    pub fn connection(&self) -> Result<Connection, PostbackError> {
        schema::open(&self.path).map_err(PostbackError::persistence)
    }

    fn with_write_tx<F, T>(&self, f: F) -> Result<T, PostbackError>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    {
        let mut conn = self.connection()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(PostbackError::persistence)?;
        let value = f(&tx).map_err(PostbackError::persistence)?;
        tx.commit().map_err(PostbackError::persistence)?;
        Ok(value)
    }

    fn with_read_tx<F, T>(&self, f: F) -> Result<T, PostbackError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, PostbackError>,
    {
        let mut conn = self.connection()?;
        let tx = conn.transaction().map_err(PostbackError::persistence)?;
        f(&tx)
    }
}

impl PostbackRepository for DbStore {
    fn insert(&self, postback: &Postback) -> Result<(), PostbackError> {
        if postback.id.is_empty() {
            return Err(PostbackError::InvalidInput {
                message: "postback id must not be empty".to_string(),
            });
        }
        let data = encode_postback(postback).map_err(PostbackError::persistence)?;
        self.ensure_wal()?;
        self.with_write_tx(|tx| {
            if !schema::table_exists(tx)? {
                schema::migrate(tx)?;
            }
            tx.execute(
                "INSERT OR REPLACE INTO postbacks (id, data) VALUES (?1, ?2)",
                params![postback.id.as_str(), data],
            )?;
            Ok(())
        })
    }

    fn list_recent(&self, limit: i64) -> Result<Vec<Postback>, PostbackError> {
        let limit = match usize::try_from(limit) {
            Ok(0) | Err(_) => return Ok(Vec::new()),
            Ok(limit) => limit,
        };
        self.with_read_tx(|tx| {
            if !schema::table_exists(tx).map_err(PostbackError::persistence)? {
                return Ok(Vec::new());
            }
            let mut stmt = tx
                .prepare("SELECT id, data FROM postbacks ORDER BY id DESC")
                .map_err(PostbackError::persistence)?;
            let mut rows = stmt.query([]).map_err(PostbackError::persistence)?;
            let mut postbacks = Vec::with_capacity(limit.min(64));
            while postbacks.len() < limit {
                let Some(row) = rows.next().map_err(PostbackError::persistence)? else {
                    break;
                };
                match map_postback_row(row) {
                    Ok(postback) => postbacks.push(postback),
                    Err(err) => {
                        let key = row.get_ref(0).ok().and_then(|value| value.as_str().ok());
                        tracing::warn!(key = ?key, error = %err, "skipping malformed postback");
                    }
                }
            }
            Ok(postbacks)
        })
    }

    fn delete(&self, id: &str) -> Result<(), PostbackError> {
        self.with_write_tx(|tx| {
            if !schema::table_exists(tx)? {
                return Ok(());
            }
            tx.execute("DELETE FROM postbacks WHERE id = ?1", [id])?;
            Ok(())
        })
    }
}

fn map_postback_row(row: &Row<'_>) -> Result<Postback, DbError> {
    let value = row.get_ref(1).map_err(|err| DbError::Decode {
        message: err.to_string(),
    })?;
    let bytes = value.as_bytes().map_err(|err| DbError::Decode {
        message: err.to_string(),
    })?;
    decode_postback(bytes)
}
