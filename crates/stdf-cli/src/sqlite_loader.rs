//! A [`Loader`] backed by a single SQLite database, selected with
//! `-d/--database` (spec §7: "a relational-store collaborator").

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use stdf_core::loader::{Loader, LoaderError};
use stdf_core::types::{AtdfRecord, RecordCollection};

/// Writes ATDF records into one table per [`stdf_core::RecordType`], with
/// columns named after the ATDF template's field names — `PTR` rows land
/// in a `PTR` table with a `test_number`/`head_number`/... column per
/// template field, rather than a generic key-value layout, so the
/// database can be queried the way an ATDF-aware tool would expect.
/// `rusqlite::Connection` isn't `Sync`, so writes are serialized behind a
/// mutex — conversion itself still runs in parallel across files; only
/// the final insert per file is exclusive.
pub struct SqliteLoader {
    conn: Mutex<Connection>,
    known_tables: Mutex<HashSet<&'static str>>,
}

impl SqliteLoader {
    pub fn open(path: &Path) -> Result<Self, LoaderError> {
        let conn = Connection::open(path).map_err(|e| LoaderError::Backend(e.to_string()))?;
        Ok(Self { conn: Mutex::new(conn), known_tables: Mutex::new(HashSet::new()) })
    }

    /// Creates `tag`'s table on first sight, with one `TEXT` column per
    /// field name plus `source_file`. Every record of a given
    /// [`stdf_core::RecordType`] shares the same template, so the first
    /// record's field names fix the table's columns for the run.
    fn ensure_table(
        conn: &Connection,
        tag: &'static str,
        record: &AtdfRecord,
    ) -> Result<(), LoaderError> {
        let mut ddl = format!("CREATE TABLE IF NOT EXISTS \"{tag}\" (source_file TEXT NOT NULL");
        for (name, _) in record.fields.iter() {
            ddl.push_str(&format!(", \"{name}\" TEXT"));
        }
        ddl.push(')');
        conn.execute(&ddl, []).map_err(|e| LoaderError::Backend(e.to_string()))?;
        conn.execute(
            &format!(
                "CREATE INDEX IF NOT EXISTS \"idx_{tag}_source\" ON \"{tag}\"(source_file)"
            ),
            [],
        )
        .map_err(|e| LoaderError::Backend(e.to_string()))?;
        Ok(())
    }
}

impl Loader for SqliteLoader {
    fn load(&self, source_path: &Path, records: &RecordCollection) -> Result<(), LoaderError> {
        let source = source_path.to_string_lossy().into_owned();
        let conn = self.conn.lock().expect("sqlite loader mutex poisoned");
        let mut known = self.known_tables.lock().expect("sqlite loader mutex poisoned");
        let tx = conn.unchecked_transaction().map_err(|e| LoaderError::Backend(e.to_string()))?;

        for (record_type, recs) in &records.by_type {
            let Some(first) = recs.first() else { continue };
            let tag = record_type.tag();
            if known.insert(tag) {
                Self::ensure_table(&tx, tag, first)?;
            }

            let columns: Vec<&'static str> = first.fields.iter().map(|(name, _)| *name).collect();
            let mut column_list = String::from("source_file");
            let mut placeholders = String::from("?1");
            for (i, name) in columns.iter().enumerate() {
                column_list.push_str(&format!(", \"{name}\""));
                placeholders.push_str(&format!(", ?{}", i + 2));
            }
            let sql =
                format!("INSERT INTO \"{tag}\" ({column_list}) VALUES ({placeholders})");
            let mut stmt =
                tx.prepare_cached(&sql).map_err(|e| LoaderError::Backend(e.to_string()))?;

            for record in recs {
                let mut params: Vec<String> = Vec::with_capacity(columns.len() + 1);
                params.push(source.clone());
                for name in &columns {
                    let value = record.fields.get(name).map(|v| v.render()).unwrap_or_default();
                    params.push(value);
                }
                stmt.execute(rusqlite::params_from_iter(params.iter()))
                    .map_err(|e| LoaderError::Backend(e.to_string()))?;
            }
        }

        drop(known);
        tx.commit().map_err(|e| LoaderError::Backend(e.to_string()))?;
        Ok(())
    }
}
