//! SQLite-backed key-value medium over the `kv_entries` table.

use super::{KeyValueMedium, MediumResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Durable medium borrowing a migrated connection from `db::open_db`.
pub struct SqliteMedium<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMedium<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueMedium for SqliteMedium<'_> {
    fn get(&self, key: &str) -> MediumResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> MediumResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteMedium;
    use crate::db::open_db_in_memory;
    use crate::medium::KeyValueMedium;

    #[test]
    fn upsert_overwrites_existing_key() {
        let conn = open_db_in_memory().unwrap();
        let mut medium = SqliteMedium::new(&conn);

        assert_eq!(medium.get("theme").unwrap(), None);
        medium.set("theme", "light").unwrap();
        medium.set("theme", "dark").unwrap();

        assert_eq!(medium.get("theme").unwrap().as_deref(), Some("dark"));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
