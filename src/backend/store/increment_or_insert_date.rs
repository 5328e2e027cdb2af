use chrono::NaiveDate;
use rusqlite::params;

use super::{format_date, TallyStore};

impl TallyStore {
    /// Count one more finished block on `date`.
    pub fn increment_or_insert_date(&self, date: NaiveDate) -> rusqlite::Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO tally (date, blocks) VALUES (?1, 1)
             ON CONFLICT(date) DO UPDATE SET blocks = blocks + 1",
            params![format_date(date)],
        )?;

        Ok(())
    }
}
