use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{format_date, TallyStore};

impl TallyStore {
    pub fn get_blocks(&self, date: NaiveDate) -> rusqlite::Result<u32> {
        let conn = self.lock()?;

        let blocks = conn
            .query_row(
                "SELECT blocks FROM tally WHERE date = ?1",
                params![format_date(date)],
                |row| row.get(0),
            )
            .optional()?;

        Ok(blocks.unwrap_or(0))
    }
}
