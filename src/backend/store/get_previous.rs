use chrono::NaiveDate;
use rusqlite::params;
use std::collections::HashMap;
use std::iter::successors;

use crate::log_warn;

use super::{format_date, parse_date, TallyStore};

impl TallyStore {
    /// The `n` days ending at `end`, oldest first. Days without a row count 0.
    pub fn get_previous(&self, end: NaiveDate, n: usize) -> rusqlite::Result<Vec<(NaiveDate, u32)>> {
        let mut days: Vec<NaiveDate> = successors(Some(end), |day| day.pred_opt())
            .take(n)
            .collect();
        days.reverse();

        let (Some(first), Some(last)) = (days.first(), days.last()) else {
            return Ok(Vec::new());
        };

        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT date, blocks FROM tally WHERE date BETWEEN ?1 AND ?2"
        )?;

        let rows = stmt.query_map(params![format_date(*first), format_date(*last)], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
        })?;

        let mut block_map = HashMap::new();
        for row in rows {
            let (date, blocks) = row?;
            match parse_date(&date) {
                Some(date) => {
                    block_map.insert(date, blocks);
                }
                None => log_warn!("Skipping tally row with unreadable date: {}", date),
            }
        }

        Ok(days
            .into_iter()
            .map(|day| (day, block_map.get(&day).copied().unwrap_or(0)))
            .collect())
    }
}
