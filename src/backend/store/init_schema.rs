use super::TallyStore;

impl TallyStore {
    pub(super) fn init_schema(&self) -> rusqlite::Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS tally (
                date TEXT PRIMARY KEY,
                blocks INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        Ok(())
    }
}
