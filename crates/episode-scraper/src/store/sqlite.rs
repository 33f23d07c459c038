use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::EpisodeStore;
use crate::error::{Result, ScrapeError};
use crate::types::{Episode, EpisodeKey};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS episodes (
        id         INTEGER PRIMARY KEY,
        title      TEXT NOT NULL,
        date       TEXT NOT NULL,
        url        TEXT NOT NULL,
        notes      TEXT NOT NULL,
        links      TEXT NOT NULL,
        number     TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(title, date)
    );
    CREATE INDEX IF NOT EXISTS idx_episodes_url ON episodes(url);
";

const SELECT_COLUMNS: &str = "SELECT title, url, date, notes, links, number FROM episodes";

/// SQLite-backed episode store
///
/// Notes and links are kept as JSON text, the date as `YYYY-MM-DD`. The table
/// is created on open if it does not exist yet.
pub struct SqliteEpisodeStore {
    conn: Mutex<Connection>,
}

/// Raw column values before conversion back into an [`Episode`]
struct EpisodeRow {
    title: String,
    url: String,
    date: String,
    notes: String,
    links: String,
    number: String,
}

impl EpisodeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            title: row.get(0)?,
            url: row.get(1)?,
            date: row.get(2)?,
            notes: row.get(3)?,
            links: row.get(4)?,
            number: row.get(5)?,
        })
    }

    fn into_episode(self) -> Result<Episode> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| ScrapeError::DateParse(self.date.clone()))?;
        Ok(Episode {
            title: self.title,
            url: self.url,
            date,
            notes: serde_json::from_str(&self.notes)?,
            links: serde_json::from_str(&self.links)?,
            number: self.number,
        })
    }
}

impl SqliteEpisodeStore {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored episodes
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .lock()
            .query_row("SELECT COUNT(*) FROM episodes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Every stored episode, newest first
    pub fn all(&self) -> Result<Vec<Episode>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY date DESC, id DESC"))?;
        let rows = stmt
            .query_map([], EpisodeRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(EpisodeRow::into_episode).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EpisodeStore for SqliteEpisodeStore {
    async fn find_by_identity(&self, key: &EpisodeKey) -> Result<Option<Episode>> {
        let row = self
            .lock()
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE title = ?1 AND date = ?2"),
                params![key.title, key.iso_date()],
                EpisodeRow::from_row,
            )
            .optional()?;
        row.map(EpisodeRow::into_episode).transpose()
    }

    async fn save(&self, episode: &Episode) -> Result<Episode> {
        let notes = serde_json::to_string(&episode.notes)?;
        let links = serde_json::to_string(&episode.links)?;
        let key = episode.key();

        self.lock().execute(
            "INSERT INTO episodes (title, date, url, notes, links, number)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![key.title, key.iso_date(), episode.url, notes, links, episode.number],
        )?;
        tracing::debug!(title = %episode.title, date = %episode.date, "saved episode");

        Ok(episode.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::BTreeMap;

    fn episode(title: &str, day: u32) -> Episode {
        Episode {
            title: title.to_string(),
            url: format!("https://show.captivate.fm/episode/{day}"),
            date: NaiveDate::from_ymd_opt(2023, 6, day).unwrap(),
            notes: vec!["Intro".to_string(), "Outro".to_string()],
            links: BTreeMap::from([("Guest".to_string(), "https://guest.example".to_string())]),
            number: day.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let store = SqliteEpisodeStore::open_in_memory().unwrap();
        let ep = episode("Summer", 21);
        store.save(&ep).await.unwrap();

        let found = store.find_by_identity(&ep.key()).await.unwrap().unwrap();
        assert_eq!(found, ep);
        assert_eq!(found.url, ep.url);
        assert_eq!(found.notes, ep.notes);
        assert_eq!(found.links, ep.links);
        assert_eq!(found.number, "21");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = SqliteEpisodeStore::open_in_memory().unwrap();
        store.save(&episode("Summer", 21)).await.unwrap();

        let other_date = EpisodeKey::new("Summer", NaiveDate::from_ymd_opt(2023, 6, 22).unwrap());
        assert!(store.find_by_identity(&other_date).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_identity_rejected() {
        let store = SqliteEpisodeStore::open_in_memory().unwrap();
        store.save(&episode("Summer", 21)).await.unwrap();

        let mut again = episode("Summer", 21);
        again.url = "https://elsewhere/summer".to_string();
        let err = store.save(&again).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_all_newest_first() {
        let store = SqliteEpisodeStore::open_in_memory().unwrap();
        store.save(&episode("Early", 1)).await.unwrap();
        store.save(&episode("Late", 30)).await.unwrap();

        let titles: Vec<String> = store.all().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Late", "Early"]);
    }

    #[test]
    fn test_open_creates_schema_once() {
        let dir = std::env::temp_dir().join(format!("episode-scraper-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("episodes.sqlite");

        SqliteEpisodeStore::open(&path).unwrap();
        let reopened = SqliteEpisodeStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 0);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
