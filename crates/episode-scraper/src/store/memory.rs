use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::EpisodeStore;
use crate::error::{Result, ScrapeError};
use crate::types::{Episode, EpisodeKey};

/// In-memory episode store keyed by identity
#[derive(Debug, Default)]
pub struct MemoryEpisodeStore {
    episodes: Mutex<HashMap<EpisodeKey, Episode>>,
}

impl MemoryEpisodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored episode, in no particular order
    pub fn all(&self) -> Vec<Episode> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<EpisodeKey, Episode>> {
        self.episodes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EpisodeStore for MemoryEpisodeStore {
    async fn find_by_identity(&self, key: &EpisodeKey) -> Result<Option<Episode>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn save(&self, episode: &Episode) -> Result<Episode> {
        match self.lock().entry(episode.key()) {
            Entry::Occupied(existing) => Err(ScrapeError::DuplicateEpisode {
                title: existing.key().title.clone(),
                date: existing.key().iso_date(),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(episode.clone()).clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn episode(title: &str, url: &str) -> Episode {
        Episode {
            title: title.to_string(),
            url: url.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            notes: vec![],
            links: BTreeMap::new(),
            number: "1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_then_find() {
        let store = MemoryEpisodeStore::new();
        let ep = episode("Leap", "https://a/leap");
        assert!(store.find_by_identity(&ep.key()).await.unwrap().is_none());

        store.save(&ep).await.unwrap();
        let found = store.find_by_identity(&ep.key()).await.unwrap().unwrap();
        assert_eq!(found.url, "https://a/leap");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_identity_lookup_ignores_url() {
        let store = MemoryEpisodeStore::new();
        store.save(&episode("Leap", "https://a/leap")).await.unwrap();
        let other = episode("Leap", "https://mirror/leap");
        assert!(store.find_by_identity(&other.key()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_identity_rejected() {
        let store = MemoryEpisodeStore::new();
        store.save(&episode("Leap", "https://a/leap")).await.unwrap();

        let err = store.save(&episode("Leap", "https://mirror/leap")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(matches!(err, ScrapeError::DuplicateEpisode { ref title, .. } if title == "Leap"));

        let kept = store.find_by_identity(&episode("Leap", "").key()).await.unwrap().unwrap();
        assert_eq!(kept.url, "https://a/leap");
        assert_eq!(store.len(), 1);
    }
}
