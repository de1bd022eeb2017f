//! Repositories over the record store: the profile, the mood log and the
//! journal log.
//!
//! Every read decodes and validates the stored JSON. The `try_*` readers
//! surface a `StorageError::Read` for unreadable data; the plain readers
//! fall back to absent/empty so history problems never block the user.

pub mod log;
pub mod profile;

pub use log::{AppendLog, LogEntry, SerializedLog, UnguardedLog};
pub use profile::ProfileRepository;

use mindnest_core::error::StorageError;
use mindnest_core::record::{JournalEntry, MoodEntry, Profile};
use mindnest_core::store::RecordStore;
use std::sync::Arc;
use tracing::info;

/// How log appends are protected against each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppendStrategy {
    /// Plain read-modify-write; overlapping appends may lose an entry.
    #[default]
    Unguarded,
    /// Appends through the same log wait for each other.
    Serialized,
}

impl AppendStrategy {
    pub fn from_config(serialize_appends: bool) -> Self {
        if serialize_appends {
            Self::Serialized
        } else {
            Self::Unguarded
        }
    }

    fn build<T: LogEntry>(self, store: Arc<dyn RecordStore>) -> Arc<dyn AppendLog<T>> {
        match self {
            Self::Unguarded => Arc::new(UnguardedLog::<T>::new(store)),
            Self::Serialized => Arc::new(SerializedLog::<T>::new(store)),
        }
    }
}

/// Counts shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub profile: Option<Profile>,
    pub mood_entries: usize,
    pub journal_entries: usize,
}

/// The three repositories sharing one record store.
#[derive(Clone)]
pub struct Records {
    store: Arc<dyn RecordStore>,
    profile: ProfileRepository,
    moods: Arc<dyn AppendLog<MoodEntry>>,
    journal: Arc<dyn AppendLog<JournalEntry>>,
}

impl Records {
    /// Repositories with the default (unguarded) append strategy.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_strategy(store, AppendStrategy::default())
    }

    pub fn with_strategy(store: Arc<dyn RecordStore>, strategy: AppendStrategy) -> Self {
        Self {
            profile: ProfileRepository::new(store.clone()),
            moods: strategy.build(store.clone()),
            journal: strategy.build(store.clone()),
            store,
        }
    }

    pub fn profile(&self) -> &ProfileRepository {
        &self.profile
    }

    pub fn moods(&self) -> &dyn AppendLog<MoodEntry> {
        self.moods.as_ref()
    }

    pub fn journal(&self) -> &dyn AppendLog<JournalEntry> {
        self.journal.as_ref()
    }

    /// Name of the underlying store backend.
    pub fn backend(&self) -> &str {
        self.store.name()
    }

    pub async fn summary(&self) -> Summary {
        Summary {
            profile: self.profile.load().await,
            mood_entries: self.moods.all().await.len(),
            journal_entries: self.journal.all().await.len(),
        }
    }

    /// Forget everything: profile, moods and journal.
    pub async fn sign_out(&self) -> Result<(), StorageError> {
        self.store.clear().await?;
        info!(backend = self.store.name(), "Signed out; record store cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindnest_core::record::{AgeGroup, Gender, Mood};
    use mindnest_storage::InMemoryStore;

    fn profile() -> Profile {
        Profile {
            name: "Ravi".into(),
            gender: Gender::Male,
            age_group: AgeGroup::From19To25,
        }
    }

    #[tokio::test]
    async fn summary_counts_entries() {
        let records = Records::new(Arc::new(InMemoryStore::new()));
        records.profile().save(&profile()).await.unwrap();
        records
            .moods()
            .append(MoodEntry::record(Some(Mood::Happy), "good").unwrap())
            .await
            .unwrap();
        records
            .journal()
            .append(JournalEntry::write("dear diary").unwrap())
            .await
            .unwrap();
        records
            .journal()
            .append(JournalEntry::write("again").unwrap())
            .await
            .unwrap();

        let summary = records.summary().await;
        assert_eq!(summary.profile, Some(profile()));
        assert_eq!(summary.mood_entries, 1);
        assert_eq!(summary.journal_entries, 2);
    }

    #[tokio::test]
    async fn sign_out_clears_whole_namespace() {
        let records = Records::with_strategy(
            Arc::new(InMemoryStore::new()),
            AppendStrategy::Serialized,
        );
        records.profile().save(&profile()).await.unwrap();
        records
            .moods()
            .append(MoodEntry::record(Some(Mood::Sad), "meh").unwrap())
            .await
            .unwrap();

        records.sign_out().await.unwrap();

        let summary = records.summary().await;
        assert!(summary.profile.is_none());
        assert_eq!(summary.mood_entries, 0);
        assert_eq!(summary.journal_entries, 0);
    }

    #[test]
    fn strategy_from_config() {
        assert_eq!(AppendStrategy::from_config(false), AppendStrategy::Unguarded);
        assert_eq!(AppendStrategy::from_config(true), AppendStrategy::Serialized);
    }
}
