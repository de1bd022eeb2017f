//! Profile repository: the singleton `userProfile` record.

use mindnest_core::error::{Error, StorageError};
use mindnest_core::record::Profile;
use mindnest_core::store::{RecordStore, keys};
use std::sync::Arc;
use tracing::{error, info, warn};

/// CRUD over the one profile record. Saving replaces the whole profile.
#[derive(Clone)]
pub struct ProfileRepository {
    store: Arc<dyn RecordStore>,
}

impl ProfileRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The stored profile, surfacing decode failures.
    pub async fn try_load(&self) -> Result<Option<Profile>, StorageError> {
        let Some(blob) = self.store.get(keys::USER_PROFILE).await? else {
            return Ok(None);
        };

        let profile: Profile = serde_json::from_str(&blob)
            .map_err(|e| StorageError::read(keys::USER_PROFILE, e))?;
        profile
            .validate()
            .map_err(|e| StorageError::read(keys::USER_PROFILE, e))?;
        Ok(Some(profile))
    }

    /// The stored profile. Absent before onboarding; an unreadable profile
    /// also reads as absent.
    pub async fn load(&self) -> Option<Profile> {
        match self.try_load().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Unreadable profile treated as absent");
                None
            }
        }
    }

    /// Replace the stored profile. Rejects a profile with a blank name.
    pub async fn save(&self, profile: &Profile) -> Result<(), Error> {
        profile.validate()?;

        let blob = serde_json::to_string(profile)?;
        self.store
            .set(keys::USER_PROFILE, blob)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to save profile"))?;

        info!(gender = %profile.gender, age_group = %profile.age_group, "Profile saved");
        Ok(())
    }
}
