//! Durable record types: the user profile, mood entries and journal entries.
//!
//! These are the values persisted in the record store. Their JSON shape is
//! the on-disk format, so field names and enum spellings are fixed.

use crate::error::ValidationError;
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Profile ───────────────────────────────────────────────────────────────

/// Self-described gender, as chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Transgender,
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Transgender,
        Gender::PreferNotToSay,
    ];

    /// The stored spelling (`prefer_not_to_say`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Transgender => "transgender",
            Gender::PreferNotToSay => "prefer_not_to_say",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "gender",
                value: s.to_string(),
            })
    }
}

/// Age bracket, as chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-12")]
    UpTo12,
    #[serde(rename = "13-18")]
    From13To18,
    #[serde(rename = "19-25")]
    From19To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-50")]
    From36To50,
    #[serde(rename = "51+")]
    Over50,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::UpTo12,
        AgeGroup::From13To18,
        AgeGroup::From19To25,
        AgeGroup::From26To35,
        AgeGroup::From36To50,
        AgeGroup::Over50,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::UpTo12 => "0-12",
            AgeGroup::From13To18 => "13-18",
            AgeGroup::From19To25 => "19-25",
            AgeGroup::From26To35 => "26-35",
            AgeGroup::From36To50 => "36-50",
            AgeGroup::Over50 => "51+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AgeGroup::ALL
            .into_iter()
            .find(|a| a.as_str() == trimmed)
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "age group",
                value: s.to_string(),
            })
    }
}

/// The singleton user profile.
///
/// Always fully populated once persisted; it is replaced wholesale, never
/// patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub gender: Gender,
    pub age_group: AgeGroup,
}

impl Profile {
    /// Check the invariants a persisted profile must hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingProfileFields(vec!["name"]));
        }
        Ok(())
    }
}

/// Partially filled onboarding form.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub age_group: Option<AgeGroup>,
}

impl ProfileDraft {
    /// Turn the draft into a profile, reporting every missing field at once.
    pub fn build(self) -> Result<Profile, ValidationError> {
        let name = self.name.filter(|n| !n.trim().is_empty());

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("name");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.age_group.is_none() {
            missing.push("age group");
        }

        match (name, self.gender, self.age_group) {
            (Some(name), Some(gender), Some(age_group)) => Ok(Profile {
                name,
                gender,
                age_group,
            }),
            _ => Err(ValidationError::MissingProfileFields(missing)),
        }
    }
}

// ── Mood ──────────────────────────────────────────────────────────────────

/// The fixed, emoji-coded mood scale. Stored as the emoji itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "😢")]
    Sad,
    #[serde(rename = "😕")]
    Moody,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "🙂")]
    Happy,
    #[serde(rename = "😄")]
    VeryHappy,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Sad,
        Mood::Moody,
        Mood::Neutral,
        Mood::Happy,
        Mood::VeryHappy,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Sad => "😢",
            Mood::Moody => "😕",
            Mood::Neutral => "😐",
            Mood::Happy => "🙂",
            Mood::VeryHappy => "😄",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Sad => "Sad",
            Mood::Moody => "Moody",
            Mood::Neutral => "Neutral",
            Mood::Happy => "Happy",
            Mood::VeryHappy => "Very Happy",
        }
    }

    /// A small coping suggestion shown after picking this mood.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Mood::Sad => "Try writing about something you're grateful for.",
            Mood::Moody => "Take a break and go for a short walk.",
            Mood::Neutral => "Reflect on a small win today.",
            Mood::Happy => "Celebrate your positive vibes—maybe share a smile with someone.",
            Mood::VeryHappy => {
                "Write down what made you feel this way so you can revisit it later."
            }
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emoji())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    /// Accepts the emoji or the label (`very happy`, `very_happy`, `Sad`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase().replace(['_', '-'], " ");
        Mood::ALL
            .into_iter()
            .find(|m| m.emoji() == trimmed || m.label().to_lowercase() == normalized)
            .ok_or_else(|| ValidationError::UnknownValue {
                field: "mood",
                value: s.to_string(),
            })
    }
}

/// One self-reported mood check-in. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// ISO-8601 instant, e.g. `2024-01-01T09:30:00.000Z`.
    pub date: String,
    #[serde(default)]
    pub mood: Option<Mood>,
    pub note: String,
}

impl MoodEntry {
    /// Record a check-in for the current instant.
    pub fn record(mood: Option<Mood>, note: impl Into<String>) -> Result<Self, ValidationError> {
        Self::record_at(mood, note, Utc::now())
    }

    /// Record a check-in for a given instant. Both a mood and a non-blank
    /// note are required.
    pub fn record_at(
        mood: Option<Mood>,
        note: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let note = note.into();
        if mood.is_none() || note.trim().is_empty() {
            return Err(ValidationError::IncompleteMoodEntry);
        }
        Ok(Self {
            date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            mood,
            note,
        })
    }
}

// ── Journal ───────────────────────────────────────────────────────────────

/// One free-text reflection. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Epoch milliseconds of the creation instant. Unique only as far as
    /// the local clock resolution allows.
    pub id: String,
    pub content: String,
    /// Local, human-formatted creation time, e.g. `1/2/2024, 9:05:07 AM`.
    pub date: String,
}

impl JournalEntry {
    pub fn write(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::write_at(content, Local::now())
    }

    pub fn write_at(
        content: impl Into<String>,
        at: DateTime<Local>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyJournalEntry);
        }
        Ok(Self {
            id: at.timestamp_millis().to_string(),
            content,
            date: at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        })
    }
}
