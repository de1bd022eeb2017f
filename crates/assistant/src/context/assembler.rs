//! Turns the mood and journal logs into the history instruction.
//!
//! Assembly is pure and deterministic: identical logs always produce
//! identical text. Entries appear in stored order, one bullet line each.

use super::token;
use mindnest_core::record::{JournalEntry, Mood, MoodEntry};

/// The fixed persona instruction sent ahead of the history.
pub const PERSONA: &str =
    "You are a friendly mental health companion. Be empathetic, warm, and helpful.";

const NO_MOODS: &str = "No mood entries yet.";
const NO_JOURNAL: &str = "No journal entries yet.";

/// The assembled history instruction plus a rough size figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledContext {
    pub text: String,
    /// ~4 characters per token. Informational only.
    pub estimated_tokens: usize,
}

/// Builds the history instruction from the full logs.
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn assemble(moods: &[MoodEntry], journal: &[JournalEntry]) -> AssembledContext {
        let mood_section = section(moods.iter().map(mood_line), NO_MOODS);
        let journal_section = section(journal.iter().map(journal_line), NO_JOURNAL);

        let text = format!(
            "You have access to the user's mood and journaling history.\n\
             Here are the latest mood entries:\n\
             {mood_section}\n\
             \n\
             Here are recent journal entries:\n\
             {journal_section}\n\
             \n\
             Use this context to respond empathetically and track user trends when asked \
             about progress, emotional state, or how they\u{2019}ve been doing lately."
        );

        AssembledContext {
            estimated_tokens: token::estimate_tokens(&text),
            text,
        }
    }
}

fn mood_line(entry: &MoodEntry) -> String {
    let mood = entry.mood.as_ref().map_or("N/A", Mood::emoji);
    format!("• {} — Mood: {mood}, Note: {}", entry.date, entry.note)
}

fn journal_line(entry: &JournalEntry) -> String {
    format!("• {} — \"{}\"", entry.date, entry.content)
}

fn section(lines: impl Iterator<Item = String>, placeholder: &str) -> String {
    let joined = lines.collect::<Vec<_>>().join("\n");
    if joined.is_empty() {
        placeholder.to_string()
    } else {
        joined
    }
}
