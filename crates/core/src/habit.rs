//! Habit tracking - completion records for habit and health goals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GoalError, Result};
use crate::id::RecordId;

/// Habit cadence and the days it was performed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitTracking {
    /// Expected completions per day
    #[serde(default)]
    pub target_frequency: Option<f64>,

    /// Completion log, in insertion order. Same-day entries are kept.
    #[serde(default)]
    pub records: Vec<CompletionRecord>,
}

/// A record that the habit was performed on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Unique identifier
    #[serde(default)]
    pub id: RecordId,

    /// Day the habit was performed
    pub date: NaiveDate,

    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Self-rated quality (1-5)
    #[serde(default)]
    pub quality: Option<u8>,
}

impl CompletionRecord {
    /// Record a completion on `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: RecordId::new(),
            date,
            notes: None,
            quality: None,
        }
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Attach a quality rating.
    pub fn with_quality(mut self, quality: u8) -> Result<Self> {
        check_quality(quality)?;
        self.quality = Some(quality);
        Ok(self)
    }

    /// Check the record's own invariants.
    pub fn validate(&self) -> Result<()> {
        match self.quality {
            Some(q) => check_quality(q),
            None => Ok(()),
        }
    }
}

impl HabitTracking {
    /// Tracking with a daily target frequency.
    pub fn with_frequency(frequency: f64) -> Result<Self> {
        check_frequency(frequency)?;
        Ok(Self {
            target_frequency: Some(frequency),
            records: Vec::new(),
        })
    }

    /// Check the frequency and every record.
    pub fn validate(&self) -> Result<()> {
        if let Some(f) = self.target_frequency {
            check_frequency(f)?;
        }
        self.records.iter().try_for_each(CompletionRecord::validate)
    }
}

fn check_quality(quality: u8) -> Result<()> {
    if (1..=5).contains(&quality) {
        Ok(())
    } else {
        Err(GoalError::InvalidQuality(quality))
    }
}

pub(crate) fn check_frequency(frequency: f64) -> Result<()> {
    if frequency.is_finite() && frequency > 0.0 {
        Ok(())
    } else {
        Err(GoalError::InvalidFrequency(frequency))
    }
}
