//! Skill module model - a learning unit under a skill or learning goal.

use serde::{Deserialize, Serialize};

use crate::error::{GoalError, Result};
use crate::id::ModuleId;

/// A learning unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillModule {
    /// Unique identifier
    #[serde(default)]
    pub id: ModuleId,

    /// Module title
    pub title: String,

    /// Whether the module is finished
    #[serde(default)]
    pub completed: bool,

    /// Self-reported progress within the module (0-100)
    #[serde(default)]
    pub progress: f64,

    /// Links or references used while studying
    #[serde(default)]
    pub resources: Vec<String>,
}

impl SkillModule {
    /// Create an unstarted module.
    pub fn new(title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(GoalError::EmptyTitle);
        }
        Ok(Self {
            id: ModuleId::new(),
            title,
            completed: false,
            progress: 0.0,
            resources: Vec::new(),
        })
    }

    /// Attach a resource.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }

    /// Set in-module progress.
    pub fn set_progress(&mut self, progress: f64) -> Result<()> {
        check_percentage(progress)?;
        self.progress = progress;
        Ok(())
    }

    /// Check the module's own invariants.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GoalError::EmptyTitle);
        }
        check_percentage(self.progress)
    }
}

pub(crate) fn check_percentage(value: f64) -> Result<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(GoalError::InvalidProgress(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_must_be_a_percentage() {
        let mut module = SkillModule::new("Ownership").unwrap();
        assert!(module.set_progress(55.0).is_ok());
        assert_eq!(module.progress, 55.0);
        assert_eq!(module.set_progress(101.0).unwrap_err(), GoalError::InvalidProgress(101.0));
        assert!(module.set_progress(f64::NAN).is_err());
    }

    #[test]
    fn resources_accumulate() {
        let module = SkillModule::new("Lifetimes")
            .unwrap()
            .with_resource("https://doc.rust-lang.org/book/ch10-03-lifetime-syntax.html");
        assert_eq!(module.resources.len(), 1);
    }
}
