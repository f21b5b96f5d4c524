//! Goal board - the collection that owns a user's goals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GoalError, Result};
use crate::goal::Goal;
use crate::id::{GoalId, UserId};

/// Owning collection of goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalBoard {
    /// Goals in insertion order
    #[serde(default)]
    goals: Vec<Goal>,
}

impl GoalBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a goal. Ids must be unique on the board.
    pub fn insert(&mut self, goal: Goal) -> Result<()> {
        if self.get(&goal.id).is_some() {
            return Err(GoalError::DuplicateGoal(goal.id));
        }
        debug!("Adding goal {} ({})", goal.id, goal.title);
        self.goals.push(goal);
        Ok(())
    }

    /// Look up a goal.
    pub fn get(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == id)
    }

    /// Look up a goal for editing.
    pub fn get_mut(&mut self, id: &GoalId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| &g.id == id)
    }

    /// Hard delete.
    pub fn remove(&mut self, id: &GoalId) -> Result<Goal> {
        let pos = self
            .goals
            .iter()
            .position(|g| &g.id == id)
            .ok_or_else(|| GoalError::GoalNotFound(id.clone()))?;
        debug!("Removing goal {}", id);
        Ok(self.goals.remove(pos))
    }

    /// Soft delete.
    pub fn archive(&mut self, id: &GoalId) -> Result<()> {
        self.get_mut(id)
            .ok_or_else(|| GoalError::GoalNotFound(id.clone()))?
            .archive();
        Ok(())
    }

    /// Goals owned by `user`.
    pub fn for_user<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a Goal> + 'a {
        self.goals.iter().filter(move |g| &g.user_id == user)
    }

    /// All goals.
    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    /// Number of goals, archived ones included.
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the board is empty.
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Validate every goal and check id uniqueness.
    pub fn validate(&self) -> Result<()> {
        for (i, goal) in self.goals.iter().enumerate() {
            goal.validate()?;
            if self.goals[..i].iter().any(|g| g.id == goal.id) {
                return Err(GoalError::DuplicateGoal(goal.id.clone()));
            }
        }
        Ok(())
    }
}

impl FromIterator<Goal> for GoalBoard {
    fn from_iter<I: IntoIterator<Item = Goal>>(iter: I) -> Self {
        Self {
            goals: iter.into_iter().collect(),
        }
    }
}
