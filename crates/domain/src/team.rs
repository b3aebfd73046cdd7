//! Team: a group of students. The team owns the membership set.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KaddemError, UnknownVariantError, ValidationError};
use crate::id::{StudentId, TeamId};

/// Seniority level of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TeamLevel {
    #[default]
    Junior,
    Senior,
    Expert,
}

impl TeamLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "JUNIOR",
            Self::Senior => "SENIOR",
            Self::Expert => "EXPERT",
        }
    }
}

impl fmt::Display for TeamLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamLevel {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JUNIOR" => Ok(Self::Junior),
            "SENIOR" => Ok(Self::Senior),
            "EXPERT" => Ok(Self::Expert),
            other => Err(UnknownVariantError {
                kind: "team level",
                value: other.to_string(),
            }),
        }
    }
}

/// A team and the identifiers of its student members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Option<TeamId>,
    pub name: String,
    pub level: TeamLevel,
    pub student_ids: BTreeSet<StudentId>,
}

impl Team {
    /// Create a builder for constructing a [`Team`].
    #[must_use]
    pub fn builder() -> TeamBuilder {
        TeamBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), KaddemError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Add `student` to the membership set.
    ///
    /// Returns `false` when the student was already a member.
    pub fn add_member(&mut self, student: StudentId) -> bool {
        self.student_ids.insert(student)
    }

    #[must_use]
    pub fn has_member(&self, student: StudentId) -> bool {
        self.student_ids.contains(&student)
    }
}

/// Step-by-step builder for [`Team`].
#[derive(Debug, Default)]
pub struct TeamBuilder {
    id: Option<TeamId>,
    name: Option<String>,
    level: Option<TeamLevel>,
    student_ids: BTreeSet<StudentId>,
}

impl TeamBuilder {
    #[must_use]
    pub fn id(mut self, id: TeamId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn level(mut self, level: TeamLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn member(mut self, student: StudentId) -> Self {
        self.student_ids.insert(student);
        self
    }

    /// Consume the builder, validate, and return a [`Team`].
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Team, KaddemError> {
        let team = Team {
            id: self.id,
            name: self.name.unwrap_or_default(),
            level: self.level.unwrap_or_default(),
            student_ids: self.student_ids,
        };
        team.validate()?;
        Ok(team)
    }
}
