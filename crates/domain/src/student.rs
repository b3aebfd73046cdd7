//! Student: the primary managed entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{KaddemError, UnknownVariantError, ValidationError};
use crate::id::{DepartmentId, StudentId};

/// Academic track a student is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnrollmentOption {
    #[default]
    Gamix,
    Se,
    Sim,
    Nids,
}

impl EnrollmentOption {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gamix => "GAMIX",
            Self::Se => "SE",
            Self::Sim => "SIM",
            Self::Nids => "NIDS",
        }
    }
}

impl fmt::Display for EnrollmentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentOption {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GAMIX" => Ok(Self::Gamix),
            "SE" => Ok(Self::Se),
            "SIM" => Ok(Self::Sim),
            "NIDS" => Ok(Self::Nids),
            other => Err(UnknownVariantError {
                kind: "enrollment option",
                value: other.to_string(),
            }),
        }
    }
}

/// A student enrolled in one academic track.
///
/// `id` is `None` until the store assigns one on first save. Team membership
/// and contracts are owned by [`Team`](crate::team::Team) and
/// [`Contract`](crate::contract::Contract); the student only carries its
/// department foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Option<StudentId>,
    pub last_name: String,
    pub first_name: String,
    pub option: EnrollmentOption,
    pub department_id: Option<DepartmentId>,
}

impl Student {
    /// Create a builder for constructing a [`Student`].
    #[must_use]
    pub fn builder() -> StudentBuilder {
        StudentBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] when either name is empty.
    pub fn validate(&self) -> Result<(), KaddemError> {
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::EmptyLastName.into());
        }
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::EmptyFirstName.into());
        }
        Ok(())
    }

    /// Return the store-assigned identifier of a persisted student.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingIdentifier`] for an unsaved student.
    pub fn require_id(&self) -> Result<StudentId, KaddemError> {
        self.id
            .ok_or_else(|| ValidationError::MissingIdentifier.into())
    }

    /// Point this student at `department`, replacing any previous one.
    pub fn assign_department(&mut self, department: DepartmentId) {
        self.department_id = Some(department);
    }
}

/// Step-by-step builder for [`Student`].
#[derive(Debug, Default)]
pub struct StudentBuilder {
    id: Option<StudentId>,
    last_name: Option<String>,
    first_name: Option<String>,
    option: Option<EnrollmentOption>,
    department_id: Option<DepartmentId>,
}

impl StudentBuilder {
    #[must_use]
    pub fn id(mut self, id: StudentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn option(mut self, option: EnrollmentOption) -> Self {
        self.option = Some(option);
        self
    }

    #[must_use]
    pub fn department_id(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Consume the builder, validate, and return a [`Student`].
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] if a name is missing or empty.
    pub fn build(self) -> Result<Student, KaddemError> {
        let student = Student {
            id: self.id,
            last_name: self.last_name.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            option: self.option.unwrap_or_default(),
            department_id: self.department_id,
        };
        student.validate()?;
        Ok(student)
    }
}
