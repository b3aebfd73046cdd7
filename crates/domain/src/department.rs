//! Department: an organisational unit that students belong to.

use serde::{Deserialize, Serialize};

use crate::error::{KaddemError, ValidationError};
use crate::id::DepartmentId;

/// An organisational unit. Students point at it through
/// [`Student::department_id`](crate::student::Student::department_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: Option<DepartmentId>,
    pub name: String,
}

impl Department {
    /// Create a builder for constructing a [`Department`].
    #[must_use]
    pub fn builder() -> DepartmentBuilder {
        DepartmentBuilder::default()
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
}

/// Step-by-step builder for [`Department`].
#[derive(Debug, Default)]
pub struct DepartmentBuilder {
    id: Option<DepartmentId>,
    name: Option<String>,
}

impl DepartmentBuilder {
    #[must_use]
    pub fn id(mut self, id: DepartmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`Department`].
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Department, KaddemError> {
        let department = Department {
            id: self.id,
            name: self.name.unwrap_or_default(),
        };
        department.validate()?;
        Ok(department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_department_when_name_provided() {
        let department = Department::builder().name("Informatique").build().unwrap();
        assert_eq!(department.name, "Informatique");
        assert!(department.id.is_none());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Department::builder().build();
        assert!(matches!(
            result,
            Err(KaddemError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_keep_explicit_id() {
        let department = Department::builder()
            .id(DepartmentId::new(3))
            .name("Mécanique")
            .build()
            .unwrap();
        assert_eq!(department.id, Some(DepartmentId::new(3)));
    }
}
