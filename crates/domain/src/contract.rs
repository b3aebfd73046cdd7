//! Contract: an agreement referencing at most one student.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{KaddemError, UnknownVariantError, ValidationError};
use crate::id::{ContractId, StudentId};

/// Field a contract is signed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Specialty {
    Ia,
    Reseaux,
    Cloud,
    Securite,
}

impl Specialty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ia => "IA",
            Self::Reseaux => "RESEAUX",
            Self::Cloud => "CLOUD",
            Self::Securite => "SECURITE",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IA" => Ok(Self::Ia),
            "RESEAUX" => Ok(Self::Reseaux),
            "CLOUD" => Ok(Self::Cloud),
            "SECURITE" => Ok(Self::Securite),
            other => Err(UnknownVariantError {
                kind: "specialty",
                value: other.to_string(),
            }),
        }
    }
}

/// A contract, optionally held by one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: Option<ContractId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub specialty: Specialty,
    pub archived: bool,
    pub amount: i32,
    pub student_id: Option<StudentId>,
}

impl Contract {
    /// Create a builder for constructing a [`Contract`].
    #[must_use]
    pub fn builder() -> ContractBuilder {
        ContractBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] when the contract ends before it
    /// starts.
    pub fn validate(&self) -> Result<(), KaddemError> {
        if self.end_date < self.start_date {
            return Err(ValidationError::InvalidContractPeriod.into());
        }
        Ok(())
    }

    /// Hand this contract to `student`, replacing any previous holder.
    pub fn assign_student(&mut self, student: StudentId) {
        self.student_id = Some(student);
    }
}

/// Step-by-step builder for [`Contract`].
#[derive(Debug, Default)]
pub struct ContractBuilder {
    id: Option<ContractId>,
    period: Option<(NaiveDate, NaiveDate)>,
    specialty: Option<Specialty>,
    archived: bool,
    amount: i32,
    student_id: Option<StudentId>,
}

impl ContractBuilder {
    #[must_use]
    pub fn id(mut self, id: ContractId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period = Some((start, end));
        self
    }

    #[must_use]
    pub fn specialty(mut self, specialty: Specialty) -> Self {
        self.specialty = Some(specialty);
        self
    }

    #[must_use]
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn student_id(mut self, student_id: StudentId) -> Self {
        self.student_id = Some(student_id);
        self
    }

    /// Consume the builder, validate, and return a [`Contract`].
    ///
    /// Specialty defaults to [`Specialty::Ia`].
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] if the period is missing or
    /// inverted.
    pub fn build(self) -> Result<Contract, KaddemError> {
        let (start_date, end_date) = self
            .period
            .ok_or(ValidationError::MissingContractPeriod)?;
        let contract = Contract {
            id: self.id,
            start_date,
            end_date,
            specialty: self.specialty.unwrap_or(Specialty::Ia),
            archived: self.archived,
            amount: self.amount,
            student_id: self.student_id,
        };
        contract.validate()?;
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_build_contract_when_period_valid() {
        let contract = Contract::builder()
            .period(date(2024, 9, 1), date(2025, 6, 30))
            .specialty(Specialty::Cloud)
            .amount(1200)
            .build()
            .unwrap();
        assert_eq!(contract.specialty, Specialty::Cloud);
        assert!(contract.student_id.is_none());
        assert!(!contract.archived);
    }

    #[test]
    fn should_return_validation_error_when_period_missing() {
        let result = Contract::builder().build();
        assert!(matches!(
            result,
            Err(KaddemError::Validation(ValidationError::MissingContractPeriod))
        ));
    }

    #[test]
    fn should_return_validation_error_when_end_precedes_start() {
        let result = Contract::builder()
            .period(date(2025, 1, 1), date(2024, 1, 1))
            .build();
        assert!(matches!(
            result,
            Err(KaddemError::Validation(ValidationError::InvalidContractPeriod))
        ));
    }

    #[test]
    fn should_replace_holder_when_assigned() {
        let mut contract = Contract::builder()
            .period(date(2024, 1, 1), date(2024, 12, 31))
            .student_id(StudentId::new(1))
            .build()
            .unwrap();
        contract.assign_student(StudentId::new(2));
        assert_eq!(contract.student_id, Some(StudentId::new(2)));
    }

    #[test]
    fn should_parse_specialty_from_display_form() {
        assert_eq!("SECURITE".parse::<Specialty>(), Ok(Specialty::Securite));
        assert!("ROBOTIQUE".parse::<Specialty>().is_err());
    }
}
