//! Storage port: repository traits for persistence.
//!
//! Every repository is scoped to one open [`Transaction`](super::Transaction):
//! methods take `&mut self` because they run on the transaction's connection.
//! `save` is insert-or-update: a record without an identifier is inserted and
//! returned with the store-assigned one, a record with an identifier replaces
//! the stored row.

use std::future::Future;

use kaddem_domain::contract::Contract;
use kaddem_domain::department::Department;
use kaddem_domain::error::KaddemError;
use kaddem_domain::id::{ContractId, DepartmentId, StudentId, TeamId};
use kaddem_domain::student::Student;
use kaddem_domain::team::Team;

/// Repository for persisting and querying [`Student`]s.
pub trait StudentRepository: Send {
    /// Get all students.
    fn find_all(&mut self) -> impl Future<Output = Result<Vec<Student>, KaddemError>> + Send;

    /// Get a student by its unique identifier.
    fn find_by_id(
        &mut self,
        id: StudentId,
    ) -> impl Future<Output = Result<Option<Student>, KaddemError>> + Send;

    /// Insert or replace a student.
    fn save(
        &mut self,
        student: Student,
    ) -> impl Future<Output = Result<Student, KaddemError>> + Send;

    fn exists_by_id(
        &mut self,
        id: StudentId,
    ) -> impl Future<Output = Result<bool, KaddemError>> + Send;

    /// Delete a student by its unique identifier. Deleting a missing id is a no-op.
    fn delete_by_id(
        &mut self,
        id: StudentId,
    ) -> impl Future<Output = Result<(), KaddemError>> + Send;

    /// Get every student whose department foreign key equals `department`.
    fn find_by_department_id(
        &mut self,
        department: DepartmentId,
    ) -> impl Future<Output = Result<Vec<Student>, KaddemError>> + Send;
}

/// Repository for [`Contract`]s.
pub trait ContractRepository: Send {
    fn find_by_id(
        &mut self,
        id: ContractId,
    ) -> impl Future<Output = Result<Option<Contract>, KaddemError>> + Send;

    fn save(
        &mut self,
        contract: Contract,
    ) -> impl Future<Output = Result<Contract, KaddemError>> + Send;
}

/// Repository for [`Team`]s, including their membership set.
pub trait TeamRepository: Send {
    fn find_by_id(
        &mut self,
        id: TeamId,
    ) -> impl Future<Output = Result<Option<Team>, KaddemError>> + Send;

    /// Insert or replace a team. The stored membership becomes exactly
    /// `team.student_ids`.
    fn save(&mut self, team: Team) -> impl Future<Output = Result<Team, KaddemError>> + Send;
}

/// Repository for [`Department`]s.
pub trait DepartmentRepository: Send {
    fn find_by_id(
        &mut self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<Option<Department>, KaddemError>> + Send;

    fn save(
        &mut self,
        department: Department,
    ) -> impl Future<Output = Result<Department, KaddemError>> + Send;
}
