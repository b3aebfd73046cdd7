//! Student service: use-cases for managing students and their links to
//! departments, contracts, and teams.

use kaddem_domain::error::{KaddemError, NotFoundError, ValidationError};
use kaddem_domain::id::{ContractId, DepartmentId, StudentId, TeamId};
use kaddem_domain::student::Student;

use crate::ports::{
    ContractRepository, DepartmentRepository, StudentRepository, TeamRepository, Transaction,
    UnitOfWork,
};

/// Application service for students.
///
/// Each operation opens exactly one transaction from the injected
/// [`UnitOfWork`] and commits it only after every step succeeded. Any error
/// drops the transaction, which rolls back whatever the operation wrote so
/// far. Read-only operations never commit.
pub struct StudentService<U> {
    store: U,
}

impl<U: UnitOfWork> StudentService<U> {
    /// Create a new service backed by the given store.
    pub fn new(store: U) -> Self {
        Self { store }
    }

    /// List every stored student.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::OperationFailed`] when the store fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_students(&self) -> Result<Vec<Student>, KaddemError> {
        let result = async move {
            let mut tx = self.store.begin().await?;
            tx.students().find_all().await
        }
        .await;

        let students = conclude(result, || "Failed to retrieve students".to_string())?;
        tracing::info!(count = students.len(), "retrieved students");
        Ok(students)
    }

    /// Insert a new student and return it with its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] if the student already has an
    /// identifier or breaks a domain invariant, and
    /// [`KaddemError::OperationFailed`] when the store fails.
    #[tracing::instrument(skip(self, student), fields(last_name = %student.last_name, first_name = %student.first_name))]
    pub async fn create_student(&self, student: Student) -> Result<Student, KaddemError> {
        let result = async move {
            ensure_new(&student)?;
            let mut tx = self.store.begin().await?;
            let saved = tx.students().save(student).await?;
            tx.commit().await?;
            Ok::<_, KaddemError>(saved)
        }
        .await;

        let saved = conclude(result, || "Failed to add student".to_string())?;
        tracing::info!(id = ?saved.id, "added student");
        Ok(saved)
    }

    /// Replace a stored student with `student`.
    ///
    /// Every field is overwritten, including ones the caller left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] when `student` has no identifier or
    /// breaks an invariant, [`KaddemError::NotFound`] when no student with
    /// that identifier exists (nothing is written), and
    /// [`KaddemError::OperationFailed`] when the store fails.
    #[tracing::instrument(skip(self, student), fields(id = ?student.id))]
    pub async fn update_student(&self, student: Student) -> Result<Student, KaddemError> {
        let id = student.id;
        let result = async move {
            let id = student.require_id()?;
            student.validate()?;
            let mut tx = self.store.begin().await?;
            if !tx.students().exists_by_id(id).await? {
                return Err(not_found("Student", id));
            }
            let saved = tx.students().save(student).await?;
            tx.commit().await?;
            Ok(saved)
        }
        .await;

        let saved = conclude(result, || match id {
            Some(id) => format!("Failed to update student {id}"),
            None => "Failed to update student".to_string(),
        })?;
        tracing::info!(id = ?saved.id, "updated student");
        Ok(saved)
    }

    /// Look up a student by id.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::NotFound`] when no student with `id` exists,
    /// or [`KaddemError::OperationFailed`] when the store fails.
    #[tracing::instrument(skip(self))]
    pub async fn get_student(&self, id: StudentId) -> Result<Student, KaddemError> {
        let result = async move {
            let mut tx = self.store.begin().await?;
            tx.students()
                .find_by_id(id)
                .await?
                .ok_or_else(|| not_found("Student", id))
        }
        .await;

        let student = conclude(result, || format!("Failed to retrieve student {id}"))?;
        tracing::info!(%id, "retrieved student");
        Ok(student)
    }

    /// Hard-delete a student by id.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::NotFound`] when no student with `id` exists,
    /// or [`KaddemError::OperationFailed`] when the store fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_student(&self, id: StudentId) -> Result<(), KaddemError> {
        let result = async move {
            let mut tx = self.store.begin().await?;
            if !tx.students().exists_by_id(id).await? {
                return Err(not_found("Student", id));
            }
            tx.students().delete_by_id(id).await?;
            tx.commit().await
        }
        .await;

        conclude(result, || format!("Failed to delete student {id}"))?;
        tracing::info!(%id, "deleted student");
        Ok(())
    }

    /// Point a student at a department and save the student.
    ///
    /// Any previous department is replaced. Team and contract links are left
    /// as they are.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::NotFound`] for an unknown student (checked
    /// first) or an unknown department, and [`KaddemError::OperationFailed`]
    /// when the store fails. Nothing is written on error.
    #[tracing::instrument(skip(self))]
    pub async fn assign_student_to_department(
        &self,
        student_id: StudentId,
        department_id: DepartmentId,
    ) -> Result<Student, KaddemError> {
        let result = async move {
            let mut tx = self.store.begin().await?;
            let mut student = tx
                .students()
                .find_by_id(student_id)
                .await?
                .ok_or_else(|| not_found("Student", student_id))?;
            tx.departments()
                .find_by_id(department_id)
                .await?
                .ok_or_else(|| not_found("Department", department_id))?;

            student.assign_department(department_id);
            let saved = tx.students().save(student).await?;
            tx.commit().await?;
            Ok::<_, KaddemError>(saved)
        }
        .await;

        let saved = conclude(result, || {
            format!("Failed to assign student {student_id} to department {department_id}")
        })?;
        tracing::info!(%student_id, %department_id, "assigned student to department");
        Ok(saved)
    }

    /// Insert a new student, hand it contract `contract_id`, and add it to
    /// team `team_id`, all in one transaction.
    ///
    /// The student is inserted first so both links can reference its
    /// identifier; the contract is linked before the team. If any later step
    /// fails, the insert and the contract link are rolled back with it.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::Validation`] if the student already has an
    /// identifier or breaks an invariant, [`KaddemError::NotFound`] for an
    /// unknown contract or team, and [`KaddemError::OperationFailed`] when the
    /// store fails.
    #[tracing::instrument(skip(self, student))]
    pub async fn create_student_with_contract_and_team(
        &self,
        student: Student,
        contract_id: ContractId,
        team_id: TeamId,
    ) -> Result<Student, KaddemError> {
        let result = async move {
            ensure_new(&student)?;
            let mut tx = self.store.begin().await?;

            let saved = tx.students().save(student).await?;
            let student_id = saved.require_id()?;
            tracing::debug!(%student_id, "saved student");

            let mut contract = tx
                .contracts()
                .find_by_id(contract_id)
                .await?
                .ok_or_else(|| not_found("Contract", contract_id))?;
            contract.assign_student(student_id);
            tx.contracts().save(contract).await?;
            tracing::debug!(%contract_id, %student_id, "assigned contract to student");

            let mut team = tx
                .teams()
                .find_by_id(team_id)
                .await?
                .ok_or_else(|| not_found("Team", team_id))?;
            team.add_member(student_id);
            tx.teams().save(team).await?;
            tracing::debug!(%team_id, %student_id, "added student to team");

            tx.commit().await?;
            Ok::<_, KaddemError>(saved)
        }
        .await;

        let saved = conclude(result, || {
            format!("Failed to add and assign student to contract {contract_id} and team {team_id}")
        })?;
        tracing::info!(id = ?saved.id, "added and assigned student");
        Ok(saved)
    }

    /// List the students attached to a department.
    ///
    /// An unknown department is not an error: it simply has no students.
    ///
    /// # Errors
    ///
    /// Returns [`KaddemError::OperationFailed`] when the store fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_students_by_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<Student>, KaddemError> {
        let result = async move {
            let mut tx = self.store.begin().await?;
            tx.students().find_by_department_id(department_id).await
        }
        .await;

        let students = conclude(result, || {
            format!("Failed to get students by department {department_id}")
        })?;
        tracing::info!(count = students.len(), %department_id, "found students in department");
        Ok(students)
    }
}

fn ensure_new(student: &Student) -> Result<(), KaddemError> {
    if let Some(id) = student.id {
        return Err(ValidationError::IdentifierAlreadyAssigned(id.get()).into());
    }
    student.validate()
}

fn not_found(entity: &'static str, id: impl ToString) -> KaddemError {
    NotFoundError {
        entity,
        id: id.to_string(),
    }
    .into()
}

/// Log a failed operation and surface raw store faults as
/// [`KaddemError::OperationFailed`] named by `operation`.
fn conclude<T>(
    result: Result<T, KaddemError>,
    operation: impl FnOnce() -> String,
) -> Result<T, KaddemError> {
    result.map_err(|err| {
        match &err {
            KaddemError::Validation(reason) => tracing::warn!(%reason, "rejected invalid input"),
            KaddemError::NotFound(missing) => tracing::warn!(%missing, "record not found"),
            KaddemError::Storage(source) | KaddemError::OperationFailed { source, .. } => {
                tracing::error!(error = %source, "store failure");
            }
        }
        err.context(operation())
    })
}
