//! `SQLite` implementation of [`StudentRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};

use kaddem_app::ports::StudentRepository;
use kaddem_domain::error::KaddemError;
use kaddem_domain::id::{DepartmentId, StudentId};
use kaddem_domain::student::{EnrollmentOption, Student};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Student);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Student> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let last_name: String = row.try_get("last_name")?;
        let first_name: String = row.try_get("first_name")?;
        let option: String = row.try_get("enrollment_option")?;
        let department_id: Option<i64> = row.try_get("department_id")?;

        let option =
            EnrollmentOption::from_str(&option).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Student {
            id: Some(StudentId::new(id)),
            last_name,
            first_name,
            option,
            department_id: department_id.map(DepartmentId::new),
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO students (last_name, first_name, enrollment_option, department_id)
    VALUES (?, ?, ?, ?)
";

const UPSERT: &str = r"
    INSERT INTO students (id, last_name, first_name, enrollment_option, department_id)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET last_name = excluded.last_name,
        first_name = excluded.first_name,
        enrollment_option = excluded.enrollment_option,
        department_id = excluded.department_id
";

const SELECT_BY_ID: &str = "SELECT * FROM students WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM students ORDER BY id";
const SELECT_BY_DEPARTMENT: &str = "SELECT * FROM students WHERE department_id = ? ORDER BY id";
const EXISTS_BY_ID: &str = "SELECT EXISTS (SELECT 1 FROM students WHERE id = ?)";
const DELETE_BY_ID: &str = "DELETE FROM students WHERE id = ?";

/// `SQLite`-backed student repository bound to one open transaction.
pub struct SqliteStudentRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteStudentRepository<'c> {
    /// Create a new repository running on `conn`.
    #[must_use]
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    async fn find_all(&mut self) -> Result<Vec<Student>, KaddemError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_id(&mut self, id: StudentId) -> Result<Option<Student>, KaddemError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn save(&mut self, student: Student) -> Result<Student, KaddemError> {
        let department_id = student.department_id.map(DepartmentId::get);

        let id = match student.id {
            None => sqlx::query(INSERT)
                .bind(&student.last_name)
                .bind(&student.first_name)
                .bind(student.option.as_str())
                .bind(department_id)
                .execute(&mut *self.conn)
                .await
                .map_err(StorageError::from)?
                .last_insert_rowid(),
            Some(id) => {
                sqlx::query(UPSERT)
                    .bind(id.get())
                    .bind(&student.last_name)
                    .bind(&student.first_name)
                    .bind(student.option.as_str())
                    .bind(department_id)
                    .execute(&mut *self.conn)
                    .await
                    .map_err(StorageError::from)?;
                id.get()
            }
        };

        Ok(Student {
            id: Some(StudentId::new(id)),
            ..student
        })
    }

    async fn exists_by_id(&mut self, id: StudentId) -> Result<bool, KaddemError> {
        let exists: i64 = sqlx::query_scalar(EXISTS_BY_ID)
            .bind(id.get())
            .fetch_one(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;

        Ok(exists != 0)
    }

    async fn delete_by_id(&mut self, id: StudentId) -> Result<(), KaddemError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn find_by_department_id(
        &mut self,
        department: DepartmentId,
    ) -> Result<Vec<Student>, KaddemError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_DEPARTMENT)
            .bind(department.get())
            .fetch_all(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Config, Database};
    use kaddem_app::ports::{DepartmentRepository, Transaction, UnitOfWork};
    use kaddem_domain::department::Department;

    async fn setup() -> Database {
        Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap()
    }

    fn test_student() -> Student {
        Student::builder()
            .last_name("Doe")
            .first_name("John")
            .option(EnrollmentOption::Se)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_sequential_ids_on_insert() {
        let db = setup().await;
        let mut tx = db.unit_of_work().begin().await.unwrap();

        let first = tx.students().save(test_student()).await.unwrap();
        let second = tx.students().save(test_student()).await.unwrap();

        assert_eq!(first.id, Some(StudentId::new(1)));
        assert_eq!(second.id, Some(StudentId::new(2)));
    }

    #[tokio::test]
    async fn should_create_and_retrieve_student_when_valid() {
        let db = setup().await;
        let mut tx = db.unit_of_work().begin().await.unwrap();

        let saved = tx.students().save(test_student()).await.unwrap();
        let fetched = tx
            .students()
            .find_by_id(saved.id.unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched, saved);
        assert_eq!(fetched.option, EnrollmentOption::Se);
    }

    #[tokio::test]
    async fn should_return_none_when_student_not_found() {
        let db = setup().await;
        let mut tx = db.unit_of_work().begin().await.unwrap();

        let result = tx.students().find_by_id(StudentId::new(9)).await.unwrap();
        assert!(result.is_none());
        assert!(!tx.students().exists_by_id(StudentId::new(9)).await.unwrap());
    }

    #[tokio::test]
    async fn should_replace_every_field_when_saving_existing_student() {
        let db = setup().await;
        let mut tx = db.unit_of_work().begin().await.unwrap();
        let mut saved = tx.students().save(test_student()).await.unwrap();

        saved.first_name = "Jane".to_string();
        saved.option = EnrollmentOption::Nids;
        tx.students().save(saved.clone()).await.unwrap();

        let all = tx.students().find_all().await.unwrap();
        assert_eq!(all, vec![saved]);
    }

    #[tokio::test]
    async fn should_delete_student_when_exists() {
        let db = setup().await;
        let mut tx = db.unit_of_work().begin().await.unwrap();
        let id = tx.students().save(test_student()).await.unwrap().id.unwrap();

        tx.students().delete_by_id(id).await.unwrap();

        assert!(!tx.students().exists_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn should_not_reuse_id_of_deleted_student() {
        let db = setup().await;
        let mut tx = db.unit_of_work().begin().await.unwrap();
        let deleted = tx.students().save(test_student()).await.unwrap().id.unwrap();
        tx.students().delete_by_id(deleted).await.unwrap();

        let next = tx.students().save(test_student()).await.unwrap().id.unwrap();

        assert_ne!(next, deleted);
        assert!(tx.students().find_by_id(deleted).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_filter_students_by_department() {
        let db = setup().await;
        let mut tx = db.unit_of_work().begin().await.unwrap();
        let department = tx
            .departments()
            .save(Department::builder().name("Informatique").build().unwrap())
            .await
            .unwrap()
            .id
            .unwrap();

        let mut member = test_student();
        member.department_id = Some(department);
        let member = tx.students().save(member).await.unwrap();
        tx.students().save(test_student()).await.unwrap();

        let found = tx.students().find_by_department_id(department).await.unwrap();
        assert_eq!(found, vec![member]);

        let none = tx
            .students()
            .find_by_department_id(DepartmentId::new(404))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn should_reject_unknown_department_reference() {
        let db = setup().await;
        let mut tx = db.unit_of_work().begin().await.unwrap();
        let mut student = test_student();
        student.department_id = Some(DepartmentId::new(404));

        let result = tx.students().save(student).await;
        assert!(matches!(result, Err(KaddemError::Storage(_))));
    }
}
