//! `SQLite` implementation of [`DepartmentRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};

use kaddem_app::ports::DepartmentRepository;
use kaddem_domain::department::Department;
use kaddem_domain::error::KaddemError;
use kaddem_domain::id::DepartmentId;

use crate::error::StorageError;

struct Wrapper(Department);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        Ok(Self(Department {
            id: Some(DepartmentId::new(id)),
            name,
        }))
    }
}

const INSERT: &str = "INSERT INTO departments (name) VALUES (?)";
const UPSERT: &str =
    "INSERT INTO departments (id, name) VALUES (?, ?) ON CONFLICT (id) DO UPDATE SET name = excluded.name";
const SELECT_BY_ID: &str = "SELECT * FROM departments WHERE id = ?";

/// `SQLite`-backed department repository bound to one open transaction.
pub struct SqliteDepartmentRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteDepartmentRepository<'c> {
    /// Create a new repository running on `conn`.
    #[must_use]
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    async fn find_by_id(&mut self, id: DepartmentId) -> Result<Option<Department>, KaddemError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn save(&mut self, department: Department) -> Result<Department, KaddemError> {
        let id = match department.id {
            None => sqlx::query(INSERT)
                .bind(&department.name)
                .execute(&mut *self.conn)
                .await
                .map_err(StorageError::from)?
                .last_insert_rowid(),
            Some(id) => {
                sqlx::query(UPSERT)
                    .bind(id.get())
                    .bind(&department.name)
                    .execute(&mut *self.conn)
                    .await
                    .map_err(StorageError::from)?;
                id.get()
            }
        };

        Ok(Department {
            id: Some(DepartmentId::new(id)),
            ..department
        })
    }
}
