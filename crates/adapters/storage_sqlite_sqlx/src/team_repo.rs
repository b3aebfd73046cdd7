//! `SQLite` implementation of [`TeamRepository`].
//!
//! Membership lives in the `team_students` join table and is rewritten in
//! full on every save.

use std::collections::BTreeSet;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};

use kaddem_app::ports::TeamRepository;
use kaddem_domain::error::KaddemError;
use kaddem_domain::id::{StudentId, TeamId};
use kaddem_domain::team::{Team, TeamLevel};

use crate::error::StorageError;

/// Team row without its members.
struct Wrapper(Team);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let level: String = row.try_get("level")?;

        let level = TeamLevel::from_str(&level).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Team {
            id: Some(TeamId::new(id)),
            name,
            level,
            student_ids: BTreeSet::new(),
        }))
    }
}

const INSERT: &str = "INSERT INTO teams (name, level) VALUES (?, ?)";
const UPSERT: &str = r"
    INSERT INTO teams (id, name, level) VALUES (?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET name = excluded.name, level = excluded.level
";
const SELECT_BY_ID: &str = "SELECT * FROM teams WHERE id = ?";
const SELECT_MEMBERS: &str = "SELECT student_id FROM team_students WHERE team_id = ?";
const DELETE_MEMBERS: &str = "DELETE FROM team_students WHERE team_id = ?";
const INSERT_MEMBER: &str = "INSERT INTO team_students (team_id, student_id) VALUES (?, ?)";

/// `SQLite`-backed team repository bound to one open transaction.
pub struct SqliteTeamRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteTeamRepository<'c> {
    /// Create a new repository running on `conn`.
    #[must_use]
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl TeamRepository for SqliteTeamRepository<'_> {
    async fn find_by_id(&mut self, id: TeamId) -> Result<Option<Team>, KaddemError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;
        let Some(Wrapper(mut team)) = row else {
            return Ok(None);
        };

        let members: Vec<i64> = sqlx::query_scalar(SELECT_MEMBERS)
            .bind(id.get())
            .fetch_all(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;
        team.student_ids = members.into_iter().map(StudentId::new).collect();

        Ok(Some(team))
    }

    async fn save(&mut self, team: Team) -> Result<Team, KaddemError> {
        let id = match team.id {
            None => sqlx::query(INSERT)
                .bind(&team.name)
                .bind(team.level.as_str())
                .execute(&mut *self.conn)
                .await
                .map_err(StorageError::from)?
                .last_insert_rowid(),
            Some(id) => {
                sqlx::query(UPSERT)
                    .bind(id.get())
                    .bind(&team.name)
                    .bind(team.level.as_str())
                    .execute(&mut *self.conn)
                    .await
                    .map_err(StorageError::from)?;
                id.get()
            }
        };

        sqlx::query(DELETE_MEMBERS)
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(StorageError::from)?;
        for student in &team.student_ids {
            sqlx::query(INSERT_MEMBER)
                .bind(id)
                .bind(student.get())
                .execute(&mut *self.conn)
                .await
                .map_err(StorageError::from)?;
        }

        Ok(Team {
            id: Some(TeamId::new(id)),
            ..team
        })
    }
}
