//! User repository
//!
//! All statements use `?` parameter binding; SQL is never assembled from
//! request input. Zero rows on a single-entity fetch is `NotFound`, a
//! distinct outcome from a driver failure. Update and delete of a missing
//! id are successful no-ops.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, MySqlPool};

/// User record as stored and as serialized on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

/// Mutable fields of a user, as supplied by create/update bodies.
///
/// Any `id` in the body is ignored: the store assigns ids on create, and
/// the path id wins on update. Absent fields take their zero values, so a
/// body of `{"name":"Alice"}` is a complete create request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
}

/// Window of the users listing: offset/limit pair clamped to policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub start: i64,
    pub count: i64,
}

/// Maximum (and fallback) page size.
const MAX_COUNT: i64 = 10;

impl ListWindow {
    /// Clamp raw query values: a `count` outside `[1, 10]` becomes 10 and
    /// a negative `start` becomes 0. `start` has no upper bound.
    pub fn clamped(start: i64, count: i64) -> Self {
        Self {
            start: start.max(0),
            count: if (1..=MAX_COUNT).contains(&count) {
                count
            } else {
                MAX_COUNT
            },
        }
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("user {id} not found")]
    NotFound { id: i64 },
}

/// User repository borrowing the shared pool.
pub struct UserRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Fetch a single user by id.
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT id, name, age FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound { id })
    }

    /// List users in stable id order, skipping `start` rows and returning
    /// at most `count`.
    pub async fn list(&self, window: ListWindow) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, age FROM users ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(window.count)
        .bind(window.start)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Insert a user; the store assigns the id.
    pub async fn create(&self, fields: NewUser) -> Result<User, DbError> {
        let result = sqlx::query("INSERT INTO users (name, age) VALUES (?, ?)")
            .bind(&fields.name)
            .bind(fields.age)
            .execute(self.pool)
            .await?;

        Ok(User {
            id: result.last_insert_id() as i64,
            name: fields.name,
            age: fields.age,
        })
    }

    /// Replace all mutable fields for `id`. Zero affected rows is a
    /// successful no-op; see `delete`.
    pub async fn update(&self, id: i64, fields: NewUser) -> Result<User, DbError> {
        sqlx::query("UPDATE users SET name = ?, age = ? WHERE id = ?")
            .bind(&fields.name)
            .bind(fields.age)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(User {
            id,
            name: fields.name,
            age: fields.age,
        })
    }

    /// Delete the row matching `id`. Deleting a missing id is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_inside_range_is_kept() {
        for count in 1..=10 {
            assert_eq!(ListWindow::clamped(0, count).count, count);
        }
    }

    #[test]
    fn count_outside_range_forces_ten() {
        assert_eq!(ListWindow::clamped(0, 0).count, 10);
        assert_eq!(ListWindow::clamped(0, -3).count, 10);
        assert_eq!(ListWindow::clamped(0, 11).count, 10);
        assert_eq!(ListWindow::clamped(0, 1_000_000).count, 10);
    }

    #[test]
    fn negative_start_forces_zero() {
        assert_eq!(ListWindow::clamped(-1, 5).start, 0);
        assert_eq!(ListWindow::clamped(i64::MIN, 5).start, 0);
    }

    #[test]
    fn start_has_no_upper_bound() {
        assert_eq!(ListWindow::clamped(1_000_000, 5).start, 1_000_000);
    }

    #[test]
    fn absent_body_fields_take_zero_values() {
        let fields: NewUser = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert_eq!(fields.name, "Alice");
        assert_eq!(fields.age, 0);
    }

    #[test]
    fn body_id_is_ignored_on_decode() {
        let fields: NewUser =
            serde_json::from_str(r#"{"id": 999, "name": "Alice", "age": 30}"#).unwrap();
        assert_eq!(fields.name, "Alice");
        assert_eq!(fields.age, 30);
    }

    #[test]
    fn user_round_trips_through_json() {
        let user = User {
            id: 7,
            name: "Alice".into(),
            age: 30,
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    // Repo queries are exercised end-to-end by the route integration
    // tests in http::routes::users (DATABASE_URL, --ignored).
}
