// src/repositories/friendship_repository.rs
//
// Directed friendship edges (user_id -> friend_id) with a status column

use std::sync::Arc;

use rusqlite::{params, Connection, TransactionBehavior};

use crate::db::ConnectionPool;
use crate::domain::{EdgeChange, FriendshipAction, FriendshipStatus, FriendshipTransition};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait FriendshipRepository: Send + Sync {
    fn get_status(&self, user_id: i64, friend_id: i64) -> AppResult<Option<FriendshipStatus>>;
    /// Reads both edges of the pair, plans `action` and writes the plan,
    /// all inside one IMMEDIATE transaction. A planning error rolls back.
    fn transition(&self, action: FriendshipAction) -> AppResult<FriendshipTransition>;
    /// Targets of all edges leaving `user_id`, ascending
    fn list_friend_ids(&self, user_id: i64) -> AppResult<Vec<i64>>;
    /// Targets shared by the edges of both users, ascending
    fn list_common_friend_ids(&self, user_id: i64, other_id: i64) -> AppResult<Vec<i64>>;
}

pub struct SqliteFriendshipRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFriendshipRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn read_status(
        conn: &Connection,
        user_id: i64,
        friend_id: i64,
    ) -> AppResult<Option<FriendshipStatus>> {
        let mut stmt =
            conn.prepare("SELECT status FROM friendship WHERE user_id = ?1 AND friend_id = ?2")?;

        let raw: String = match stmt.query_row(params![user_id, friend_id], |row| row.get(0)) {
            Ok(raw) => raw,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(AppError::Database(e)),
        };

        FriendshipStatus::parse(&raw)
            .map(Some)
            .ok_or_else(|| AppError::Other(format!("Unknown friendship status '{}'", raw)))
    }

    fn write_change(conn: &Connection, change: &EdgeChange) -> AppResult<()> {
        match change {
            EdgeChange::Upsert {
                user_id,
                friend_id,
                status,
            } => {
                conn.execute(
                    "INSERT INTO friendship (user_id, friend_id, status) VALUES (?1, ?2, ?3)
                     ON CONFLICT (user_id, friend_id) DO UPDATE SET status = excluded.status",
                    params![user_id, friend_id, status.as_str()],
                )?;
            }
            EdgeChange::Remove { user_id, friend_id } => {
                conn.execute(
                    "DELETE FROM friendship WHERE user_id = ?1 AND friend_id = ?2",
                    params![user_id, friend_id],
                )?;
            }
        }
        Ok(())
    }
}

impl FriendshipRepository for SqliteFriendshipRepository {
    fn get_status(&self, user_id: i64, friend_id: i64) -> AppResult<Option<FriendshipStatus>> {
        let conn = self.pool.get()?;
        Self::read_status(&conn, user_id, friend_id)
    }

    fn transition(&self, action: FriendshipAction) -> AppResult<FriendshipTransition> {
        let (user_id, friend_id) = action.pair();

        let mut conn = self.pool.get()?;
        // IMMEDIATE takes the write lock before the reads, so two opposite
        // requests for the same pair cannot both plan against NONE
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let forward = Self::read_status(&tx, user_id, friend_id)?;
        let reverse = Self::read_status(&tx, friend_id, user_id)?;

        let changes = action.plan(forward, reverse)?;
        for change in &changes {
            Self::write_change(&tx, change)?;
        }

        tx.commit()?;

        Ok(FriendshipTransition {
            forward,
            reverse,
            changes,
        })
    }

    fn list_friend_ids(&self, user_id: i64) -> AppResult<Vec<i64>> {
        let conn = self.pool.get()?;

        let mut stmt = conn
            .prepare("SELECT friend_id FROM friendship WHERE user_id = ?1 ORDER BY friend_id")?;

        let ids = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(ids)
    }

    fn list_common_friend_ids(&self, user_id: i64, other_id: i64) -> AppResult<Vec<i64>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT friend_id FROM friendship WHERE user_id = ?1
             INTERSECT
             SELECT friend_id FROM friendship WHERE user_id = ?2
             ORDER BY friend_id",
        )?;

        let ids = stmt
            .query_map(params![user_id, other_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::domain::UserRecord;
    use crate::repositories::{SqliteUserRepository, UserRepository};

    fn setup(users: usize) -> (SqliteFriendshipRepository, Vec<i64>, tempfile::TempDir) {
        let (pool, dir) = create_test_pool().unwrap();
        let user_repo = SqliteUserRepository::new(pool.clone());
        let ids = (0..users)
            .map(|i| {
                user_repo
                    .insert(&UserRecord {
                        email: format!("u{}@example.com", i),
                        login: format!("u{}", i),
                        name: format!("u{}", i),
                        birthday: None,
                    })
                    .unwrap()
            })
            .collect();
        (SqliteFriendshipRepository::new(pool), ids, dir)
    }

    fn request(user_id: i64, friend_id: i64) -> FriendshipAction {
        FriendshipAction::Request { user_id, friend_id }
    }

    fn remove(user_id: i64, friend_id: i64) -> FriendshipAction {
        FriendshipAction::Remove { user_id, friend_id }
    }

    #[test]
    fn test_request_then_answer() {
        let (repo, ids, _dir) = setup(2);
        let (a, b) = (ids[0], ids[1]);

        assert_eq!(repo.get_status(a, b).unwrap(), None);

        let first = repo.transition(request(a, b)).unwrap();
        assert_eq!((first.forward, first.reverse), (None, None));
        assert!(!first.confirms());
        assert_eq!(repo.get_status(a, b).unwrap(), Some(FriendshipStatus::Unconfirmed));
        assert_eq!(repo.get_status(b, a).unwrap(), None);

        let answer = repo.transition(request(b, a)).unwrap();
        assert_eq!(answer.reverse, Some(FriendshipStatus::Unconfirmed));
        assert!(answer.confirms());
        assert_eq!(repo.get_status(a, b).unwrap(), Some(FriendshipStatus::Confirmed));
        assert_eq!(repo.get_status(b, a).unwrap(), Some(FriendshipStatus::Confirmed));
    }

    #[test]
    fn test_remove() {
        let (repo, ids, _dir) = setup(2);
        let (a, b) = (ids[0], ids[1]);

        repo.transition(request(a, b)).unwrap();
        let removed = repo.transition(remove(a, b)).unwrap();
        assert_eq!(removed.forward, Some(FriendshipStatus::Unconfirmed));
        assert!(repo.list_friend_ids(a).unwrap().is_empty());

        assert!(repo.transition(remove(a, b)).unwrap().is_noop());
    }

    #[test]
    fn test_rejected_plan_writes_nothing() {
        let (repo, ids, _dir) = setup(1);
        let a = ids[0];

        let err = repo.transition(request(a, a)).unwrap_err();
        assert!(err.is_validation());
        assert!(repo.list_friend_ids(a).unwrap().is_empty());
    }

    #[test]
    fn test_failed_write_is_rolled_back() {
        let (repo, ids, _dir) = setup(1);
        let a = ids[0];

        // Friend does not exist: the foreign key rejects the edge
        assert!(repo.transition(request(a, 999)).is_err());
        assert_eq!(repo.get_status(a, 999).unwrap(), None);
    }

    #[test]
    fn test_common_friend_ids() {
        let (repo, ids, _dir) = setup(4);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

        repo.transition(request(a, c)).unwrap();
        repo.transition(request(a, d)).unwrap();
        repo.transition(request(b, c)).unwrap();

        assert_eq!(repo.list_friend_ids(a).unwrap(), vec![c, d]);
        assert_eq!(repo.list_common_friend_ids(a, b).unwrap(), vec![c]);
        assert!(repo.list_common_friend_ids(c, d).unwrap().is_empty());
    }
}
