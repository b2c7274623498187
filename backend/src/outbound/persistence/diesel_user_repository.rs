//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{AccountRecord, ProvisionOutcome, UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, Role, User, UserCredentials, UserId, Username};

use super::diesel_error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        |message| UserPersistenceError::query(message),
        |message| UserPersistenceError::connection(message),
    )
}

fn row_to_user(row: &UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::try_from(row.id)
        .map_err(|err| UserPersistenceError::query(corrupt_row("users", "id", err)))?;
    let username = Username::new(&row.username)
        .map_err(|err| UserPersistenceError::query(corrupt_row("users", "username", err)))?;
    let role = Role::from_str(&row.role)
        .map_err(|err| UserPersistenceError::query(corrupt_row("users", "role", err)))?;
    Ok(User::new(id, username, role))
}

enum StoredOutcome {
    Created(i64),
    Updated(i64),
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|row| {
            let user = row_to_user(&row)?;
            Ok(UserCredentials {
                user,
                password_hash: PasswordHash::new(row.password_hash),
            })
        })
        .transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::role.eq(role.as_str()))
            .order((users::username.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.iter().map(row_to_user).collect()
    }

    async fn provision(
        &self,
        account: &AccountRecord,
    ) -> Result<ProvisionOutcome, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let username = account.username.as_ref();
        let role = account.role.as_str();
        let password_hash = account.password_hash.as_str();
        let overwrite_password = account.overwrite_password;

        let stored = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let existing: Option<i64> = users::table
                        .filter(users::username.eq(username))
                        .select(users::id)
                        .first(conn)
                        .await
                        .optional()?;

                    match existing {
                        Some(id) if overwrite_password => {
                            diesel::update(users::table.find(id))
                                .set((
                                    users::role.eq(role),
                                    users::password_hash.eq(password_hash),
                                ))
                                .execute(conn)
                                .await?;
                            Ok(StoredOutcome::Updated(id))
                        }
                        Some(id) => {
                            diesel::update(users::table.find(id))
                                .set(users::role.eq(role))
                                .execute(conn)
                                .await?;
                            Ok(StoredOutcome::Updated(id))
                        }
                        None => {
                            let id = diesel::insert_into(users::table)
                                .values(&NewUserRow {
                                    username,
                                    password_hash,
                                    role,
                                })
                                .returning(users::id)
                                .get_result(conn)
                                .await?;
                            Ok(StoredOutcome::Created(id))
                        }
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        let (raw_id, created) = match stored {
            StoredOutcome::Created(id) => (id, true),
            StoredOutcome::Updated(id) => (id, false),
        };
        let id = UserId::try_from(raw_id)
            .map_err(|err| UserPersistenceError::query(corrupt_row("users", "id", err)))?;
        Ok(if created {
            ProvisionOutcome::Created(id)
        } else {
            ProvisionOutcome::Updated(id)
        })
    }
}
