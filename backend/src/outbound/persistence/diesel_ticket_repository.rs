//! PostgreSQL-backed `TicketRepository` implementation using Diesel ORM.
//!
//! Ticket rows reference users twice (creator and assignee), so display names
//! are resolved with one batched lookup per table instead of aliased joins.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{TicketRepository, TicketRepositoryError};
use crate::domain::{
    AssetId, NewTicket, TicketDetail, TicketId, TicketListFilter, TicketPriority, TicketStatus,
    TicketSummary, UserId,
};

use super::diesel_error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewTicketRow, TicketRow};
use super::pool::{DbPool, PoolError};
use super::schema::{assets, tickets, users};

/// Diesel-backed implementation of the `TicketRepository` port.
#[derive(Clone)]
pub struct DieselTicketRepository {
    pool: DbPool,
}

impl DieselTicketRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> TicketRepositoryError {
    map_pool_error(error, |message| TicketRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> TicketRepositoryError {
    map_diesel_error(
        error,
        |message| TicketRepositoryError::query(message),
        |message| TicketRepositoryError::connection(message),
    )
}

fn corrupt(column: &'static str, cause: impl std::fmt::Display) -> TicketRepositoryError {
    TicketRepositoryError::query(corrupt_row("tickets", column, cause))
}

/// Typed view of a ticket row before names are attached.
struct DecodedTicket {
    id: TicketId,
    priority: TicketPriority,
    status: TicketStatus,
    asset_id: Option<AssetId>,
    created_by: UserId,
    assigned_to: Option<UserId>,
}

fn decode(row: &TicketRow) -> Result<DecodedTicket, TicketRepositoryError> {
    Ok(DecodedTicket {
        id: TicketId::try_from(row.id).map_err(|err| corrupt("id", err))?,
        priority: TicketPriority::from_str(&row.priority).map_err(|err| corrupt("priority", err))?,
        status: TicketStatus::from_str(&row.status).map_err(|err| corrupt("status", err))?,
        asset_id: row
            .asset_id
            .map(AssetId::try_from)
            .transpose()
            .map_err(|err| corrupt("asset_id", err))?,
        created_by: UserId::try_from(row.created_by).map_err(|err| corrupt("created_by", err))?,
        assigned_to: row
            .assigned_to
            .map(UserId::try_from)
            .transpose()
            .map_err(|err| corrupt("assigned_to", err))?,
    })
}

/// Display names keyed by row id.
#[derive(Default)]
struct Names {
    users: HashMap<i64, String>,
    assets: HashMap<i64, String>,
}

impl Names {
    fn user(&self, id: Option<i64>) -> Option<String> {
        id.and_then(|id| self.users.get(&id).cloned())
    }

    fn asset(&self, id: Option<i64>) -> Option<String> {
        id.and_then(|id| self.assets.get(&id).cloned())
    }
}

async fn load_names(
    conn: &mut AsyncPgConnection,
    rows: &[TicketRow],
    include_creator: bool,
) -> Result<Names, TicketRepositoryError> {
    let mut user_ids = BTreeSet::new();
    let mut asset_ids = BTreeSet::new();
    for row in rows {
        user_ids.extend(row.assigned_to);
        if include_creator {
            user_ids.insert(row.created_by);
        }
        asset_ids.extend(row.asset_id);
    }

    let mut names = Names::default();
    if !user_ids.is_empty() {
        let found: Vec<(i64, String)> = users::table
            .filter(users::id.eq_any(user_ids.into_iter().collect::<Vec<_>>()))
            .select((users::id, users::username))
            .load(conn)
            .await
            .map_err(diesel_error)?;
        names.users = found.into_iter().collect();
    }
    if !asset_ids.is_empty() {
        let found: Vec<(i64, String)> = assets::table
            .filter(assets::id.eq_any(asset_ids.into_iter().collect::<Vec<_>>()))
            .select((assets::id, assets::name))
            .load(conn)
            .await
            .map_err(diesel_error)?;
        names.assets = found.into_iter().collect();
    }
    Ok(names)
}

fn to_summary(row: TicketRow, names: &Names) -> Result<TicketSummary, TicketRepositoryError> {
    let decoded = decode(&row)?;
    Ok(TicketSummary {
        id: decoded.id,
        title: row.title,
        priority: decoded.priority,
        status: decoded.status,
        assigned_to_name: names.user(row.assigned_to),
        asset_name: names.asset(row.asset_id),
        created_at: row.created_at,
    })
}

fn to_detail(row: TicketRow, names: &Names) -> Result<TicketDetail, TicketRepositoryError> {
    let decoded = decode(&row)?;
    let created_by_name = names
        .user(Some(row.created_by))
        .ok_or_else(|| corrupt("created_by", "creator row missing"))?;
    Ok(TicketDetail {
        id: decoded.id,
        title: row.title,
        description: row.description,
        priority: decoded.priority,
        status: decoded.status,
        asset_id: decoded.asset_id,
        asset_name: names.asset(row.asset_id),
        created_by: decoded.created_by,
        created_by_name,
        assigned_to: decoded.assigned_to,
        assigned_to_name: names.user(row.assigned_to),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn affected(rows: usize) -> u64 {
    u64::try_from(rows).unwrap_or(u64::MAX)
}

#[async_trait]
impl TicketRepository for DieselTicketRepository {
    async fn insert(&self, ticket: &NewTicket) -> Result<TicketId, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = NewTicketRow {
            title: &ticket.title,
            description: &ticket.description,
            priority: ticket.priority.as_str(),
            status: ticket.status.as_str(),
            asset_id: ticket.asset_id.map(AssetId::get),
            created_by: ticket.created_by.get(),
            created_at: ticket.created_at,
            updated_at: ticket.created_at,
        };
        let id: i64 = diesel::insert_into(tickets::table)
            .values(&row)
            .returning(tickets::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        TicketId::try_from(id).map_err(|err| corrupt("id", err))
    }

    async fn update_status(
        &self,
        id: TicketId,
        status: TicketStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows = diesel::update(tickets::table.find(id.get()))
            .set((
                tickets::status.eq(status.as_str()),
                tickets::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected(rows))
    }

    async fn update_assignee(
        &self,
        id: TicketId,
        assignee: Option<UserId>,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows = diesel::update(tickets::table.find(id.get()))
            .set((
                tickets::assigned_to.eq(assignee.map(UserId::get)),
                tickets::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(affected(rows))
    }

    async fn list(
        &self,
        filter: &TicketListFilter,
    ) -> Result<Vec<TicketSummary>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = tickets::table.select(TicketRow::as_select()).into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(tickets::status.eq(status.as_str()));
        }
        if let Some(assignee) = filter.assigned_to {
            query = query.filter(tickets::assigned_to.eq(assignee.get()));
        }
        let rows: Vec<TicketRow> = query
            .order((tickets::created_at.desc(), tickets::id.desc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        let names = load_names(&mut conn, &rows, false).await?;
        rows.into_iter()
            .map(|row| to_summary(row, &names))
            .collect()
    }

    async fn find_detail(
        &self,
        id: TicketId,
    ) -> Result<Option<TicketDetail>, TicketRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let Some(row) = tickets::table
            .find(id.get())
            .select(TicketRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
        else {
            return Ok(None);
        };

        let names = load_names(&mut conn, std::slice::from_ref(&row), true).await?;
        to_detail(row, &names).map(Some)
    }
}
