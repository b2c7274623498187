//! Mutex-guarded store implementing every repository port.
//!
//! Foreign keys and the unique columns mirror the PostgreSQL schema so
//! integration tests see the same failures the Diesel adapters report.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AccountRecord, AssetRepository, AssetRepositoryError, ProvisionOutcome, TicketRepository,
    TicketRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Asset, AssetId, AssetListFilter, NewAsset, NewTicket, PasswordHash, Role, TicketDetail,
    TicketId, TicketListFilter, TicketStatus, TicketSummary, User, UserCredentials, UserId,
};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: PasswordHash,
}

#[derive(Debug, Clone)]
struct StoredTicket {
    id: TicketId,
    ticket: NewTicket,
    assigned_to: Option<UserId>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<StoredUser>,
    assets: Vec<Asset>,
    tickets: Vec<StoredTicket>,
    user_seq: Sequence,
    asset_seq: Sequence,
    ticket_seq: Sequence,
}

/// Per-table counter standing in for a `BIGSERIAL` column.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

impl Tables {

    fn username(&self, id: UserId) -> Option<String> {
        self.users
            .iter()
            .find(|stored| stored.user.id() == id)
            .map(|stored| stored.user.username().to_string())
    }

    fn asset_name(&self, id: AssetId) -> Option<String> {
        self.assets
            .iter()
            .find(|asset| asset.id == id)
            .map(|asset| asset.name.clone())
    }

    fn ticket_mut(&mut self, id: TicketId) -> Option<&mut StoredTicket> {
        self.tickets.iter_mut().find(|stored| stored.id == id)
    }
}

/// In-memory users, assets, and tickets.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Number of stored tickets.
    pub fn ticket_count(&self) -> usize {
        self.lock().tickets.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|stored| stored.user.username().as_ref() == username)
            .map(|stored| UserCredentials {
                user: stored.user.clone(),
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|stored| stored.user.id() == id)
            .map(|stored| stored.user.clone()))
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = self
            .lock()
            .users
            .iter()
            .filter(|stored| stored.user.role() == role)
            .map(|stored| stored.user.clone())
            .collect();
        users.sort_by(|a, b| {
            a.username()
                .as_ref()
                .cmp(b.username().as_ref())
                .then(a.id().get().cmp(&b.id().get()))
        });
        Ok(users)
    }

    async fn provision(
        &self,
        account: &AccountRecord,
    ) -> Result<ProvisionOutcome, UserPersistenceError> {
        let mut tables = self.lock();
        if let Some(stored) = tables
            .users
            .iter_mut()
            .find(|stored| stored.user.username() == &account.username)
        {
            stored.user = User::new(stored.user.id(), account.username.clone(), account.role);
            if account.overwrite_password {
                stored.password_hash = account.password_hash.clone();
            }
            return Ok(ProvisionOutcome::Updated(stored.user.id()));
        }
        let id = UserId::new(tables.user_seq.next())
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        tables.users.push(StoredUser {
            user: User::new(id, account.username.clone(), account.role),
            password_hash: account.password_hash.clone(),
        });
        Ok(ProvisionOutcome::Created(id))
    }
}

#[async_trait]
impl AssetRepository for InMemoryStore {
    async fn insert(&self, asset: &NewAsset) -> Result<AssetId, AssetRepositoryError> {
        let mut tables = self.lock();
        let duplicate_serial = asset.serial_number.as_ref().is_some_and(|serial| {
            tables
                .assets
                .iter()
                .any(|existing| existing.serial_number.as_ref() == Some(serial))
        });
        if duplicate_serial {
            return Err(AssetRepositoryError::query(
                "unique violation on assets.serial_number",
            ));
        }
        let id = AssetId::new(tables.asset_seq.next())
            .map_err(|err| AssetRepositoryError::query(err.to_string()))?;
        tables.assets.push(Asset {
            id,
            name: asset.name.clone(),
            asset_type: asset.asset_type.clone(),
            serial_number: asset.serial_number.clone(),
            location: asset.location.clone(),
            status: asset.status,
            created_at: asset.created_at,
            updated_at: asset.created_at,
        });
        Ok(id)
    }

    async fn list(&self, filter: &AssetListFilter) -> Result<Vec<Asset>, AssetRepositoryError> {
        let mut assets: Vec<Asset> = self
            .lock()
            .assets
            .iter()
            .filter(|asset| filter.status.is_none_or(|status| asset.status == status))
            .cloned()
            .collect();
        assets.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.get().cmp(&b.id.get())));
        Ok(assets)
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn insert(&self, ticket: &NewTicket) -> Result<TicketId, TicketRepositoryError> {
        let mut tables = self.lock();
        if tables.username(ticket.created_by).is_none() {
            return Err(TicketRepositoryError::query(
                "foreign key violation on tickets.created_by",
            ));
        }
        if ticket
            .asset_id
            .is_some_and(|asset_id| tables.asset_name(asset_id).is_none())
        {
            return Err(TicketRepositoryError::query(
                "foreign key violation on tickets.asset_id",
            ));
        }
        let id = TicketId::new(tables.ticket_seq.next())
            .map_err(|err| TicketRepositoryError::query(err.to_string()))?;
        tables.tickets.push(StoredTicket {
            id,
            ticket: ticket.clone(),
            assigned_to: None,
            updated_at: ticket.created_at,
        });
        Ok(id)
    }

    async fn update_status(
        &self,
        id: TicketId,
        status: TicketStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, TicketRepositoryError> {
        let mut tables = self.lock();
        Ok(match tables.ticket_mut(id) {
            Some(stored) => {
                stored.ticket.status = status;
                stored.updated_at = updated_at;
                1
            }
            None => 0,
        })
    }

    async fn update_assignee(
        &self,
        id: TicketId,
        assigned_to: Option<UserId>,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, TicketRepositoryError> {
        let mut tables = self.lock();
        if assigned_to.is_some_and(|user_id| tables.username(user_id).is_none()) {
            return Err(TicketRepositoryError::query(
                "foreign key violation on tickets.assigned_to",
            ));
        }
        Ok(match tables.ticket_mut(id) {
            Some(stored) => {
                stored.assigned_to = assigned_to;
                stored.updated_at = updated_at;
                1
            }
            None => 0,
        })
    }

    async fn list(
        &self,
        filter: &TicketListFilter,
    ) -> Result<Vec<TicketSummary>, TicketRepositoryError> {
        let tables = self.lock();
        let mut rows: Vec<&StoredTicket> = tables
            .tickets
            .iter()
            .filter(|stored| filter.status.is_none_or(|status| stored.ticket.status == status))
            .filter(|stored| {
                filter
                    .assigned_to
                    .is_none_or(|user_id| stored.assigned_to == Some(user_id))
            })
            .collect();
        rows.sort_by(|a, b| {
            b.ticket
                .created_at
                .cmp(&a.ticket.created_at)
                .then(b.id.get().cmp(&a.id.get()))
        });
        Ok(rows
            .into_iter()
            .map(|stored| TicketSummary {
                id: stored.id,
                title: stored.ticket.title.clone(),
                priority: stored.ticket.priority,
                status: stored.ticket.status,
                assigned_to_name: stored.assigned_to.and_then(|id| tables.username(id)),
                asset_name: stored.ticket.asset_id.and_then(|id| tables.asset_name(id)),
                created_at: stored.ticket.created_at,
            })
            .collect())
    }

    async fn find_detail(
        &self,
        id: TicketId,
    ) -> Result<Option<TicketDetail>, TicketRepositoryError> {
        let tables = self.lock();
        let Some(stored) = tables.tickets.iter().find(|stored| stored.id == id) else {
            return Ok(None);
        };
        let created_by_name = tables.username(stored.ticket.created_by).ok_or_else(|| {
            TicketRepositoryError::query("ticket creator no longer exists")
        })?;
        Ok(Some(TicketDetail {
            id: stored.id,
            title: stored.ticket.title.clone(),
            description: stored.ticket.description.clone(),
            priority: stored.ticket.priority,
            status: stored.ticket.status,
            asset_id: stored.ticket.asset_id,
            asset_name: stored.ticket.asset_id.and_then(|id| tables.asset_name(id)),
            created_by: stored.ticket.created_by,
            created_by_name,
            assigned_to: stored.assigned_to,
            assigned_to_name: stored.assigned_to.and_then(|id| tables.username(id)),
            created_at: stored.ticket.created_at,
            updated_at: stored.updated_at,
        }))
    }
}
