//! Repository for the `accounts` table.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use storefront_core::types::DbId;

use super::{with_timeout, AccountStore};
use crate::error::RepoError;
use crate::models::account::{Account, NewAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, full_name, date_of_birth, location, gender, created_at, updated_at";

/// Provides lookups and inserts for accounts.
#[derive(Debug, Clone)]
pub struct AccountRepo {
    pool: PgPool,
    query_timeout: Option<Duration>,
}

impl AccountRepo {
    pub fn new(pool: PgPool, query_timeout: Option<Duration>) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl AccountStore<DbId> for AccountRepo {
    async fn get_by_id(&self, id: DbId) -> Result<Account, RepoError> {
        with_timeout(self.query_timeout, async {
            let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
            sqlx::query_as::<_, Account>(&query)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| RepoError::not_found("Account", id))
        })
        .await
    }

    async fn get_by_email(&self, email: &str) -> Result<Account, RepoError> {
        with_timeout(self.query_timeout, async {
            let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = $1");
            sqlx::query_as::<_, Account>(&query)
                .bind(email)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| RepoError::not_found("Account", email))
        })
        .await
    }

    /// Single-row insert; a duplicate email surfaces as [`RepoError::Conflict`].
    async fn create(&self, account: Option<&NewAccount>) -> Result<Account, RepoError> {
        let input = account.ok_or(RepoError::NilEntity)?;
        let account = Account::new(input);

        with_timeout(self.query_timeout, async {
            let query = format!(
                "INSERT INTO accounts
                    (id, email, full_name, date_of_birth, location, gender, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 RETURNING {COLUMNS}"
            );
            let created = sqlx::query_as::<_, Account>(&query)
                .bind(account.id)
                .bind(&account.email)
                .bind(&account.full_name)
                .bind(account.date_of_birth)
                .bind(&account.location)
                .bind(account.gender)
                .bind(account.created_at)
                .bind(account.updated_at)
                .fetch_one(&self.pool)
                .await?;

            tracing::debug!(account_id = %created.id, "Account created");
            Ok(created)
        })
        .await
    }
}
