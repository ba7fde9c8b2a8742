//! Account use cases.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use storefront_core::types::DbId;
use storefront_core::validation::{parse_id, require_non_blank};
use storefront_db::models::account::{Account, Gender, NewAccount};
use storefront_db::repositories::AccountStore;
use validator::Validate;

use super::ServiceError;

/// Body of `POST /account`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAccountCommand {
    #[validate(length(min = 3, max = 320, message = "email must be between 3 and 320 characters"))]
    pub email: String,
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    /// `"Male"`, `"Female"` or `"Other"`; anything else is treated as `Other`.
    pub gender: Option<String>,
}

impl CreateAccountCommand {
    fn to_new_account(&self) -> NewAccount {
        NewAccount {
            email: self.email.trim().to_string(),
            full_name: self.full_name.clone(),
            date_of_birth: self.date_of_birth,
            location: self.location.clone(),
            gender: self
                .gender
                .as_deref()
                .map(Gender::from_label)
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore<DbId>>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore<DbId>>) -> Self {
        Self { store }
    }

    /// Create an account. A blank email is rejected without touching the store.
    #[tracing::instrument(skip(self, command), fields(email = %command.email))]
    pub async fn create(&self, command: &CreateAccountCommand) -> Result<Account, ServiceError> {
        require_non_blank(&command.email, "email")?;
        command.validate()?;

        let input = command.to_new_account();
        self.store
            .create(Some(&input))
            .await
            .map_err(ServiceError::repository(format!(
                "failed to create account: {}",
                input.email
            )))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Account, ServiceError> {
        let account_id = parse_id(id, "account id")?;
        self.store
            .get_by_id(account_id)
            .await
            .map_err(ServiceError::repository(format!(
                "failed to get account by id: {account_id}"
            )))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Account, ServiceError> {
        require_non_blank(email, "email")?;
        let email = email.trim();
        self.store
            .get_by_email(email)
            .await
            .map_err(ServiceError::repository(format!(
                "failed to get account by email: {email}"
            )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use storefront_db::RepoError;

    use super::*;

    /// Accounts kept in a vector; counts calls so tests can assert "no I/O".
    #[derive(Default)]
    struct MemoryAccounts {
        rows: Mutex<Vec<Account>>,
        calls: Mutex<usize>,
    }

    impl MemoryAccounts {
        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }

        fn touch(&self) {
            *self.calls.lock().unwrap() += 1;
        }
    }

    #[async_trait]
    impl AccountStore<DbId> for MemoryAccounts {
        async fn get_by_id(&self, id: DbId) -> Result<Account, RepoError> {
            self.touch();
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or(RepoError::NotFound {
                    entity: "Account",
                    key: id.to_string(),
                })
        }

        async fn get_by_email(&self, email: &str) -> Result<Account, RepoError> {
            self.touch();
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.email == email)
                .cloned()
                .ok_or(RepoError::NotFound {
                    entity: "Account",
                    key: email.to_string(),
                })
        }

        async fn create(&self, account: Option<&NewAccount>) -> Result<Account, RepoError> {
            self.touch();
            let input = account.ok_or(RepoError::NilEntity)?;
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|a| a.email == input.email) {
                return Err(RepoError::Conflict("uq_accounts_email".into()));
            }
            let account = Account::new(input);
            rows.push(account.clone());
            Ok(account)
        }
    }

    fn service() -> (AccountService, Arc<MemoryAccounts>) {
        let store = Arc::new(MemoryAccounts::default());
        (AccountService::new(store.clone()), store)
    }

    fn command(email: &str) -> CreateAccountCommand {
        CreateAccountCommand {
            email: email.to_string(),
            gender: Some("female".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_lookup_by_id_and_email() {
        let (service, _) = service();

        let created = service.create(&command(" fake@mail.com ")).await.unwrap();
        assert_eq!(created.email, "fake@mail.com");
        assert_eq!(created.gender, Gender::Female);

        let by_id = service.get_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(by_id, created);
        let by_email = service.get_by_email("fake@mail.com").await.unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn blank_email_is_rejected_before_the_store() {
        let (service, store) = service();

        let err = service.create(&command("   ")).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation(_));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn overlong_email_is_rejected() {
        let (service, store) = service();

        let long = format!("{}@mail.com", "x".repeat(320));
        let err = service.create(&command(&long)).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation(_));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn too_short_email_is_rejected() {
        let (service, store) = service();

        let err = service.create(&command("ab")).await.unwrap_err();
        assert_matches!(err, ServiceError::Validation(ref m) if m.contains("between 3 and 320"));
        assert_eq!(store.calls(), 0);

        service.create(&command("a@b")).await.unwrap();
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn unknown_gender_label_defaults_to_other() {
        let (service, _) = service();

        let mut cmd = command("g@mail.com");
        cmd.gender = Some("unspecified".into());
        let created = service.create(&cmd).await.unwrap();
        assert_eq!(created.gender, Gender::Other);
    }

    #[tokio::test]
    async fn malformed_id_names_the_value() {
        let (service, store) = service();

        let err = service.get_by_id("not-a-uuid").await.unwrap_err();
        assert_matches!(err, ServiceError::Validation(ref msg) if msg.contains("not-a-uuid"));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn missing_account_keeps_not_found_underneath() {
        let (service, _) = service();
        let id = storefront_core::types::new_id();

        let err = service.get_by_id(&id.to_string()).await.unwrap_err();
        assert_eq!(err.to_string(), format!("failed to get account by id: {id}"));
        assert!(err.repo_error().is_some_and(RepoError::is_not_found));
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_conflict() {
        let (service, _) = service();
        service.create(&command("dup@mail.com")).await.unwrap();

        let err = service.create(&command("dup@mail.com")).await.unwrap_err();
        assert_matches!(err.repo_error(), Some(RepoError::Conflict(_)));
    }
}
