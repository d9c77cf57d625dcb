// tests/common/mock_store.rs

use async_trait::async_trait;
use chrono::Utc;
use property_backend::domain::account_model::{self, Account};
use property_backend::domain::account_role::{AccountRole, ApprovalState};
use property_backend::domain::property_model::{self, PropertyStatus};
use property_backend::domain::rent_term_model::{self, NewRentTerm};
use property_backend::domain::subscription_model::{self, NewSubscriptionSnapshot};
use property_backend::domain::tenancy_model::{self, TenancyLink};
use property_backend::domain::{landlord_model, tenant_model};
use property_backend::error::{AppError, AppResult};
use property_backend::repository::account_repository::{AccountLogin, AccountStore, NewAccount};
use property_backend::repository::property_repository::PropertyStore;
use property_backend::repository::rent_term_repository::RentTermStore;
use property_backend::repository::subscription_repository::SubscriptionStore;
use sea_orm::DbErr;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    accounts: HashMap<Uuid, account_model::Model>,
    landlords: Vec<landlord_model::Model>,
    tenants: Vec<tenant_model::Model>,
    properties: HashMap<Uuid, property_model::Model>,
    tenancies: Vec<tenancy_model::Model>,
    rent_terms: Vec<rent_term_model::Model>,
    subscriptions: Vec<subscription_model::Model>,
    next_seq: i64,
}

impl StoreState {
    fn next_seq(&mut self) -> i64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn account(&self, model: &account_model::Model) -> AppResult<Account> {
        let landlord_id = self
            .landlords
            .iter()
            .find(|l| l.account_id == model.id)
            .map(|l| l.id);
        let tenant_id = self
            .tenants
            .iter()
            .find(|t| t.account_id == model.id)
            .map(|t| t.id);
        Account::from_model(model.clone(), landlord_id, tenant_id)
            .map_err(AppError::InternalServerError)
    }

    fn link(&self, tenancy: &tenancy_model::Model) -> AppResult<TenancyLink> {
        let property = self
            .properties
            .get(&tenancy.property_id)
            .ok_or_else(|| AppError::InternalServerError("missing property".to_string()))?;
        Ok(TenancyLink {
            tenancy_id: tenancy.id,
            property_id: tenancy.property_id,
            tenant_id: tenancy.tenant_id,
            landlord_id: property.landlord_id,
            created_at: tenancy.created_at,
        })
    }
}

/// テスト用のインメモリストア。全ストアトレイトを一つの状態で実装する
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// true の間、全ての操作がストア障害を返す
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable(DbErr::Custom(
                "connection refused".to_string(),
            )));
        }
        Ok(())
    }

    pub fn rent_term_count(&self) -> usize {
        self.state.lock().unwrap().rent_terms.len()
    }

    pub fn subscription_count(&self) -> usize {
        self.state.lock().unwrap().subscriptions.len()
    }

    /// 承認トークンハッシュを直接参照する
    pub fn approval_token_hash(&self, account_id: Uuid) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .get(&account_id)
            .and_then(|a| a.approval_token_hash.clone())
    }
}

#[async_trait]
impl AccountStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        state.accounts.get(&id).map(|m| state.account(m)).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.check()?;
        let email = email.to_lowercase();
        let state = self.state.lock().unwrap();
        state
            .accounts
            .values()
            .find(|m| m.email == email)
            .map(|m| state.account(m))
            .transpose()
    }

    async fn find_login_by_email(&self, email: &str) -> AppResult<Option<AccountLogin>> {
        self.check()?;
        let email = email.to_lowercase();
        let state = self.state.lock().unwrap();
        match state.accounts.values().find(|m| m.email == email) {
            Some(model) => Ok(Some(AccountLogin {
                account: state.account(model)?,
                password_hash: model.password_hash.clone(),
            })),
            None => Ok(None),
        }
    }

    async fn create_account(&self, new_account: NewAccount) -> AppResult<Account> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let email = new_account.email.to_lowercase();
        if state.accounts.values().any(|m| m.email == email) {
            return Err(AppError::Conflict(
                "Email is already registered".to_string(),
            ));
        }

        let now = Utc::now();
        let model = account_model::Model {
            id: Uuid::new_v4(),
            email,
            password_hash: new_account.password_hash,
            role: new_account.role.as_str().to_string(),
            approval_status: (new_account.role == AccountRole::Admin)
                .then(|| ApprovalState::Pending.as_str().to_string()),
            approval_token_hash: new_account.approval_token_hash,
            created_at: now,
            updated_at: now,
        };

        match new_account.role {
            AccountRole::Landlord => state.landlords.push(landlord_model::Model {
                id: Uuid::new_v4(),
                account_id: model.id,
                created_at: now,
            }),
            AccountRole::Tenant => state.tenants.push(tenant_model::Model {
                id: Uuid::new_v4(),
                account_id: model.id,
                created_at: now,
            }),
            AccountRole::Admin => {}
        }

        state.accounts.insert(model.id, model.clone());
        state.account(&model)
    }

    async fn approve_pending_admin(&self, token_hash: &str) -> AppResult<Option<Account>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let pending = state.accounts.values_mut().find(|m| {
            m.approval_token_hash.as_deref() == Some(token_hash)
                && m.approval_status.as_deref() == Some(ApprovalState::Pending.as_str())
        });

        let Some(model) = pending else {
            return Ok(None);
        };

        model.approval_status = Some(ApprovalState::Approved.as_str().to_string());
        model.approval_token_hash = None;
        model.updated_at = Utc::now();
        let model = model.clone();
        state.account(&model).map(Some)
    }

    async fn landlord_exists(&self, landlord_id: Uuid) -> AppResult<bool> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .landlords
            .iter()
            .any(|l| l.id == landlord_id))
    }
}

#[async_trait]
impl SubscriptionStore for InMemoryStore {
    async fn latest_for_landlord(
        &self,
        landlord_id: Uuid,
    ) -> AppResult<Option<subscription_model::Model>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .subscriptions
            .iter()
            .filter(|s| s.landlord_id == landlord_id)
            .max_by_key(|s| s.seq)
            .cloned())
    }

    async fn append(
        &self,
        snapshot: NewSubscriptionSnapshot,
    ) -> AppResult<subscription_model::Model> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let seq = state.next_seq();
        let model = subscription_model::Model {
            id: Uuid::new_v4(),
            seq,
            landlord_id: snapshot.landlord_id,
            status: snapshot.status.as_str().to_string(),
            is_active: snapshot.is_active,
            reason: snapshot.reason,
            created_at: Utc::now(),
        };
        state.subscriptions.push(model.clone());
        Ok(model)
    }

    async fn history_for_landlord(
        &self,
        landlord_id: Uuid,
    ) -> AppResult<Vec<subscription_model::Model>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let mut history: Vec<_> = state
            .subscriptions
            .iter()
            .filter(|s| s.landlord_id == landlord_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(history)
    }
}

#[async_trait]
impl PropertyStore for InMemoryStore {
    async fn create_property(
        &self,
        landlord_id: Uuid,
        address: String,
    ) -> AppResult<property_model::Model> {
        self.check()?;
        let now = Utc::now();
        let model = property_model::Model {
            id: Uuid::new_v4(),
            landlord_id,
            address,
            status: PropertyStatus::Vacant.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .properties
            .insert(model.id, model.clone());
        Ok(model)
    }

    async fn list_properties(&self, landlord_id: Uuid) -> AppResult<Vec<property_model::Model>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let mut properties: Vec<_> = state
            .properties
            .values()
            .filter(|p| p.landlord_id == landlord_id)
            .cloned()
            .collect();
        properties.sort_by_key(|p| p.created_at);
        Ok(properties)
    }

    async fn find_property(&self, property_id: Uuid) -> AppResult<Option<property_model::Model>> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .properties
            .get(&property_id)
            .cloned())
    }

    async fn create_tenancy(&self, property_id: Uuid, tenant_id: Uuid) -> AppResult<TenancyLink> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let now = Utc::now();

        let property = state
            .properties
            .get_mut(&property_id)
            .ok_or_else(|| AppError::NotFound("Property not found".to_string()))?;
        if property.status == PropertyStatus::Occupied.as_str() {
            return Err(AppError::Conflict("Property is already occupied".to_string()));
        }
        property.status = PropertyStatus::Occupied.as_str().to_string();
        property.updated_at = now;

        let seq = state.next_seq();
        let tenancy = tenancy_model::Model {
            id: Uuid::new_v4(),
            seq,
            property_id,
            tenant_id,
            created_at: now,
        };
        state.tenancies.push(tenancy.clone());
        state.link(&tenancy)
    }

    async fn find_tenancy(&self, tenancy_id: Uuid) -> AppResult<Option<TenancyLink>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        state
            .tenancies
            .iter()
            .find(|t| t.id == tenancy_id)
            .map(|t| state.link(t))
            .transpose()
    }

    async fn latest_tenancy_for_tenant(&self, tenant_id: Uuid) -> AppResult<Option<TenancyLink>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        state
            .tenancies
            .iter()
            .filter(|t| t.tenant_id == tenant_id)
            .max_by_key(|t| t.seq)
            .map(|t| state.link(t))
            .transpose()
    }
}

#[async_trait]
impl RentTermStore for InMemoryStore {
    async fn latest_for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> AppResult<Option<rent_term_model::Model>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .rent_terms
            .iter()
            .filter(|term| term.tenancy_id == tenancy_id)
            .max_by_key(|term| term.seq)
            .cloned())
    }

    async fn append(&self, term: NewRentTerm) -> AppResult<rent_term_model::Model> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let seq = state.next_seq();
        let model = rent_term_model::Model {
            id: Uuid::new_v4(),
            seq,
            tenancy_id: term.tenancy_id,
            amount: term.amount,
            due_date: term.due_date,
            created_at: Utc::now(),
        };
        state.rent_terms.push(model.clone());
        Ok(model)
    }

    async fn history_for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> AppResult<Vec<rent_term_model::Model>> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let mut history: Vec<_> = state
            .rent_terms
            .iter()
            .filter(|t| t.tenancy_id == tenancy_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(history)
    }
}
