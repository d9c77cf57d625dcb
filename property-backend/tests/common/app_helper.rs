// tests/common/app_helper.rs

use super::mock_store::InMemoryStore;
use super::request::{create_request, response_json};
use async_trait::async_trait;
use axum::{body::Body, http::Response, http::StatusCode, Router};
use property_backend::api::{build_router, AppState, Stores};
use property_backend::config::AppConfig;
use property_backend::domain::account_model::Account;
use property_backend::domain::subscription_model::NewSubscriptionSnapshot;
use property_backend::domain::subscription_status::SubscriptionStatus;
use property_backend::error::AppResult;
use property_backend::repository::subscription_repository::SubscriptionStore;
use property_backend::service::admin_approval::ApprovalNotifier;
use property_backend::utils::credential::CredentialCodec;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "Password123";

/// 承認リンクを記録する通知実装
#[derive(Default)]
pub struct RecordingNotifier {
    links: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// 指定メールアドレス宛の最新リンクからトークンを取り出す
    pub fn token_for(&self, email: &str) -> Option<String> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .and_then(|(_, link)| link.rsplit('/').next().map(str::to_string))
    }

    pub fn sent_count(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl ApprovalNotifier for RecordingNotifier {
    async fn send_approval_link(&self, account: &Account, approval_link: &str) -> AppResult<()> {
        self.links
            .lock()
            .unwrap()
            .push((account.email.clone(), approval_link.to_string()));
        Ok(())
    }
}

pub struct TestLandlord {
    pub account_id: Uuid,
    pub landlord_id: Uuid,
    pub token: String,
}

pub struct TestTenant {
    pub account_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub token: String,
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub config: AppConfig,
}

pub fn stores(store: &Arc<InMemoryStore>) -> Stores {
    Stores {
        accounts: store.clone(),
        subscriptions: store.clone(),
        properties: store.clone(),
        rent_terms: store.clone(),
    }
}

pub fn setup_app() -> TestApp {
    setup_app_with_config(AppConfig::for_testing())
}

pub fn setup_app_with_config(config: AppConfig) -> TestApp {
    super::init_test_env();

    let store = Arc::new(InMemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::with_notifier(stores(&store), &config, notifier.clone())
        .expect("build app state");

    TestApp {
        router: build_router(state.clone()),
        state,
        store,
        notifier,
        config,
    }
}

impl TestApp {
    pub fn codec(&self) -> CredentialCodec {
        CredentialCodec::new(self.config.credential.clone()).unwrap()
    }

    pub async fn send(&self, request: axum::http::Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn signup(&self, email: &str, role: &str) -> Value {
        let body = json!({ "email": email, "password": TEST_PASSWORD, "role": role });
        let response = self
            .send(create_request("POST", "/auth/signup", None, Some(&body)))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response_json(response).await["data"].clone()
    }

    pub async fn signin(&self, email: &str) -> String {
        let body = json!({ "email": email, "password": TEST_PASSWORD });
        let response = self
            .send(create_request("POST", "/auth/signin", None, Some(&body)))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        response_json(response).await["data"]["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    pub async fn landlord(&self, email: &str) -> TestLandlord {
        let account = self.signup(email, "landlord").await;
        TestLandlord {
            account_id: account["id"].as_str().unwrap().parse().unwrap(),
            landlord_id: account["landlord_id"].as_str().unwrap().parse().unwrap(),
            token: self.signin(email).await,
        }
    }

    /// 有効なサブスクリプションを持つ大家
    pub async fn active_landlord(&self, email: &str) -> TestLandlord {
        let landlord = self.landlord(email).await;
        self.record_subscription(landlord.landlord_id, SubscriptionStatus::Active, true)
            .await;
        landlord
    }

    pub async fn tenant(&self, email: &str) -> TestTenant {
        let account = self.signup(email, "tenant").await;
        TestTenant {
            account_id: account["id"].as_str().unwrap().parse().unwrap(),
            tenant_id: account["tenant_id"].as_str().unwrap().parse().unwrap(),
            email: email.to_string(),
            token: self.signin(email).await,
        }
    }

    /// 登録して承認済みにした管理者のトークン
    pub async fn approved_admin(&self, email: &str) -> String {
        let body = json!({ "email": email, "password": TEST_PASSWORD });
        let response = self
            .send(create_request("POST", "/admin/register", None, Some(&body)))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let token = self.notifier.token_for(email).unwrap();
        let response = self
            .send(super::request::get(&format!("/admin/approve/{}", token), None))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        self.signin(email).await
    }

    pub async fn record_subscription(
        &self,
        landlord_id: Uuid,
        status: SubscriptionStatus,
        is_active: bool,
    ) {
        SubscriptionStore::append(
            &*self.store,
            NewSubscriptionSnapshot {
                landlord_id,
                status,
                is_active,
                reason: None,
            },
        )
        .await
        .unwrap();
    }

    /// 物件を作成してテナントを紐付け、(物件ID, テナンシーID) を返す
    pub async fn property_with_tenant(
        &self,
        landlord: &TestLandlord,
        tenant_email: &str,
    ) -> (Uuid, Uuid) {
        let body = json!({ "address": "1-2-3 Example Street" });
        let response = self
            .send(create_request(
                "POST",
                "/landlord/properties",
                Some(&landlord.token),
                Some(&body),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let property_id: Uuid = response_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();

        let body = json!({ "tenant_email": tenant_email });
        let response = self
            .send(create_request(
                "POST",
                &format!("/landlord/properties/{}/tenancies", property_id),
                Some(&landlord.token),
                Some(&body),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let tenancy_id: Uuid = response_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();

        (property_id, tenancy_id)
    }

    pub async fn append_rent(
        &self,
        landlord: &TestLandlord,
        tenancy_id: Uuid,
        amount: i64,
        due_date: &str,
    ) -> Response<Body> {
        let body = json!({ "amount": amount, "due_date": due_date });
        self.send(create_request(
            "POST",
            &format!("/landlord/tenancies/{}/rent-terms", tenancy_id),
            Some(&landlord.token),
            Some(&body),
        ))
        .await
    }
}
