//! End-to-end tests of bearer attachment and 401 recovery over a scripted
//! network backend.

use async_trait::async_trait;
use elanis_api::{
    ApiClient, ApiError, ApiRequest, ApiResponse, ClientConfig, CredentialStore, Network,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct MockCredentials {
    access: Mutex<Option<String>>,
    refresh: Mutex<Option<String>>,
    stored: Mutex<Vec<(String, String)>>,
}

impl MockCredentials {
    fn new(access: Option<&str>, refresh: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            access: Mutex::new(access.map(String::from)),
            refresh: Mutex::new(refresh.map(String::from)),
            stored: Mutex::new(Vec::new()),
        })
    }
}

impl CredentialStore for MockCredentials {
    fn access_token(&self) -> Option<String> {
        self.access.lock().unwrap().clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.refresh.lock().unwrap().clone()
    }

    fn store_tokens(&self, access_token: &str, refresh_token: &str) {
        *self.access.lock().unwrap() = Some(access_token.to_string());
        *self.refresh.lock().unwrap() = Some(refresh_token.to_string());
        self.stored
            .lock()
            .unwrap()
            .push((access_token.to_string(), refresh_token.to_string()));
    }
}

enum DataMode {
    /// Pop one status per data call, in order.
    Script(Mutex<VecDeque<u16>>),
    /// 401 for fresh requests, 200 for replays.
    ByRetryFlag,
}

struct MockNetwork {
    mode: DataMode,
    refresh_succeeds: bool,
    refresh_calls: AtomicUsize,
    data_calls: AtomicUsize,
    bearers_seen: Mutex<Vec<Option<String>>>,
    barrier: Option<Arc<tokio::sync::Barrier>>,
}

impl MockNetwork {
    fn scripted(statuses: &[u16], refresh_succeeds: bool) -> Arc<Self> {
        Arc::new(Self {
            mode: DataMode::Script(Mutex::new(statuses.iter().copied().collect())),
            refresh_succeeds,
            refresh_calls: AtomicUsize::new(0),
            data_calls: AtomicUsize::new(0),
            bearers_seen: Mutex::new(Vec::new()),
            barrier: None,
        })
    }

    fn by_retry_flag(barrier: Arc<tokio::sync::Barrier>) -> Arc<Self> {
        Arc::new(Self {
            mode: DataMode::ByRetryFlag,
            refresh_succeeds: true,
            refresh_calls: AtomicUsize::new(0),
            data_calls: AtomicUsize::new(0),
            bearers_seen: Mutex::new(Vec::new()),
            barrier: Some(barrier),
        })
    }
}

fn ok_body() -> &'static str {
    r#"{"succeeded":true,"data":{"ok":true},"message":"ok"}"#
}

fn expired_body() -> &'static str {
    r#"{"succeeded":false,"data":null,"message":"expired"}"#
}

#[async_trait]
impl Network for MockNetwork {
    async fn execute(&self, url: &str, request: ApiRequest) -> elanis_api::Result<ApiResponse> {
        if url.ends_with("/Account/refresh-token") {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            let body = if self.refresh_succeeds {
                r#"{"succeeded":true,"data":{"accessToken":"new-access","refreshToken":"new-refresh"},"message":"ok"}"#
            } else {
                r#"{"succeeded":false,"data":null,"message":"refresh token revoked"}"#
            };
            return Ok(ApiResponse::new(200, body));
        }

        self.data_calls.fetch_add(1, Ordering::SeqCst);
        self.bearers_seen.lock().unwrap().push(request.bearer.clone());

        let status = match &self.mode {
            DataMode::Script(script) => script.lock().unwrap().pop_front().unwrap_or(200),
            DataMode::ByRetryFlag => {
                if request.retried {
                    200
                } else {
                    // Hold fresh requests until every concurrent caller has
                    // seen its 401 with the stale token.
                    if let Some(barrier) = &self.barrier {
                        barrier.wait().await;
                    }
                    401
                }
            }
        };

        let body = if status == 401 { expired_body() } else { ok_body() };
        Ok(ApiResponse::new(status, body))
    }
}

fn client(network: Arc<MockNetwork>, credentials: Arc<MockCredentials>) -> ApiClient {
    ApiClient::with_network(network, ClientConfig::default(), credentials)
}

#[tokio::test]
async fn attaches_bearer_from_store() {
    let network = MockNetwork::scripted(&[200], true);
    let credentials = MockCredentials::new(Some("abc"), Some("r1"));
    let api = client(network.clone(), credentials);

    let response = api.get("/Jobs").await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(
        network.bearers_seen.lock().unwrap().as_slice(),
        &[Some("abc".to_string())]
    );
}

#[tokio::test]
async fn refreshes_once_and_replays_with_new_token() {
    let network = MockNetwork::scripted(&[401, 200], true);
    let credentials = MockCredentials::new(Some("stale"), Some("r1"));
    let api = client(network.clone(), credentials.clone());

    let response = api.get("/Jobs").await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(network.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(network.data_calls.load(Ordering::SeqCst), 2);

    let bearers = network.bearers_seen.lock().unwrap();
    assert_eq!(bearers[0].as_deref(), Some("stale"));
    assert_eq!(bearers[1].as_deref(), Some("new-access"));

    let stored = credentials.stored.lock().unwrap();
    assert_eq!(
        stored.as_slice(),
        &[("new-access".to_string(), "new-refresh".to_string())]
    );
}

#[tokio::test]
async fn two_consecutive_401s_refresh_exactly_once() {
    let network = MockNetwork::scripted(&[401, 401], true);
    let credentials = MockCredentials::new(Some("stale"), Some("r1"));
    let api = client(network.clone(), credentials);

    // The replay's 401 passes through; no second refresh, no loop.
    let response = api.get("/Jobs").await.unwrap();
    assert_eq!(response.status, 401);
    assert_eq!(network.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(network.data_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_refresh_token_returns_original_401_without_refresh_call() {
    let network = MockNetwork::scripted(&[401], true);
    let credentials = MockCredentials::new(Some("stale"), None);
    let api = client(network.clone(), credentials);

    let response = api.get("/Jobs").await.unwrap();
    assert_eq!(response.status, 401);
    assert_eq!(network.refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(network.data_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_refresh_supersedes_original_401() {
    let network = MockNetwork::scripted(&[401], false);
    let credentials = MockCredentials::new(Some("stale"), Some("r1"));
    let api = client(network.clone(), credentials);

    let err = api.get("/Jobs").await.unwrap_err();
    assert!(matches!(err, ApiError::AuthenticationFailed(_)));
    assert_eq!(network.data_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_401s_share_a_single_refresh() {
    let barrier = Arc::new(tokio::sync::Barrier::new(2));
    let network = MockNetwork::by_retry_flag(barrier);
    let credentials = MockCredentials::new(Some("stale"), Some("r1"));
    let api = client(network.clone(), credentials);

    let (a, b) = tokio::join!(api.get("/Jobs"), api.get("/Bookings"));
    assert_eq!(a.unwrap().status, 200);
    assert_eq!(b.unwrap().status, 200);
    assert_eq!(network.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_401_statuses_pass_through_unchanged() {
    let network = MockNetwork::scripted(&[503], true);
    let credentials = MockCredentials::new(Some("abc"), Some("r1"));
    let api = client(network.clone(), credentials);

    let response = api.get("/Jobs").await.unwrap();
    assert_eq!(response.status, 503);
    assert_eq!(network.refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(network.data_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn logout_notification_carries_the_given_token() {
    let network = MockNetwork::scripted(&[200], true);
    let credentials = MockCredentials::new(Some("abc"), Some("r1"));
    let api = client(network.clone(), credentials);

    api.notify_logout("abc").await.unwrap();
    assert_eq!(
        network.bearers_seen.lock().unwrap().as_slice(),
        &[Some("abc".to_string())]
    );
}
