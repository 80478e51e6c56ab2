use praetor_backend::{
    api::router::create_router,
    config::Config,
    domain::models::ldap::{DirectoryUser, LdapConfig},
    domain::models::user::{Role, User},
    domain::ports::DirectoryService,
    domain::services::auth_service::hash_password,
    error::AppError,
    infra::{db, factory::build_state},
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{Pool, Sqlite};
use std::sync::{Arc, Mutex, OnceLock};
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Directory double: returns whatever the test loaded into it.
#[derive(Default)]
pub struct MockDirectoryService {
    users: Mutex<Vec<DirectoryUser>>,
}

#[allow(dead_code)]
impl MockDirectoryService {
    pub fn set_users(&self, users: Vec<DirectoryUser>) {
        *self.users.lock().unwrap() = users;
    }
}

#[async_trait]
impl DirectoryService for MockDirectoryService {
    async fn fetch_users(&self, _config: &LdapConfig) -> Result<Vec<DirectoryUser>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

// Argon2 is slow in debug builds; hash the shared test password once.
fn password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_PASSWORD).unwrap()).clone()
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub directory: Arc<MockDirectoryService>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let pool = db::connect(&db_url).await.expect("Failed to connect to test db");
        db::run_migrations(&pool).await.expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_secret: "integration-test-secret".to_string(),
            token_ttl_days: 7,
            frontend_url: "http://localhost:5173".to_string(),
            ldap_sync_interval_secs: 3600,
        };

        let directory = Arc::new(MockDirectoryService::default());
        let state = Arc::new(build_state(&config, pool.clone(), directory.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            directory,
        }
    }

    /// Inserts a user straight into the store and returns it with a valid token.
    pub async fn seed_user(&self, name: &str, username: &str, role: Role) -> (User, String) {
        let user = User::new(name.to_string(), username.to_string(), password_hash(), role);
        let user = self.state.user_repo.create(&user).await.unwrap();
        let token = self.state.auth_service.issue_token(&user.id).unwrap();
        (user, token)
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql).fetch_one(&self.pool).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
