use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tempfile::TempDir;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

use gazette_client::{WordPressClient, WordPressConfig};
use gazette_core::SessionKeys;
use gazette_db::Database;
use gazette_server::routes;
use gazette_server::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";
pub const ADMIN_EMAIL: &str = "editor@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const INDEX_HTML: &str = "<!doctype html><title>Gazette</title>";

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub sessions: SessionKeys,
    _container: ContainerAsync<GenericImage>,
    _public_dir: TempDir,
}

impl TestApp {
    /// A valid session token for the seeded admin.
    pub fn session_token(&self) -> String {
        self.sessions.issue(ADMIN_EMAIL, Utc::now()).unwrap()
    }

    pub fn session_cookie(&self) -> String {
        format!("admin_session={}", self.session_token())
    }
}

/// WordPress stand-in serving a fixed categories listing.
fn wordpress_stub() -> Router {
    Router::new().route(
        "/wp-json/wp/v2/categories",
        get(|| async {
            axum::Json(serde_json::json!([
                {"id": 1, "name": "Uncategorized", "slug": "uncategorized", "count": 0, "taxonomy": "category"},
                {"id": 4, "name": "World", "slug": "world", "count": 5, "taxonomy": "category", "parent": 0}
            ]))
        }),
    )
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Spin up PostgreSQL, a WordPress stub and a static front-end directory,
/// seed one admin user, and return the wired router.
pub async fn setup_test_app() -> TestApp {
    let upstream = spawn(wordpress_stub()).await;
    setup_with_wordpress(&format!("{upstream}/wp-json/wp/v2")).await
}

/// Same as [`setup_test_app`] but with the CMS pointed at `wordpress_url`.
pub async fn setup_with_wordpress(wordpress_url: &str) -> TestApp {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "gazette_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let url = format!("postgresql://postgres:postgres@{host}:{port}/gazette_test");
    let db = Database::from_pool(retry_connect(&url).await);
    db.migrate().await.expect("Failed to run migrations");
    db.user_repo()
        .create(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("Failed to seed admin user");

    let public_dir = TempDir::new().expect("Failed to create public dir");
    std::fs::write(public_dir.path().join("index.html"), INDEX_HTML).unwrap();

    let wordpress = WordPressClient::new(
        &WordPressConfig::new(wordpress_url).with_cache_ttl(Duration::ZERO),
    )
    .unwrap();
    let sessions = SessionKeys::new(TEST_SECRET).unwrap();

    let state = Arc::new(AppState {
        db: db.clone(),
        sessions: sessions.clone(),
        wordpress,
        secure_cookies: false,
        public_dir: Some(public_dir.path().to_path_buf()),
    });

    TestApp {
        router: routes::router(state),
        db,
        sessions,
        _container: container,
        _public_dir: public_dir,
    }
}

async fn retry_connect(url: &str) -> PgPool {
    for _ in 0..30 {
        if let Ok(pool) = PgPoolOptions::new().max_connections(5).connect(url).await {
            return pool;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("Failed to connect to test database");
}
