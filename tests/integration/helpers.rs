//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use dirhub_api::{AppState, build_app};
use dirhub_core::config::{AppConfig, DatabaseBackend};
use dirhub_core::types::{DirectoryId, ProjectId, TaskId, UserId};
use dirhub_database::migration::run_migrations;
use dirhub_database::{MemoryStore, PgStore, create_pool};
use dirhub_service::DirectoryService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handle for seeding and direct inspection
    pub store: MemoryStore,
}

impl TestApp {
    /// Create a new test application on an empty memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;

        let store = MemoryStore::new();
        let state = AppState::new(config, DirectoryService::new(store.clone()));

        Self {
            router: build_app(state),
            store,
        }
    }

    /// Register users, projects and tasks that directories can reference
    pub async fn seed(&self, users: &[i64], projects: &[i64], tasks: &[i64]) {
        for &id in users {
            self.store.add_user(UserId::new(id)).await;
        }
        for &id in projects {
            self.store.add_project(ProjectId::new(id)).await;
        }
        for &id in tasks {
            self.store.add_task(TaskId::new(id)).await;
        }
    }

    /// Create a root directory through the API and return its ID
    pub async fn create_root(&self, name: &str) -> DirectoryId {
        let response = self
            .request(
                "POST",
                "/api/directories",
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }

    /// Create a project directory through the API and return its ID
    pub async fn create_project_dir(&self, project: i64, parent: DirectoryId, name: &str) -> DirectoryId {
        let response = self
            .request(
                "POST",
                &format!("/api/projects/{project}/directories"),
                Some(serde_json::json!({ "name": name, "parent_id": parent })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.id()
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `data.id` member as a directory ID
    pub fn id(&self) -> DirectoryId {
        DirectoryId::new(self.data()["id"].as_i64().expect("response carries an id"))
    }

    /// The names in a `data` array of directories
    pub fn names(&self) -> Vec<String> {
        self.data()
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|d| d["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Service over a real PostgreSQL database named by `DATABASE_URL`.
///
/// Rows are never truncated; every test seeds its own users, projects and
/// tasks and only inspects rows it created.
pub struct PgHarness {
    /// Pool for seeding and direct queries
    pub pool: PgPool,
    /// Store under test
    pub store: PgStore,
    /// Service over `store`
    pub service: DirectoryService<PgStore>,
}

impl PgHarness {
    /// Connect and migrate, or `None` when `DATABASE_URL` is unset
    pub async fn connect() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;

        let mut config = AppConfig::default();
        config.database.url = url;
        config.database.max_connections = 2;

        let pool = create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let store = PgStore::new(pool.clone());
        Some(Self {
            pool,
            service: DirectoryService::new(store.clone()),
            store,
        })
    }

    /// Insert a live user
    pub async fn add_user(&self) -> UserId {
        let id: i64 = sqlx::query_scalar("INSERT INTO users (login_id) VALUES ('test') RETURNING id")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to insert user");
        UserId::new(id)
    }

    /// Insert a live project
    pub async fn add_project(&self) -> ProjectId {
        let id: i64 = sqlx::query_scalar("INSERT INTO projects (name) VALUES ('test') RETURNING id")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to insert project");
        ProjectId::new(id)
    }

    /// Insert a live task of `project`
    pub async fn add_task(&self, project: ProjectId) -> TaskId {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO tasks (project_id, name) VALUES ($1, 'test') RETURNING id",
        )
        .bind(project)
        .fetch_one(&self.pool)
        .await
        .expect("Failed to insert task");
        TaskId::new(id)
    }

    /// Insert a live document filed under `directory`
    pub async fn add_document(&self, directory: DirectoryId) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO documents (directory_id, name) VALUES ($1, 'test.pdf') RETURNING id",
        )
        .bind(directory)
        .fetch_one(&self.pool)
        .await
        .expect("Failed to insert document")
    }

    /// Raw delete flag of a directory row
    pub async fn directory_deleted(&self, id: DirectoryId) -> bool {
        sqlx::query_scalar("SELECT deleted FROM directories WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to read directory")
    }

    /// Raw delete flag of a document row
    pub async fn document_deleted(&self, id: i64) -> bool {
        sqlx::query_scalar("SELECT deleted FROM documents WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to read document")
    }

    /// Number of grant rows pointing at `directory`
    pub async fn grant_rows(&self, directory: DirectoryId) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM directory_grants WHERE directory_id = $1")
            .bind(directory)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count grants")
    }
}
