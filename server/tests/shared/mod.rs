use axum::body::{Body, to_bytes};
use extra::ApiResponse;
use http::{Request, Response};
use server::DataAccess;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub mod macros;

pub struct TestClient {
    data_access: DataAccess,
    pool: Option<SqlitePool>,
}

impl TestClient {
    pub async fn new() -> Self {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("unable to connect to test db");

        sqlx::migrate!("../migrations")
            .run(&pool)
            .await
            .expect("unable to run migrations");

        Self {
            data_access: DataAccess::from_pool(pool.clone()),
            pool: Some(pool),
        }
    }

    /// A client whose user store opens but has no `users` table.
    pub async fn without_schema() -> Self {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("unable to connect to test db");

        Self {
            data_access: DataAccess::from_pool(pool.clone()),
            pool: Some(pool),
        }
    }

    /// A client whose user store can never be opened.
    pub fn unreachable() -> Self {
        Self {
            data_access: DataAccess::new("sqlite:///nonexistent-user-store-dir/users.db")
                .expect("valid database url"),
            pool: None,
        }
    }

    pub async fn user(&self, username: &str, is_verified: bool) -> &Self {
        let pool = self.pool.as_ref().expect("client has no user store");

        sqlx::query("INSERT INTO users (username, email, is_verified) VALUES (?, ?, ?)")
            .bind(username)
            .bind(format!("{username}@test.com"))
            .bind(is_verified)
            .execute(pool)
            .await
            .expect("unable to insert user fixture");

        self
    }

    pub async fn send(&self, request: Request<Body>) -> Asserter {
        let response = server::server(self.data_access.clone())
            .oneshot(request)
            .await
            .unwrap(/* Infallible */);
        Asserter::from(response)
    }

    pub async fn check(&self, username: &str) -> Asserter {
        let query = serde_urlencoded::to_string([("username", username)])
            .expect("unable to encode query");
        let uri = format!("{}?{}", server::CHECK_USERNAME_UNIQUE_PATH, query);
        self.send(crate::request!(GET uri;;)).await
    }
}

pub struct Asserter {
    response: Response<Body>,
}

impl Asserter {
    pub fn status(self, expected: u16) -> Self {
        assert_eq!(
            self.response.status().as_u16(),
            expected,
            "expected status {}, got {}",
            expected,
            self.response.status()
        );
        self
    }

    pub fn header(self, name: &str) -> Self {
        assert!(
            self.response.headers().contains_key(name),
            "expected header `{}` in {:?}",
            name,
            self.response.headers()
        );
        self
    }

    pub async fn body(self, success: bool, message: &str) {
        assert_eq!(
            self.into_deserialized_json_body::<ApiResponse>().await,
            ApiResponse {
                success,
                message: message.to_string()
            }
        );
    }

    pub async fn into_raw_body(self) -> Vec<u8> {
        to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body")
            .to_vec()
    }

    pub async fn into_deserialized_json_body<T>(self) -> T
    where
        T: serde::de::DeserializeOwned,
    {
        let content_type = self
            .response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let body_bytes = self.into_raw_body().await;
        serde_json::from_slice::<T>(&body_bytes).expect("unable to deserialize response body")
    }
}

impl From<Response<Body>> for Asserter {
    fn from(response: Response<Body>) -> Self {
        Self { response }
    }
}

#[cfg(feature = "tracing")]
static TRACING_INIT: std::sync::Once = std::sync::Once::new();

#[cfg(feature = "tracing")]
pub fn tracing_init() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
