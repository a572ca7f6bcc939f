mod api;
mod middleware;
mod span;
mod types;

pub use api::username::check_unique::{FAILED, PATH as CHECK_USERNAME_UNIQUE_PATH, TAKEN, UNIQUE};
pub use data_access::DataAccess;
pub use types::Username;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::{Router, middleware::from_fn, routing::get};
use contextual::Context;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

#[derive(Debug, clap::Args)]
pub struct ServerOpts {
    /// The database connection URL of the user store.
    /// Example: `sqlite:///tmp/data/data.db` (or) `/tmp/data/data.db` (or) `./data.db`
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// The address the server binds to.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// The port number on which the server will listen for incoming connections.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Clone)]
pub struct AppState {
    pub data_access: DataAccess,
}

pub fn server(data_access: DataAccess) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(from_fn(middleware::mw_client_ip))
        .layer(TraceLayer::new_for_http().make_span_with(span::span))
        .layer(from_fn(middleware::latency_ms));

    let router = Router::new()
        .route(
            api::username::check_unique::PATH,
            get(api::username::check_unique::handler),
        )
        .route(api::health::PATH, get(api::health::handler));

    #[cfg(feature = "openapi")]
    let router = router.route(api::OPEN_API_DOCS_PATH, get(axum::Json(api::openapi())));

    router
        .with_state(AppState { data_access })
        .layer(middleware)
}

/// Binds the listener and serves until the process is stopped.
///
/// The user store is not contacted here; the first request opens the pool.
pub async fn serve(opts: ServerOpts) -> Result<(), ServerError> {
    tracing::info!("{:?}", opts);

    let data_access = DataAccess::new(&opts.database_url)
        .context(format!("database url :: {}", opts.database_url))?;

    let app = server(data_access).into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from((opts.host, opts.port));
    let listener = TcpListener::bind(addr)
        .await
        .context(format!("bind :: {addr}"))?;
    tracing::info!(
        "listening on {}",
        listener.local_addr().context("local_addr")?
    );
    axum::serve(listener, app)
        .await
        .context("axum::serve")
        .map_err(|e| e.into())
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    DataAccess(#[from] contextual::Error<data_access::Error>),

    #[error("{0}")]
    Io(#[from] contextual::Error<std::io::Error>),
}
