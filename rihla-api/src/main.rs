use rihla_api::{app, AppState};
use rihla_store::{DbClient, PgSubmissionRepository};
use rihla_submit::{HttpAbuseVerifier, SubmissionPipeline, VerifierSettings};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rihla_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = rihla_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Rihla submissions API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let verifier = HttpAbuseVerifier::new(VerifierSettings {
        endpoint: config.verifier.endpoint.clone(),
        secret: config.verifier.secret.clone(),
        min_score: config.verifier.min_score,
        timeout: Duration::from_secs(config.verifier.timeout_secs),
    })
    .expect("Failed to build verifier client");

    let pipeline = SubmissionPipeline::new(
        Arc::new(verifier),
        Arc::new(PgSubmissionRepository::new(db.pool.clone())),
    );

    let app = app(AppState {
        pipeline: Arc::new(pipeline),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
