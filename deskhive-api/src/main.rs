use std::net::SocketAddr;
use std::sync::Arc;

use deskhive_api::{app, state::{AppState, AuthConfig}};
use deskhive_booking::{AvailabilityEngine, ReservationWorkflow, SystemClock};
use deskhive_store::{
    DbClient, PgDeskRepository, PgReservationRepository, PgSpaceRepository, RedisClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deskhive_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = deskhive_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Deskhive API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");
    let db = Arc::new(db);

    let redis = RedisClient::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");
    let redis = Arc::new(redis);

    let spaces = Arc::new(PgSpaceRepository::new(db.pool.clone()));
    let desks = Arc::new(PgDeskRepository::new(db.pool.clone()));
    let reservations = Arc::new(PgReservationRepository::new(db.pool.clone()));

    let engine = AvailabilityEngine::new(spaces.clone(), reservations.clone());
    let workflow = Arc::new(ReservationWorkflow::new(
        engine.clone(),
        desks.clone(),
        reservations.clone(),
        Arc::new(SystemClock),
    ));

    let app_state = AppState {
        db,
        redis,
        spaces,
        desks,
        reservations,
        engine,
        workflow,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        booking_rules: config.booking_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
