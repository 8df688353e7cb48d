//! Lectureboard server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use lectureboard_api::{router as api_router, AppState};
use lectureboard_common::Config;
use lectureboard_core::{
    CourseService, LectureService, LikeService, MaintenanceService, OpenAiSummarizer, PostService,
    SummaryService,
};
use lectureboard_db::repositories::{
    CourseRepository, LectureRepository, LikeRepository, PostRepository, SummaryRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod scheduler;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

async fn health() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lectureboard=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting lectureboard server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = Arc::new(lectureboard_db::init(&config).await?);
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    lectureboard_db::migrate(&db).await?;
    info!("Migrations completed");

    // Repositories
    let course_repo = CourseRepository::new(db.clone());
    let lecture_repo = LectureRepository::new(db.clone());
    let post_repo = PostRepository::new(db.clone());
    let like_repo = LikeRepository::new(db.clone());
    let summary_repo = SummaryRepository::new(db.clone());

    // Services
    let summarizer = Arc::new(OpenAiSummarizer::new(config.summarizer.clone())?);
    let summary_service = SummaryService::new(
        summary_repo.clone(),
        post_repo.clone(),
        like_repo.clone(),
        lecture_repo.clone(),
        summarizer,
    );
    let maintenance_service = MaintenanceService::new(
        lecture_repo.clone(),
        summary_repo.clone(),
        summary_service.clone(),
    );

    let state = AppState {
        course_service: CourseService::new(course_repo.clone()),
        lecture_service: LectureService::new(
            lecture_repo.clone(),
            course_repo,
            summary_repo.clone(),
        ),
        post_service: PostService::new(post_repo.clone(), lecture_repo.clone()),
        like_service: LikeService::new(like_repo, post_repo),
        summary_service,
        maintenance_service: maintenance_service.clone(),
        admin: config.admin.clone(),
    };

    // Background maintenance loops
    if config.scheduler.enabled {
        scheduler::spawn(&config.scheduler, maintenance_service);
        info!("Maintenance scheduler started");
    } else {
        info!("Maintenance scheduler disabled, relying on cron endpoints");
    }

    let app = Router::new()
        .route("/health", get(health))
        .merge(api_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
