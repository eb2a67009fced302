//! Edura server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use apalis::prelude::*;
use axum::{Router, middleware};
use edura_api::{AppState, router as api_router};
use edura_common::{Config, LocalStorage, StorageBackend, TokenIssuer};
use edura_core::{
    CategoryService, CommentService, CourseService, EmailService, HomeworkService, LessonService,
    LessonVideoService, MailDeliveryService, ModeratorService, ProfileService, RatingService,
    StatusService, TeacherService, UserService,
};
use edura_db::repositories::{
    CategoryRepository, CommentRepository, CourseRepository, HomeworkSubmissionRepository,
    LessonHomeworkRepository, LessonRepository, LessonVideoRepository, ProfileRepository,
    RatingRepository, StaffRepository, StatusRepository, UserRepository,
};
use edura_queue::workers::{NotifyContext, notify_worker};
use edura_queue::{NotifyJob, RedisMailDelivery};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edura=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting edura server...");

    let config = Config::load()?;

    let db = edura_db::connect(&config.database).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    edura_db::migrate(&db).await?;
    info!("Migrations completed");

    // Redis-backed job queue for mail fan-out
    info!("Connecting to Redis...");
    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;
    let redis_storage = apalis_redis::RedisStorage::<NotifyJob>::new(redis_conn);
    info!("Connected to Redis job queue");

    let mailer: MailDeliveryService = Arc::new(RedisMailDelivery::new(redis_storage.clone()));

    let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::from_settings(&config.storage));

    let email_service = EmailService::new(config.email.clone())?;
    if email_service.is_enabled() {
        info!("Outgoing email enabled");
    } else {
        info!("Outgoing email disabled (no [email] configuration)");
    }

    // Repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let profile_repo = ProfileRepository::new(Arc::clone(&db));
    let status_repo = StatusRepository::new(Arc::clone(&db));
    let teacher_repo = StaffRepository::new(Arc::clone(&db));
    let moderator_repo = StaffRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let course_repo = CourseRepository::new(Arc::clone(&db));
    let lesson_repo = LessonRepository::new(Arc::clone(&db));
    let video_repo = LessonVideoRepository::new(Arc::clone(&db));
    let homework_repo = LessonHomeworkRepository::new(Arc::clone(&db));
    let submission_repo = HomeworkSubmissionRepository::new(Arc::clone(&db));
    let rating_repo = RatingRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));

    // Services
    let tokens = TokenIssuer::new(&config.auth);

    let user_service = UserService::new(
        Arc::clone(&db),
        user_repo.clone(),
        profile_repo.clone(),
        tokens.clone(),
    );
    let profile_service = ProfileService::new(profile_repo.clone());
    let status_service = StatusService::new(status_repo.clone());
    let teacher_service = TeacherService::new(
        teacher_repo.clone(),
        profile_repo.clone(),
        status_repo.clone(),
    );
    let moderator_service = ModeratorService::new(
        moderator_repo.clone(),
        profile_repo.clone(),
        status_repo.clone(),
    );
    let category_service = CategoryService::new(category_repo.clone());
    let course_service = CourseService::new(
        course_repo.clone(),
        lesson_repo.clone(),
        video_repo.clone(),
        category_repo,
        teacher_repo,
        moderator_repo,
        user_repo.clone(),
        mailer.clone(),
    );
    let lesson_service = LessonService::new(lesson_repo.clone(), course_repo.clone());
    let video_service = LessonVideoService::new(
        video_repo.clone(),
        lesson_repo.clone(),
        rating_repo.clone(),
    );
    let homework_service = HomeworkService::new(
        Arc::clone(&db),
        homework_repo,
        submission_repo,
        video_repo.clone(),
    );
    let rating_service = RatingService::new(rating_repo, video_repo);
    let comment_service = CommentService::new(comment_repo, lesson_repo);

    let state = AppState {
        user_service,
        profile_service,
        status_service,
        teacher_service,
        moderator_service,
        category_service,
        course_service,
        lesson_service,
        video_service,
        homework_service,
        rating_service,
        comment_service,
        mailer,
        storage,
        tokens,
        user_repo: user_repo.clone(),
    };

    let app = Router::new()
        .nest("/api/v1", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            edura_api::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Notify worker: drains queued course notifications and broadcasts
    info!("Starting notify worker...");
    let notify_ctx = NotifyContext::new(user_repo, course_repo, email_service);

    tokio::spawn(async move {
        let monitor = Monitor::new().register({
            WorkerBuilder::new("notify")
                .data(notify_ctx)
                .backend(redis_storage)
                .build_fn(notify_worker)
        });

        if let Err(e) = monitor.run().await {
            tracing::error!(error = %e, "Notify worker failed");
        }
    });
    info!("Notify worker started");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
