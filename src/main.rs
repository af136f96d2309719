use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use redis::Client as RedisClient;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gympanel_api::{config::Config, db, routes, services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    let redis_client = RedisClient::open(config.redis_url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_async_connection().await?;
    info!("Redis connected");

    services::metrics::start(pool.clone());

    let state = AppState {
        db: pool,
        redis: redis_conn,
        redis_client: redis_client.clone(),
        config: config.clone(),
    };

    // CORS: allow the app base domain. In development (localhost), all
    // origins are allowed.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        if o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") {
            return true;
        }
        o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
        .allow_origin(cors_origin);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Trainer auth
        .route("/auth/trainer-login", post(routes::auth::trainer_login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/status", get(routes::auth::status))
        .route("/auth/me", get(routes::auth::me))
        // Student auth
        .route("/student/auth/login", post(routes::student_auth::login))
        .route("/student/auth/logout", post(routes::student_auth::logout))
        .route("/student/auth/status", get(routes::student_auth::status))
        // Trainer profile
        .route("/profile", get(routes::students::get_profile).put(routes::students::update_profile))
        // Students
        .route("/students", get(routes::students::list_students).post(routes::students::create_student))
        .route("/students/{id}", get(routes::students::get_student).put(routes::students::update_student).delete(routes::students::delete_student))
        .route("/students/{id}/history", get(routes::history::list_for_student))
        .route("/history", delete(routes::history::purge))
        // Exercise catalog
        .route("/exercise-types", get(routes::exercises::list_types).post(routes::exercises::create_type))
        .route("/exercise-types/{id}", put(routes::exercises::update_type).delete(routes::exercises::delete_type))
        .route("/exercise-categories", get(routes::exercises::list_categories).post(routes::exercises::create_category))
        .route("/exercise-categories/{id}", put(routes::exercises::update_category).delete(routes::exercises::delete_category))
        .route("/exercises", get(routes::exercises::list_exercises).post(routes::exercises::create_exercise))
        .route("/exercises/{id}", get(routes::exercises::get_exercise).put(routes::exercises::update_exercise).delete(routes::exercises::delete_exercise))
        // Meal catalog
        .route("/meal-categories", get(routes::meals::list_categories).post(routes::meals::create_category))
        .route("/meal-categories/{id}", put(routes::meals::update_category).delete(routes::meals::delete_category))
        .route("/meals", get(routes::meals::list_meals).post(routes::meals::create_meal))
        .route("/meals/{id}", get(routes::meals::get_meal).put(routes::meals::update_meal).delete(routes::meals::delete_meal))
        // Supplement catalog
        .route("/supplement-categories", get(routes::supplements::list_categories).post(routes::supplements::create_category))
        .route("/supplement-categories/{id}", put(routes::supplements::update_category).delete(routes::supplements::delete_category))
        .route("/supplements", get(routes::supplements::list_supplements).post(routes::supplements::create_supplement))
        .route("/supplements/{id}", get(routes::supplements::get_supplement).put(routes::supplements::update_supplement).delete(routes::supplements::delete_supplement))
        // Per-student assignments
        .route("/students/{id}/exercise-programs", get(routes::programs::list_exercise_programs).post(routes::programs::create_exercise_program))
        .route("/students/{id}/exercise-programs/bulk", post(routes::programs::bulk_exercise_programs))
        .route("/students/{id}/exercise-programs/{program_id}", put(routes::programs::update_exercise_program).delete(routes::programs::delete_exercise_program))
        .route("/students/{id}/meal-plans", get(routes::programs::list_meal_plans).post(routes::programs::create_meal_plan))
        .route("/students/{id}/meal-plans/bulk", post(routes::programs::bulk_meal_plans))
        .route("/students/{id}/meal-plans/{plan_id}", put(routes::programs::update_meal_plan).delete(routes::programs::delete_meal_plan))
        .route("/students/{id}/supplements", get(routes::programs::list_student_supplements).post(routes::programs::create_student_supplement))
        .route("/students/{id}/supplements/bulk", post(routes::programs::bulk_student_supplements))
        .route("/students/{id}/supplements/{supplement_id}", put(routes::programs::update_student_supplement).delete(routes::programs::delete_student_supplement))
        // Support
        .route("/support/tickets", get(routes::support::list_tickets).post(routes::support::create_ticket))
        .route("/support/tickets/{id}", get(routes::support::get_ticket).put(routes::support::update_ticket).delete(routes::support::delete_ticket))
        .route("/support/tickets/{id}/responses", get(routes::support::list_responses).post(routes::support::add_response))
        .route("/support/messages", get(routes::support::list_messages).post(routes::support::send_message))
        .route("/support/messages/{id}/read", post(routes::support::mark_message_read))
        .route("/support/clear", post(routes::support::clear))
        // Student panel
        .route("/student/programs", get(routes::student_panel::my_programs))
        .route("/student/meal-plans", get(routes::student_panel::my_meal_plans))
        .route("/student/supplements", get(routes::student_panel::my_supplements))
        .route("/student/support/tickets", get(routes::student_panel::my_tickets).post(routes::student_panel::open_ticket))
        .route("/student/support/tickets/{id}/responses", get(routes::student_panel::ticket_responses).post(routes::student_panel::respond_to_ticket))
        .route("/student/support/messages", get(routes::student_panel::my_messages).post(routes::student_panel::send_message))
        // Preferences
        .route("/preferences", get(routes::preferences::list))
        .route("/preferences/reset", post(routes::preferences::reset))
        .route("/preferences/{key}", get(routes::preferences::get).post(routes::preferences::set).delete(routes::preferences::remove))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("gympanel API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
