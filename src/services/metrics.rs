use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_gauge, register_gauge_vec, CounterVec, Gauge, GaugeVec};
use sqlx::PgPool;
use tracing::{info, warn};

lazy_static! {
    // ── Event counters (increment on each event) ────────────────────────
    pub static ref TRAINER_LOGINS_COUNTER: CounterVec = register_counter_vec!(
        "api_trainer_logins_total",
        "Trainer login attempts by status",
        &["status"]
    ).unwrap();

    pub static ref STUDENT_LOGINS_COUNTER: CounterVec = register_counter_vec!(
        "api_student_logins_total",
        "Student login attempts by status",
        &["status"]
    ).unwrap();

    pub static ref TICKETS_COUNTER: CounterVec = register_counter_vec!(
        "api_support_tickets_total",
        "Support tickets opened by author",
        &["sender"]
    ).unwrap();

    // ── Business metrics ────────────────────────────────────────────────
    pub static ref TRAINERS_GAUGE: Gauge = register_gauge!(
        "gympanel_trainers_total",
        "Number of provisioned trainers"
    ).unwrap();

    pub static ref STUDENTS_GAUGE: GaugeVec = register_gauge_vec!(
        "gympanel_students_total",
        "Students by active flag",
        &["active"]
    ).unwrap();

    pub static ref OPEN_TICKETS_GAUGE: Gauge = register_gauge!(
        "gympanel_open_tickets_total",
        "Support tickets currently open or in progress"
    ).unwrap();
}

/// Spawn the background metrics collector (refreshes every 5 minutes).
pub fn start(pool: PgPool) {
    tokio::spawn(async move {
        if let Err(e) = collect(&pool).await {
            warn!("Metrics: initial collection failed: {}", e);
        }
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
            if let Err(e) = collect(&pool).await {
                warn!("Metrics: collection failed: {}", e);
            }
        }
    });
}

async fn collect(pool: &PgPool) -> anyhow::Result<()> {
    let trainers: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM trainers")
        .fetch_one(pool)
        .await?;
    TRAINERS_GAUGE.set(trainers as f64);

    let student_counts: Vec<(bool, i64)> = sqlx::query_as(
        "SELECT is_active, COUNT(*)::BIGINT FROM students GROUP BY is_active",
    )
    .fetch_all(pool)
    .await
    .unwrap_or_default();
    for (active, count) in student_counts {
        let label = if active { "true" } else { "false" };
        STUDENTS_GAUGE.with_label_values(&[label]).set(count as f64);
    }

    let open_tickets: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)::BIGINT FROM support_tickets WHERE status IN ('open', 'in_progress')",
    )
    .fetch_one(pool)
    .await
    .unwrap_or(0);
    OPEN_TICKETS_GAUGE.set(open_tickets as f64);

    info!("Metrics: collected ({} trainer(s))", trainers);
    Ok(())
}
