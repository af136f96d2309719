use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
    /// Access code checked on trainer login (phone + code).
    pub trainer_auth_code: String,
    /// Phone number of the bootstrap trainer used by student-facing endpoints.
    pub default_trainer_phone: String,
    pub session_ttl_seconds: u64,
    pub remember_me_days: u64,
    pub max_login_attempts: i32,
    pub lockout_minutes: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into()),
            trainer_auth_code: required("TRAINER_AUTH_CODE")?,
            default_trainer_phone: env::var("DEFAULT_TRAINER_PHONE")
                .unwrap_or_else(|_| "09120000000".into()),
            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .unwrap_or_else(|_| "86400".into())
                .parse()?,
            remember_me_days: env::var("REMEMBER_ME_DAYS")
                .unwrap_or_else(|_| "30".into())
                .parse()?,
            max_login_attempts: env::var("MAX_LOGIN_ATTEMPTS")
                .unwrap_or_else(|_| "5".into())
                .parse()?,
            lockout_minutes: env::var("LOCKOUT_MINUTES")
                .unwrap_or_else(|_| "15".into())
                .parse()?,
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}
