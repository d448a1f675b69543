use std::env;
use tracing::warn;

const DEFAULT_PAYMENT_SUCCESS_RATE: f64 = 0.9;
const DEFAULT_SIMULATED_LATENCY_MS: u64 = 1000;
const DEFAULT_BOT_DELAY_MIN_MS: u64 = 1000;
const DEFAULT_BOT_DELAY_MAX_MS: u64 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub storage_dir: String,
    pub demo_email: String,
    pub demo_password: String,
    pub payment_success_rate: f64,
    pub simulated_latency_ms: u64,
    pub bot_delay_min_ms: u64,
    pub bot_delay_max_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            jwt_secret: env::var("WEVOLVE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("WEVOLVE_JWT_SECRET not set, using insecure dev secret");
                    "wevolve-dev-secret-do-not-use-in-production".to_string()
                }),
            storage_dir: env::var("WEVOLVE_STORAGE_DIR")
                .unwrap_or_else(|_| {
                    warn!("WEVOLVE_STORAGE_DIR not set, using default");
                    ".wevolve-storage".to_string()
                }),
            demo_email: env::var("WEVOLVE_DEMO_EMAIL")
                .unwrap_or_else(|_| "demo@wevolve.com".to_string()),
            demo_password: env::var("WEVOLVE_DEMO_PASSWORD")
                .unwrap_or_else(|_| "demo123".to_string()),
            payment_success_rate: parse_or_default(
                "WEVOLVE_PAYMENT_SUCCESS_RATE",
                DEFAULT_PAYMENT_SUCCESS_RATE,
            ),
            simulated_latency_ms: parse_or_default(
                "WEVOLVE_SIMULATED_LATENCY_MS",
                DEFAULT_SIMULATED_LATENCY_MS,
            ),
            bot_delay_min_ms: parse_or_default("WEVOLVE_BOT_DELAY_MIN_MS", DEFAULT_BOT_DELAY_MIN_MS),
            bot_delay_max_ms: parse_or_default("WEVOLVE_BOT_DELAY_MAX_MS", DEFAULT_BOT_DELAY_MAX_MS),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - check environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
            && !self.storage_dir.is_empty()
            && (0.0..=1.0).contains(&self.payment_success_rate)
            && self.bot_delay_min_ms <= self.bot_delay_max_ms
    }

    /// Zero-latency configuration for tests so simulated delays don't slow suites down.
    pub fn for_tests(storage_dir: &str) -> Self {
        Self {
            jwt_secret: "test-secret-key-for-session-tokens-must-be-long-enough".to_string(),
            storage_dir: storage_dir.to_string(),
            demo_email: "demo@wevolve.com".to_string(),
            demo_password: "demo123".to_string(),
            payment_success_rate: DEFAULT_PAYMENT_SUCCESS_RATE,
            simulated_latency_ms: 0,
            bot_delay_min_ms: 0,
            bot_delay_max_ms: 0,
        }
    }
}

fn parse_or_default<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value, using default", name);
            default
        }),
        Err(_) => default,
    }
}
