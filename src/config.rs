// src/config.rs
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_WAIT_SECS: f64 = 5.0;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    /// Value sent as `wait` by the demo requests.
    pub wait_secs: f64,
    /// Fire the two demo requests against ourselves once the listener is up.
    pub run_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            wait_secs: DEFAULT_WAIT_SECS,
            run_on_start: true,
        }
    }
}

impl AppConfig {
    // Read DEMO_* variables, loading a .env file first if there is one.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = lookup("DEMO_BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.bind_addr);
        let static_dir = lookup("DEMO_STATIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let wait_secs = lookup("DEMO_WAIT_SECS")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(defaults.wait_secs);
        let run_on_start = lookup("DEMO_RUN_ON_START")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.run_on_start);

        Self { bind_addr, static_dir, wait_secs, run_on_start }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
