use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub source: SourceSettings,
    #[serde(default)]
    pub view: ViewSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Where the billing document comes from.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `location` is a URL fetched with GET.
    Http,
    /// `location` is a local file path.
    File,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub location: String,
    /// Upper bound for one fetch. Unset means a hung fetch keeps the view loading.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl SourceSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ViewSettings {
    #[serde(default = "default_currency_marker")]
    pub currency_marker: String,
    #[serde(default = "default_invoice_base_url")]
    pub invoice_base_url: String,
    /// Percent-encode invoice identifiers in link targets. Link text is never encoded.
    #[serde(default)]
    pub encode_invoice_ids: bool,
    /// How long a page request waits for its view to settle before rendering.
    #[serde(default = "default_settle_wait_ms")]
    pub settle_wait_ms: u64,
}

impl ViewSettings {
    pub fn settle_wait(&self) -> Duration {
        Duration::from_millis(self.settle_wait_ms)
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            currency_marker: default_currency_marker(),
            invoice_base_url: default_invoice_base_url(),
            encode_invoice_ids: false,
            settle_wait_ms: default_settle_wait_ms(),
        }
    }
}

fn default_currency_marker() -> String {
    "₹".to_string()
}

fn default_invoice_base_url() -> String {
    "https://invoice.url/".to_string()
}

fn default_settle_wait_ms() -> u64 {
    5_000
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC collector, e.g. http://tempo:4317. Traces stay local when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_service_name() -> String {
    "billing-portal".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    // Check if we're already in billing-portal directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("billing-portal") {
        base_path.join("config")
    } else {
        base_path.join("billing-portal").join("config")
    };

    load_configuration(&configuration_directory)
}

/// Read `base.yaml` from `directory`, then apply `APP_` environment overrides
/// (`APP_SOURCE__LOCATION`, `APP_VIEW__CURRENCY_MARKER`, ...).
pub fn load_configuration(directory: &Path) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
