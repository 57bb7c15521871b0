pub mod billing_client;
pub mod metrics;

pub use billing_client::{BillingLoader, BillingSource, FileSource, HttpSource, LoadError};
pub use metrics::{get_metrics, init_metrics};
