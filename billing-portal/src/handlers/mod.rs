pub mod app;
pub mod billing;
pub mod metrics;
