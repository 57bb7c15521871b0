use crate::models::BillingDocument;
use crate::services::LoadError;
use std::sync::Arc;

/// What a view instance currently shows.
///
/// Starts as `Loading` and settles exactly once. `Error` and `Loaded` are
/// terminal; a fresh mount is the only way back to `Loading`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    /// Operator-facing detail. Never rendered.
    Error(String),
    Loaded(Arc<BillingDocument>),
}

impl ViewState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, ViewState::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Error(_) => "error",
            ViewState::Loaded(_) => "loaded",
        }
    }

    /// Apply a fetch outcome. Returns `false` and leaves the state untouched
    /// when it has already settled.
    pub fn settle(&mut self, outcome: Result<BillingDocument, LoadError>) -> bool {
        if self.is_settled() {
            return false;
        }
        *self = match outcome {
            Ok(document) => ViewState::Loaded(Arc::new(document)),
            Err(e) => ViewState::Error(e.to_string()),
        };
        true
    }
}
