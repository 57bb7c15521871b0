pub mod instance;
pub mod state;

pub use instance::BillingView;
pub use state::ViewState;
