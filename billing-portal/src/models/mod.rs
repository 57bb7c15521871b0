pub mod billing;

pub use billing::{
    Address, BillingDetails, BillingDocument, DocumentError, PaymentHistoryEntry, PaymentSummary,
};
