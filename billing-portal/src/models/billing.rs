//! Billing document model.
//!
//! The document is read once per view instance and never mutated. Every key
//! listed here is required except `invoice`; a payload missing one of them is
//! rejected as a whole, there is no partial document.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

/// Root payload: account details, next payment and payment history.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillingDocument {
    pub billing_details: BillingDetails,
    #[validate(nested)]
    pub payment_summary: PaymentSummary,
    #[validate(nested)]
    pub payment_history: Vec<PaymentHistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingDetails {
    pub subscription_plan: String,
    pub billing_frequency: String,
    pub user_name: String,
    pub company_name: String,
    pub address: Address,
    pub gst_number: String,
    /// Used verbatim as the support action target.
    pub support_link: String,
}

/// Postal address. Unknown parts are empty strings, never absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl Address {
    /// Single display line. Empty parts are kept so the separators stay put.
    pub fn display_line(&self) -> String {
        [
            self.line1.as_str(),
            self.line2.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.postal_code.as_str(),
        ]
        .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    #[serde(deserialize_with = "decimal_number")]
    #[validate(custom(function = "non_negative"))]
    pub next_payment_due_amount: Decimal,
    pub next_payment_due_date: String,
}

/// One row of the payment history, kept in the order received.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryEntry {
    pub date: String,
    pub payment_mode: String,
    #[serde(deserialize_with = "decimal_number")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    pub status: String,
    #[serde(default)]
    pub invoice: Option<String>,
}

impl PaymentHistoryEntry {
    /// Invoice identifier, treating an empty string like a missing one.
    pub fn invoice_id(&self) -> Option<&str> {
        self.invoice.as_deref().filter(|id| !id.is_empty())
    }
}

/// Why a fetched payload could not become a [`BillingDocument`].
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("payload is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("payload does not match the billing document shape: {0}")]
    Incomplete(#[source] serde_json::Error),

    #[error("payload violates billing document constraints: {0}")]
    Invalid(#[from] ValidationErrors),
}

impl BillingDocument {
    /// Parse and shape-check a raw payload.
    ///
    /// Syntax errors are reported as [`DocumentError::Malformed`]; a JSON
    /// value with missing or mistyped keys as [`DocumentError::Incomplete`];
    /// a well-typed document with out-of-range values as
    /// [`DocumentError::Invalid`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(DocumentError::Malformed)?;
        let document: BillingDocument =
            serde_json::from_value(value).map_err(DocumentError::Incomplete)?;
        document.validate()?;
        Ok(document)
    }
}

/// Accepts JSON numbers only; a quoted amount is a shape error.
fn decimal_number<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(serde::de::Error::custom)
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("amount must not be negative".into());
        return Err(err);
    }
    Ok(())
}
