//! Shared fixtures for billing-portal integration tests.

#![allow(dead_code)]

use billing_portal::services::{BillingLoader, HttpSource};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const DOCUMENT_PATH: &str = "/billingData.json";

/// Billing document from the end-to-end scenario, with the given invoice value.
pub fn billing_document(invoice: Value) -> Value {
    json!({
        "billingDetails": {
            "subscriptionPlan": "Pro",
            "billingFrequency": "Monthly",
            "userName": "Asha Rao",
            "companyName": "Rao Traders",
            "address": {
                "line1": "12 MG Road",
                "line2": "Indiranagar",
                "city": "Bengaluru",
                "state": "Karnataka",
                "postalCode": "560038"
            },
            "gstNumber": "29ABCDE1234F1Z5",
            "supportLink": "https://support.example.com"
        },
        "paymentSummary": {
            "nextPaymentDueAmount": 499,
            "nextPaymentDueDate": "2024-05-01"
        },
        "paymentHistory": [
            {
                "date": "2024-04-01",
                "paymentMode": "UPI",
                "amount": 499,
                "status": "Paid",
                "invoice": invoice
            }
        ]
    })
}

/// Loader pointed at `DOCUMENT_PATH` on a mock server.
pub fn http_loader(base_url: &str, timeout: Option<Duration>) -> BillingLoader {
    let source = HttpSource::new(format!("{}{}", base_url, DOCUMENT_PATH));
    BillingLoader::new(Arc::new(source), timeout)
}
