//! Pure projection of a [`ViewState`] onto a [`Layout`].

pub mod layout;

pub use layout::{
    Action, DueBanner, Field, InvoiceCell, Layout, MainPanel, PageLayout, PaymentRow,
    PaymentTable, Sidebar,
};

use crate::config::ViewSettings;
use crate::models::{BillingDetails, BillingDocument, PaymentHistoryEntry, PaymentSummary};
use crate::view::ViewState;
use rust_decimal::Decimal;

pub const LOADING_TEXT: &str = "Loading...";
pub const ERROR_NOTICE: &str = "Error loading billing data. Please try again later.";
pub const NO_INVOICE: &str = "-";

pub const TABLE_COLUMNS: [&str; 5] = ["Date", "Payment Mode", "Amount", "Status", "Invoice"];

#[derive(Debug, Clone)]
pub struct Renderer {
    currency_marker: String,
    invoice_base_url: String,
    encode_invoice_ids: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&ViewSettings::default())
    }
}

impl Renderer {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            currency_marker: settings.currency_marker.clone(),
            invoice_base_url: settings.invoice_base_url.clone(),
            encode_invoice_ids: settings.encode_invoice_ids,
        }
    }

    pub fn render(&self, state: &ViewState) -> Layout {
        match state {
            ViewState::Loading => Layout::Placeholder {
                text: LOADING_TEXT.to_string(),
            },
            ViewState::Error(_) => Layout::Notice {
                text: ERROR_NOTICE.to_string(),
            },
            ViewState::Loaded(document) => Layout::Page(self.page(document)),
        }
    }

    fn page(&self, document: &BillingDocument) -> PageLayout {
        PageLayout {
            sidebar: self.sidebar(&document.billing_details),
            main: MainPanel {
                banner: self.banner(&document.payment_summary),
                table: PaymentTable {
                    columns: TABLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
                    rows: document
                        .payment_history
                        .iter()
                        .map(|entry| self.row(entry))
                        .collect(),
                },
            },
        }
    }

    fn sidebar(&self, details: &BillingDetails) -> Sidebar {
        let field = |label: &str, value: &str| Field {
            label: label.to_string(),
            value: value.to_string(),
        };

        Sidebar {
            title: "Billing Details".to_string(),
            change: Action::inert("Change"),
            fields: vec![
                field("Subscription Plan", &details.subscription_plan),
                field("Billing Frequency", &details.billing_frequency),
                field("User name", &details.user_name),
                field("Company Name", &details.company_name),
                field("Address", &details.address.display_line()),
                field("GST Number", &details.gst_number),
            ],
            support: Action::link("Contact our support now", &details.support_link),
        }
    }

    fn banner(&self, summary: &PaymentSummary) -> DueBanner {
        DueBanner {
            amount: self.money(&summary.next_payment_due_amount),
            due_date: summary.next_payment_due_date.clone(),
            pay: Action::inert("Pay Now"),
        }
    }

    fn row(&self, entry: &PaymentHistoryEntry) -> PaymentRow {
        PaymentRow {
            date: entry.date.clone(),
            payment_mode: entry.payment_mode.clone(),
            amount: self.money(&entry.amount),
            status: entry.status.clone(),
            invoice: self.invoice_cell(entry),
        }
    }

    fn invoice_cell(&self, entry: &PaymentHistoryEntry) -> InvoiceCell {
        match entry.invoice_id() {
            Some(id) => {
                let href = if self.encode_invoice_ids {
                    format!("{}{}", self.invoice_base_url, urlencoding::encode(id))
                } else {
                    format!("{}{}", self.invoice_base_url, id)
                };
                InvoiceCell::Link {
                    text: id.to_string(),
                    href,
                }
            }
            None => InvoiceCell::Placeholder {
                text: NO_INVOICE.to_string(),
            },
        }
    }

    fn money(&self, amount: &Decimal) -> String {
        format!("{} {}", self.currency_marker, amount.normalize())
    }
}
