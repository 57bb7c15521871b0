//! Layout tree produced by the renderer.
//!
//! Plain data: the HTML template walks it and `/api/billing/view` serializes it.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    Placeholder { text: String },
    Notice { text: String },
    Page(PageLayout),
}

impl Layout {
    /// The full page, when the document is loaded.
    pub fn page(&self) -> Option<&PageLayout> {
        match self {
            Layout::Page(page) => Some(page),
            _ => None,
        }
    }

    /// Placeholder or notice text; empty for a page.
    pub fn message(&self) -> &str {
        match self {
            Layout::Placeholder { text } | Layout::Notice { text } => text,
            Layout::Page(_) => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub sidebar: Sidebar,
    pub main: MainPanel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub title: String,
    pub change: Action,
    pub fields: Vec<Field>,
    pub support: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

/// A button or link. `target: None` is an inert control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub label: String,
    pub target: Option<String>,
}

impl Action {
    pub fn inert(label: &str) -> Self {
        Self {
            label: label.to_string(),
            target: None,
        }
    }

    pub fn link(label: &str, target: &str) -> Self {
        Self {
            label: label.to_string(),
            target: Some(target.to_string()),
        }
    }

    pub fn href(&self) -> &str {
        self.target.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainPanel {
    pub banner: DueBanner,
    pub table: PaymentTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueBanner {
    /// Currency-prefixed amount, e.g. `₹ 499`.
    pub amount: String,
    pub due_date: String,
    pub pay: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentTable {
    pub columns: Vec<String>,
    pub rows: Vec<PaymentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRow {
    pub date: String,
    pub payment_mode: String,
    pub amount: String,
    pub status: String,
    pub invoice: InvoiceCell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvoiceCell {
    Link { text: String, href: String },
    Placeholder { text: String },
}

impl InvoiceCell {
    pub fn text(&self) -> &str {
        match self {
            InvoiceCell::Link { text, .. } | InvoiceCell::Placeholder { text } => text,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            InvoiceCell::Link { href, .. } => Some(href),
            InvoiceCell::Placeholder { .. } => None,
        }
    }
}
