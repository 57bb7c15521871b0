//! Billing view endpoints.
//!
//! Every request mounts its own view instance, so each one triggers exactly
//! one fetch. The instance is dropped once the response is built, which
//! cancels a fetch that has not settled yet.

use crate::render::Layout;
use crate::view::BillingView;
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Template)]
#[template(path = "billing.html")]
pub struct BillingTemplate {
    pub layout: Layout,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub state: &'static str,
    pub layout: Layout,
}

/// Mount, wait up to the configured settle time, render whatever is current.
async fn render_view(state: &AppState) -> ViewResponse {
    let view = BillingView::mount(state.loader.clone());
    let current = view.settled_within(state.settle_wait).await;

    if !current.is_settled() {
        tracing::warn!(
            wait_ms = state.settle_wait.as_millis() as u64,
            "Billing fetch still pending, rendering loading placeholder"
        );
    }

    ViewResponse {
        state: current.name(),
        layout: state.renderer.render(&current),
    }
}

pub async fn billing_page(State(state): State<AppState>) -> impl IntoResponse {
    let view = render_view(&state).await;
    BillingTemplate {
        layout: view.layout,
    }
}

pub async fn billing_view(State(state): State<AppState>) -> Json<ViewResponse> {
    Json(render_view(&state).await)
}
