pub mod config;
pub mod handlers;
pub mod models;
pub mod render;
pub mod services;
pub mod startup;
pub mod view;

use crate::config::Settings;
use crate::render::Renderer;
use crate::services::BillingLoader;
use std::time::Duration;

/// Shared application state: how to fetch the document and how to render it.
#[derive(Clone)]
pub struct AppState {
    pub loader: BillingLoader,
    pub renderer: Renderer,
    pub settle_wait: Duration,
}

impl AppState {
    pub fn new(loader: BillingLoader, renderer: Renderer, settle_wait: Duration) -> Self {
        Self {
            loader,
            renderer,
            settle_wait,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            BillingLoader::from_settings(&settings.source),
            Renderer::new(&settings.view),
            settings.view.settle_wait(),
        )
    }
}
