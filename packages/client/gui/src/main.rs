mod api;
mod app;
mod components;
mod config;
mod effects;
mod session;
mod theme;
mod token_store;
mod views;

use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::ApiClient;
use crate::app::DddbApp;
use crate::config::Settings;
use crate::token_store::TokenStore;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dddb_client_gui=info,dddb_client_core=info")),
        )
        .init();
}

pub fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::from_env()?;
    info!(api_url = %settings.api_url, "starting DDDB client");

    let tokens = Arc::new(TokenStore::open(&settings.token_file));
    let api = ApiClient::new(settings.api_url.clone(), settings.request_timeout, tokens)
        .context("could not build HTTP client")?;

    iced::application(DddbApp::title, DddbApp::update, DddbApp::view)
        .subscription(DddbApp::subscription)
        .theme(|_| theme::app_theme())
        .window_size((1200.0, 820.0))
        .run_with(move || DddbApp::new(api, settings))
        .context("GUI exited with an error")
}
