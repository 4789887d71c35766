pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod startup;

use std::sync::Arc;

use crate::domain::IdeaRepository;

/// AppState holds shared resources for the web server.
#[derive(Clone)]
pub struct AppState {
    pub idea_repo: Arc<dyn IdeaRepository>,
}
