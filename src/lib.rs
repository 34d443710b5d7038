pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, job_service::JobService,
    profile_service::ProfileService, status_workflow::TransitionPolicy,
};
use crate::store::PlacementStore;

#[derive(Clone)]
pub struct AppState<S> {
    pub application_service: ApplicationService<S>,
    pub job_service: JobService<S>,
    pub profile_service: ProfileService<S>,
}

impl<S: PlacementStore> AppState<S> {
    pub fn new(store: S, policy: TransitionPolicy) -> Self {
        Self {
            application_service: ApplicationService::new(store.clone(), policy),
            job_service: JobService::new(store.clone()),
            profile_service: ProfileService::new(store),
        }
    }
}
