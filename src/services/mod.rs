pub mod application_service;
pub mod job_service;
pub mod profile_service;
pub mod status_workflow;
