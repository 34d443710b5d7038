use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::JobChanges;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    pub employer_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub department: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub is_active: Option<bool>,
    pub application_deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    pub department: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub is_active: Option<bool>,
    pub application_deadline: Option<DateTime<Utc>>,
}

impl From<UpdateJobPayload> for JobChanges {
    fn from(value: UpdateJobPayload) -> Self {
        Self {
            title: value.title,
            description: value.description,
            location: value.location,
            department: value.department,
            job_type: value.job_type,
            salary: value.salary,
            is_active: value.is_active,
            application_deadline: value.application_deadline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub active: Option<bool>,
}
