use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub department: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub is_active: bool,
    pub application_deadline: Option<DateTime<Utc>>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.application_deadline
            .map_or(false, |deadline| deadline < now)
    }
}

/// Partial update used by job moderation.
#[derive(Debug, Clone, Default)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub is_active: Option<bool>,
    pub application_deadline: Option<DateTime<Utc>>,
}

impl JobChanges {
    pub fn apply_to(self, job: &mut Job, at: DateTime<Utc>) {
        if let Some(v) = self.title {
            job.title = v;
        }
        if let Some(v) = self.description {
            job.description = v;
        }
        if let Some(v) = self.location {
            job.location = v;
        }
        if let Some(v) = self.department {
            job.department = Some(v);
        }
        if let Some(v) = self.job_type {
            job.job_type = Some(v);
        }
        if let Some(v) = self.salary {
            job.salary = Some(v);
        }
        if let Some(v) = self.is_active {
            job.is_active = v;
        }
        if let Some(v) = self.application_deadline {
            job.application_deadline = Some(v);
        }
        job.updated_at = at;
    }
}
