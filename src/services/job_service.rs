use uuid::Uuid;

use crate::dto::job_dto::CreateJobPayload;
use crate::error::{Error, Result};
use crate::models::job::{Job, JobChanges};
use crate::store::PlacementStore;
use crate::utils::time::now;

#[derive(Clone)]
pub struct JobService<S> {
    store: S,
}

impl<S: PlacementStore> JobService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        if self.store.get_employer(payload.employer_id).await?.is_none() {
            return Err(Error::NotFound("Employer not found".to_string()));
        }

        let at = now();
        let job = Job {
            id: Uuid::new_v4(),
            employer_id: payload.employer_id,
            title: payload.title,
            description: payload.description,
            location: payload.location,
            department: payload.department,
            job_type: payload.job_type,
            salary: payload.salary,
            is_active: payload.is_active.unwrap_or(true),
            application_deadline: payload.application_deadline,
            views: 0,
            created_at: at,
            updated_at: at,
        };
        let job = self.store.insert_job(job).await?;
        tracing::info!(job_id = %job.id, employer_id = %job.employer_id, "job posted");
        Ok(job)
    }

    /// Counts as a view.
    pub async fn get(&self, id: Uuid) -> Result<Job> {
        self.store
            .view_job(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn list(&self, active: Option<bool>) -> Result<Vec<Job>> {
        self.store.list_jobs(active).await
    }

    pub async fn update(&self, id: Uuid, changes: JobChanges) -> Result<Job> {
        let job = self
            .store
            .update_job(id, changes)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        tracing::info!(
            job_id = %id,
            is_active = job.is_active,
            deadline = ?job.application_deadline,
            "job updated"
        );
        Ok(job)
    }
}
