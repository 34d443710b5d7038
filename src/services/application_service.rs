use std::collections::HashMap;

use uuid::Uuid;

use crate::dto::application_dto::{
    ApplicationView, EmployerSummary, JobSummary, NewApplication, StudentSummary,
};
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationFilter, ApplicationStatus, InterviewDetails, StatusChange,
};
use crate::models::job::Job;
use crate::models::profile::{Employer, Student};
use crate::services::status_workflow::{self, TransitionPolicy};
use crate::store::PlacementStore;
use crate::utils::time::now;

#[derive(Clone)]
pub struct ApplicationService<S> {
    store: S,
    policy: TransitionPolicy,
}

impl<S: PlacementStore> ApplicationService<S> {
    pub fn new(store: S, policy: TransitionPolicy) -> Self {
        Self { store, policy }
    }

    /// Runs the eligibility gate and creates the application in `applied`.
    ///
    /// Checks run in order: job exists, deadline not passed, job active,
    /// student exists, no earlier application. The duplicate check here is a
    /// fast path only; a concurrent request that slips past it is stopped by
    /// the store's uniqueness constraint with the same error.
    pub async fn apply(&self, request: NewApplication) -> Result<ApplicationView> {
        let at = now();

        let job = self
            .store
            .get_job(request.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        if job.deadline_passed(at) {
            return Err(Error::InvalidState(
                "Application deadline has passed".to_string(),
            ));
        }
        if !job.is_active {
            return Err(Error::NotFound(
                "Job not found or no longer active".to_string(),
            ));
        }

        let student = self
            .store
            .get_student(request.student_id)
            .await?
            .ok_or_else(|| Error::NotFound("Student not found".to_string()))?;

        if self
            .store
            .find_application(job.id, student.id)
            .await?
            .is_some()
        {
            return Err(Error::DuplicateApplication);
        }

        let application = Application::submitted(
            job.id,
            student.id,
            request.cover_letter,
            request.resume_id,
            at,
        );
        let created = self
            .store
            .insert_application(application)
            .await
            .inspect_err(|e| {
                if matches!(e, Error::DuplicateApplication) {
                    tracing::warn!(
                        job_id = %job.id,
                        student_id = %student.id,
                        "duplicate application rejected by store constraint"
                    );
                }
            })?;

        tracing::info!(
            application_id = %created.id,
            job_id = %job.id,
            student_id = %student.id,
            "application submitted"
        );

        let employer = self.store.get_employer(job.employer_id).await?;
        Ok(view(created, Some(&job), Some(&student), employer.as_ref()))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApplicationView> {
        let application = self.load(id).await?;
        self.join(application).await
    }

    pub async fn list_for_student(
        &self,
        student_id: Uuid,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationView>> {
        let filter = ApplicationFilter {
            student_id: Some(student_id),
            status,
            ..Default::default()
        };
        self.list(filter).await
    }

    pub async fn list_for_job(
        &self,
        job_id: Uuid,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationView>> {
        let filter = ApplicationFilter {
            job_id: Some(job_id),
            status,
            ..Default::default()
        };
        self.list(filter).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
        note: Option<String>,
        feedback: Option<String>,
    ) -> Result<ApplicationView> {
        let change = status_workflow::status_update(status, note, feedback, now());
        let updated = self.transition(id, change).await?;
        self.join(updated).await
    }

    pub async fn schedule_interview(
        &self,
        id: Uuid,
        details: InterviewDetails,
    ) -> Result<ApplicationView> {
        let change = status_workflow::interview_scheduled(details, now());
        let updated = self.transition(id, change).await?;
        self.join(updated).await
    }

    pub async fn withdraw(&self, id: Uuid) -> Result<Application> {
        self.transition(id, status_workflow::withdrawal(now())).await
    }

    /// Physically removes the application and its history.
    pub async fn purge(&self, id: Uuid) -> Result<()> {
        if !self.store.delete_application(id).await? {
            return Err(Error::NotFound("Application not found".to_string()));
        }
        tracing::info!(application_id = %id, "application purged");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Application> {
        self.store
            .get_application(id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    async fn transition(&self, id: Uuid, change: StatusChange) -> Result<Application> {
        let target = change.target();
        let updated = self
            .store
            .transition_application(id, change, self.policy)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        tracing::info!(
            application_id = %id,
            status = %target,
            history_len = updated.status_history.len(),
            "application status changed"
        );
        Ok(updated)
    }

    async fn join(&self, application: Application) -> Result<ApplicationView> {
        let job = self.store.get_job(application.job_id).await?;
        let student = self.store.get_student(application.student_id).await?;
        let employer = match &job {
            Some(job) => self.store.get_employer(job.employer_id).await?,
            None => None,
        };
        Ok(view(
            application,
            job.as_ref(),
            student.as_ref(),
            employer.as_ref(),
        ))
    }

    async fn list(&self, filter: ApplicationFilter) -> Result<Vec<ApplicationView>> {
        let applications = self.store.list_applications(filter).await?;

        let mut jobs: HashMap<Uuid, Option<Job>> = HashMap::new();
        let mut students: HashMap<Uuid, Option<Student>> = HashMap::new();
        let mut employers: HashMap<Uuid, Option<Employer>> = HashMap::new();

        let mut views = Vec::with_capacity(applications.len());
        for application in applications {
            if !jobs.contains_key(&application.job_id) {
                let job = self.store.get_job(application.job_id).await?;
                jobs.insert(application.job_id, job);
            }
            if !students.contains_key(&application.student_id) {
                let student = self.store.get_student(application.student_id).await?;
                students.insert(application.student_id, student);
            }

            let job = jobs.get(&application.job_id).and_then(Option::as_ref);
            if let Some(employer_id) = job.map(|j| j.employer_id) {
                if !employers.contains_key(&employer_id) {
                    let employer = self.store.get_employer(employer_id).await?;
                    employers.insert(employer_id, employer);
                }
            }

            let job = jobs.get(&application.job_id).and_then(Option::as_ref);
            let student = students.get(&application.student_id).and_then(Option::as_ref);
            let employer = job
                .and_then(|j| employers.get(&j.employer_id))
                .and_then(Option::as_ref);
            views.push(view(application, job, student, employer));
        }
        Ok(views)
    }
}

fn view(
    application: Application,
    job: Option<&Job>,
    student: Option<&Student>,
    employer: Option<&Employer>,
) -> ApplicationView {
    ApplicationView {
        application,
        job: job.map(JobSummary::from),
        student: student.map(StudentSummary::from),
        employer: employer.map(EmployerSummary::from),
    }
}
