//! [`MemoryStore`]: in-process implementation of [`PlacementStore`].
//!
//! Every operation takes the single `RwLock` once, so a uniqueness check and
//! the insert it guards, or a status check and the append it guards, cannot
//! interleave with another writer.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::PlacementStore;
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationFilter, StatusChange};
use crate::models::job::{Job, JobChanges};
use crate::models::profile::{Employer, Student};
use crate::services::status_workflow::TransitionPolicy;

#[derive(Debug, Default)]
struct Inner {
    applications: HashMap<Uuid, Application>,
    /// (job_id, student_id) -> application id
    pairs: HashMap<(Uuid, Uuid), Uuid>,
    jobs: HashMap<Uuid, Job>,
    students: HashMap<Uuid, Student>,
    employers: HashMap<Uuid, Employer>,
}

/// Cloning is cheap; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with one employer, two students and two open jobs
    /// for the demo mode.
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        let mut inner = Inner::default();

        let employer = Employer {
            id: Uuid::new_v4(),
            company_name: "Northwind Analytics".to_string(),
            industry: Some("Software".to_string()),
            location: Some("Pune".to_string()),
            contact_email: Some("campus@northwind.example".to_string()),
            created_at: now,
        };

        let jobs = [
            ("Graduate Software Engineer", "Computer Science", "full_time"),
            ("Data Analyst Intern", "Statistics", "internship"),
        ]
        .into_iter()
        .map(|(title, department, job_type)| Job {
            id: Uuid::new_v4(),
            employer_id: employer.id,
            title: title.to_string(),
            description: format!("{} role at {}", title, employer.company_name),
            location: "Pune".to_string(),
            department: Some(department.to_string()),
            job_type: Some(job_type.to_string()),
            salary: None,
            is_active: true,
            application_deadline: Some(now + Duration::days(30)),
            views: 0,
            created_at: now,
            updated_at: now,
        });

        let students = [
            ("Asha", "Kulkarni", "Computer Science", 8.7),
            ("Rohan", "Mehta", "Statistics", 7.9),
        ]
        .into_iter()
        .map(|(first, last, department, gpa)| Student {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@students.example", first, last).to_lowercase(),
            department: Some(department.to_string()),
            gpa: Some(gpa),
            graduation_year: Some(2027),
            skills: Vec::new(),
            created_at: now,
        });

        for job in jobs {
            inner.jobs.insert(job.id, job);
        }
        for student in students {
            inner.students.insert(student.id, student);
        }
        inner.employers.insert(employer.id, employer);

        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) {
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

impl PlacementStore for MemoryStore {
    async fn insert_application(&self, application: Application) -> Result<Application> {
        let mut inner = self.inner.write().await;
        let key = (application.job_id, application.student_id);
        if inner.pairs.contains_key(&key) {
            return Err(Error::DuplicateApplication);
        }
        inner.pairs.insert(key, application.id);
        inner.applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>> {
        let inner = self.inner.read().await;
        Ok(inner.applications.get(&id).cloned())
    }

    async fn find_application(&self, job_id: Uuid, student_id: Uuid) -> Result<Option<Application>> {
        let inner = self.inner.read().await;
        Ok(inner
            .pairs
            .get(&(job_id, student_id))
            .and_then(|id| inner.applications.get(id))
            .cloned())
    }

    async fn list_applications(&self, filter: ApplicationFilter) -> Result<Vec<Application>> {
        let inner = self.inner.read().await;
        let mut items: Vec<Application> = inner
            .applications
            .values()
            .filter(|app| filter.matches(app))
            .cloned()
            .collect();
        newest_first(&mut items, |app| app.created_at);
        Ok(items)
    }

    async fn transition_application(
        &self,
        id: Uuid,
        change: StatusChange,
        policy: TransitionPolicy,
    ) -> Result<Option<Application>> {
        let mut inner = self.inner.write().await;
        let Some(application) = inner.applications.get_mut(&id) else {
            return Ok(None);
        };
        policy.check(application.status, change.target())?;
        change.apply_to(application);
        Ok(Some(application.clone()))
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.applications.remove(&id) {
            Some(app) => {
                inner.pairs.remove(&(app.job_id, app.student_id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_job(&self, job: Job) -> Result<Job> {
        let mut inner = self.inner.write().await;
        inner.jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        let inner = self.inner.read().await;
        Ok(inner.jobs.get(&id).cloned())
    }

    async fn view_job(&self, id: Uuid) -> Result<Option<Job>> {
        let mut inner = self.inner.write().await;
        Ok(inner.jobs.get_mut(&id).map(|job| {
            job.views += 1;
            job.clone()
        }))
    }

    async fn list_jobs(&self, active: Option<bool>) -> Result<Vec<Job>> {
        let inner = self.inner.read().await;
        let mut items: Vec<Job> = inner
            .jobs
            .values()
            .filter(|job| active.map_or(true, |flag| job.is_active == flag))
            .cloned()
            .collect();
        newest_first(&mut items, |job| job.created_at);
        Ok(items)
    }

    async fn update_job(&self, id: Uuid, changes: JobChanges) -> Result<Option<Job>> {
        let mut inner = self.inner.write().await;
        Ok(inner.jobs.get_mut(&id).map(|job| {
            changes.apply_to(job, Utc::now());
            job.clone()
        }))
    }

    async fn insert_student(&self, student: Student) -> Result<Student> {
        let mut inner = self.inner.write().await;
        let taken = inner
            .students
            .values()
            .any(|s| s.email.eq_ignore_ascii_case(&student.email));
        if taken {
            return Err(Error::BadRequest(
                "A student with this email address already exists".to_string(),
            ));
        }
        inner.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
        let inner = self.inner.read().await;
        Ok(inner.students.get(&id).cloned())
    }

    async fn insert_employer(&self, employer: Employer) -> Result<Employer> {
        let mut inner = self.inner.write().await;
        inner.employers.insert(employer.id, employer.clone());
        Ok(employer)
    }

    async fn get_employer(&self, id: Uuid) -> Result<Option<Employer>> {
        let inner = self.inner.read().await;
        Ok(inner.employers.get(&id).cloned())
    }
}
