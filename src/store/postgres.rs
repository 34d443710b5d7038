//! [`PgStore`]: PostgreSQL implementation of [`PlacementStore`].
//!
//! An application's status history lives in a JSONB column on the same row,
//! so a transition is a single `UPDATE` that sets `status` and appends to
//! `status_history` together.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::PlacementStore;
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationFilter, ApplicationStatus, InterviewType, StatusChange,
    StatusHistoryEntry,
};
use crate::models::job::{Job, JobChanges};
use crate::models::profile::{Employer, Student};
use crate::services::status_workflow::TransitionPolicy;

/// Names must match the constraints declared in `migrations/`.
const APPLICATION_PAIR_CONSTRAINT: &str = "applications_job_student_unique";
const STUDENT_EMAIL_CONSTRAINT: &str = "students_email_unique";

const APPLICATION_COLUMNS: &str = "id, job_id, student_id, status, status_history, cover_letter, resume_id, interview_date, interview_location, interview_type, interview_notes, feedback, created_at, updated_at";

const JOB_COLUMNS: &str = "id, employer_id, title, description, location, department, job_type, salary, is_active, application_deadline, views, created_at, updated_at";

const STUDENT_COLUMNS: &str =
    "id, first_name, last_name, email, department, gpa, graduation_year, skills, created_at";

const EMPLOYER_COLUMNS: &str = "id, company_name, industry, location, contact_email, created_at";

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    student_id: Uuid,
    status: String,
    status_history: Json<Vec<StatusHistoryEntry>>,
    cover_letter: Option<String>,
    resume_id: Option<String>,
    interview_date: Option<DateTime<Utc>>,
    interview_location: Option<String>,
    interview_type: Option<String>,
    interview_notes: Option<String>,
    feedback: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(row: ApplicationRow) -> Result<Self> {
        let status = row
            .status
            .parse::<ApplicationStatus>()
            .map_err(|e| Error::Internal(format!("application {}: {}", row.id, e)))?;
        let interview_type = row
            .interview_type
            .as_deref()
            .map(str::parse::<InterviewType>)
            .transpose()
            .map_err(|e: String| Error::Internal(format!("application {}: {}", row.id, e)))?;

        Ok(Application {
            id: row.id,
            job_id: row.job_id,
            student_id: row.student_id,
            status,
            status_history: row.status_history.0,
            cover_letter: row.cover_letter,
            resume_id: row.resume_id,
            interview_date: row.interview_date,
            interview_location: row.interview_location,
            interview_type,
            interview_notes: row.interview_notes,
            feedback: row.feedback,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    err.as_database_error()
        .and_then(|db| db.constraint())
        .map_or(false, |name| name == constraint)
}

/// Cloning is cheap; the pool is reference-counted.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PlacementStore for PgStore {
    async fn insert_application(&self, application: Application) -> Result<Application> {
        let sql = format!(
            "INSERT INTO applications (id, job_id, student_id, status, status_history, cover_letter, resume_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {}",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(application.id)
            .bind(application.job_id)
            .bind(application.student_id)
            .bind(application.status.as_str())
            .bind(Json(&application.status_history))
            .bind(&application.cover_letter)
            .bind(&application.resume_id)
            .bind(application.created_at)
            .bind(application.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if violates(&err, APPLICATION_PAIR_CONSTRAINT) {
                    Error::DuplicateApplication
                } else {
                    Error::from(err)
                }
            })?;

        Application::try_from(row)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>> {
        let sql = format!("SELECT {} FROM applications WHERE id = $1", APPLICATION_COLUMNS);
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn find_application(&self, job_id: Uuid, student_id: Uuid) -> Result<Option<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE job_id = $1 AND student_id = $2",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_id)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn list_applications(&self, filter: ApplicationFilter) -> Result<Vec<Application>> {
        let sql = format!(
            "SELECT {}
             FROM applications
             WHERE ($1::uuid IS NULL OR student_id = $1)
               AND ($2::uuid IS NULL OR job_id = $2)
               AND ($3::text IS NULL OR status = $3)
             ORDER BY created_at DESC",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(filter.student_id)
            .bind(filter.job_id)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Application::try_from).collect()
    }

    async fn transition_application(
        &self,
        id: Uuid,
        change: StatusChange,
        policy: TransitionPolicy,
    ) -> Result<Option<Application>> {
        let mut tx = self.pool.begin().await?;

        let select = format!(
            "SELECT {} FROM applications WHERE id = $1 FOR UPDATE",
            APPLICATION_COLUMNS
        );
        let Some(row) = sqlx::query_as::<_, ApplicationRow>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        let current = Application::try_from(row)?;
        policy.check(current.status, change.target())?;

        let interview = change.interview.as_ref();
        let update = format!(
            "UPDATE applications
             SET status = $2,
                 status_history = status_history || $3::jsonb,
                 interview_date = CASE WHEN $4 THEN $5 ELSE interview_date END,
                 interview_location = CASE WHEN $4 THEN $6 ELSE interview_location END,
                 interview_type = CASE WHEN $4 THEN $7 ELSE interview_type END,
                 interview_notes = CASE WHEN $4 THEN $8 ELSE interview_notes END,
                 feedback = COALESCE($9, feedback),
                 version = version + 1,
                 updated_at = $10
             WHERE id = $1
             RETURNING {}",
            APPLICATION_COLUMNS
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&update)
            .bind(id)
            .bind(change.target().as_str())
            .bind(Json(vec![&change.entry]))
            .bind(interview.is_some())
            .bind(interview.map(|i| i.date))
            .bind(interview.and_then(|i| i.location.as_deref()))
            .bind(interview.and_then(|i| i.kind).map(|k| k.as_str()))
            .bind(interview.and_then(|i| i.notes.as_deref()))
            .bind(change.feedback.as_deref())
            .bind(change.entry.timestamp)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Application::try_from(row).map(Some)
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool> {
        let res = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_job(&self, job: Job) -> Result<Job> {
        let sql = format!(
            "INSERT INTO jobs (id, employer_id, title, description, location, department, job_type, salary, is_active, application_deadline, views, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {}",
            JOB_COLUMNS
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(job.id)
            .bind(job.employer_id)
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.location)
            .bind(&job.department)
            .bind(&job.job_type)
            .bind(&job.salary)
            .bind(job.is_active)
            .bind(job.application_deadline)
            .bind(job.views)
            .bind(job.created_at)
            .bind(job.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn view_job(&self, id: Uuid) -> Result<Option<Job>> {
        let sql = format!(
            "UPDATE jobs SET views = views + 1 WHERE id = $1 RETURNING {}",
            JOB_COLUMNS
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn list_jobs(&self, active: Option<bool>) -> Result<Vec<Job>> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE ($1::boolean IS NULL OR is_active = $1) ORDER BY created_at DESC",
            JOB_COLUMNS
        );
        let jobs = sqlx::query_as::<_, Job>(&sql)
            .bind(active)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn update_job(&self, id: Uuid, changes: JobChanges) -> Result<Option<Job>> {
        let sql = format!(
            "UPDATE jobs
             SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                department = COALESCE($5, department),
                job_type = COALESCE($6, job_type),
                salary = COALESCE($7, salary),
                is_active = COALESCE($8, is_active),
                application_deadline = COALESCE($9, application_deadline),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            JOB_COLUMNS
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.description)
            .bind(changes.location)
            .bind(changes.department)
            .bind(changes.job_type)
            .bind(changes.salary)
            .bind(changes.is_active)
            .bind(changes.application_deadline)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn insert_student(&self, student: Student) -> Result<Student> {
        let sql = format!(
            "INSERT INTO students (id, first_name, last_name, email, department, gpa, graduation_year, skills, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {}",
            STUDENT_COLUMNS
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(student.id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .bind(&student.department)
            .bind(student.gpa)
            .bind(student.graduation_year)
            .bind(&student.skills)
            .bind(student.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if violates(&err, STUDENT_EMAIL_CONSTRAINT) {
                    Error::BadRequest("A student with this email address already exists".to_string())
                } else {
                    Error::from(err)
                }
            })?;
        Ok(student)
    }

    async fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
        let sql = format!("SELECT {} FROM students WHERE id = $1", STUDENT_COLUMNS);
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    async fn insert_employer(&self, employer: Employer) -> Result<Employer> {
        let sql = format!(
            "INSERT INTO employers (id, company_name, industry, location, contact_email, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            EMPLOYER_COLUMNS
        );
        let employer = sqlx::query_as::<_, Employer>(&sql)
            .bind(employer.id)
            .bind(&employer.company_name)
            .bind(&employer.industry)
            .bind(&employer.location)
            .bind(&employer.contact_email)
            .bind(employer.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(employer)
    }

    async fn get_employer(&self, id: Uuid) -> Result<Option<Employer>> {
        let sql = format!("SELECT {} FROM employers WHERE id = $1", EMPLOYER_COLUMNS);
        let employer = sqlx::query_as::<_, Employer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employer)
    }
}
