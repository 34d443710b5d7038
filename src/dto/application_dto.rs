use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, InterviewDetails, InterviewType};
use crate::models::job::Job;
use crate::models::profile::{Employer, Student};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPayload {
    pub job_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    #[validate(length(max = 10000))]
    pub cover_letter: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub resume_id: Option<String>,
}

/// Apply request after required-field checks.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub job_id: Uuid,
    pub student_id: Uuid,
    pub cover_letter: Option<String>,
    pub resume_id: Option<String>,
}

impl ApplyPayload {
    pub fn into_request(self) -> Result<NewApplication> {
        let job_id = self
            .job_id
            .ok_or_else(|| Error::BadRequest("jobId is required".to_string()))?;
        let student_id = self
            .student_id
            .ok_or_else(|| Error::BadRequest("studentId is required".to_string()))?;

        Ok(NewApplication {
            job_id,
            student_id,
            cover_letter: self.cover_letter.filter(|c| !c.trim().is_empty()),
            resume_id: self.resume_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
    #[validate(length(max = 5000))]
    pub feedback: Option<String>,
}

impl UpdateStatusPayload {
    pub fn parsed_status(&self) -> Result<ApplicationStatus> {
        self.status
            .parse::<ApplicationStatus>()
            .map_err(|e| Error::BadRequest(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInterviewPayload {
    pub interview_date: DateTime<Utc>,
    #[validate(length(min = 1, max = 255))]
    pub interview_location: Option<String>,
    pub interview_type: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl ScheduleInterviewPayload {
    pub fn into_details(self) -> Result<InterviewDetails> {
        let kind = self
            .interview_type
            .as_deref()
            .map(str::parse::<InterviewType>)
            .transpose()
            .map_err(Error::BadRequest)?;

        Ok(InterviewDetails {
            date: self.interview_date,
            location: self.interview_location,
            kind,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationListQuery {
    pub status: Option<String>,
}

impl ApplicationListQuery {
    pub fn parsed_status(&self) -> Result<Option<ApplicationStatus>> {
        self.status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<ApplicationStatus>()
                    .map_err(|e| Error::BadRequest(e.to_string()))
            })
            .transpose()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub department: Option<String>,
    pub job_type: Option<String>,
    pub is_active: bool,
    pub application_deadline: Option<DateTime<Utc>>,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            location: job.location.clone(),
            department: job.department.clone(),
            job_type: job.job_type.clone(),
            is_active: job.is_active,
            application_deadline: job.application_deadline,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub gpa: Option<f64>,
    pub graduation_year: Option<i32>,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            name: student.full_name(),
            email: student.email.clone(),
            department: student.department.clone(),
            gpa: student.gpa,
            graduation_year: student.graduation_year,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerSummary {
    pub id: Uuid,
    pub company_name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
}

impl From<&Employer> for EmployerSummary {
    fn from(employer: &Employer) -> Self {
        Self {
            id: employer.id,
            company_name: employer.company_name.clone(),
            industry: employer.industry.clone(),
            location: employer.location.clone(),
        }
    }
}

/// Application joined with display summaries of its job, student and employer.
/// A summary is `None` when the referenced record no longer exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<JobSummary>,
    pub student: Option<StudentSummary>,
    pub employer: Option<EmployerSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
