use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Closed set of states an application moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    UnderReview,
    Shortlisted,
    InterviewScheduled,
    Interviewed,
    Selected,
    Rejected,
    OfferExtended,
    OfferAccepted,
    OfferDeclined,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 11] = [
        ApplicationStatus::Applied,
        ApplicationStatus::UnderReview,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::InterviewScheduled,
        ApplicationStatus::Interviewed,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
        ApplicationStatus::OfferExtended,
        ApplicationStatus::OfferAccepted,
        ApplicationStatus::OfferDeclined,
        ApplicationStatus::Withdrawn,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::InterviewScheduled => "interview_scheduled",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::OfferExtended => "offer_extended",
            ApplicationStatus::OfferAccepted => "offer_accepted",
            ApplicationStatus::OfferDeclined => "offer_declined",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::OfferAccepted
                | ApplicationStatus::OfferDeclined
                | ApplicationStatus::Withdrawn
                | ApplicationStatus::Rejected
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status value: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == needle)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    InPerson,
    Video,
    Phone,
}

impl InterviewType {
    pub const fn as_str(self) -> &'static str {
        match self {
            InterviewType::InPerson => "in_person",
            InterviewType::Video => "video",
            InterviewType::Phone => "phone",
        }
    }
}

impl FromStr for InterviewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in_person" => Ok(InterviewType::InPerson),
            "video" => Ok(InterviewType::Video),
            "phone" => Ok(InterviewType::Phone),
            other => Err(format!("Invalid interview type: {}", other)),
        }
    }
}

/// One entry of the append-only audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: ApplicationStatus,
    pub timestamp: DateTime<Utc>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub student_id: Uuid,
    pub status: ApplicationStatus,
    pub status_history: Vec<StatusHistoryEntry>,
    pub cover_letter: Option<String>,
    pub resume_id: Option<String>,
    pub interview_date: Option<DateTime<Utc>>,
    pub interview_location: Option<String>,
    pub interview_type: Option<InterviewType>,
    pub interview_notes: Option<String>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Builds a freshly submitted application with its initial history entry.
    pub fn submitted(
        job_id: Uuid,
        student_id: Uuid,
        cover_letter: Option<String>,
        resume_id: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            student_id,
            status: ApplicationStatus::Applied,
            status_history: vec![StatusHistoryEntry {
                status: ApplicationStatus::Applied,
                timestamp: at,
                note: "Application submitted".to_string(),
            }],
            cover_letter,
            resume_id,
            interview_date: None,
            interview_location: None,
            interview_type: None,
            interview_notes: None,
            feedback: None,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Details written alongside an interview_scheduled transition.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewDetails {
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub kind: Option<InterviewType>,
    pub notes: Option<String>,
}

/// A single status transition: the new status, its history entry, and any
/// fields that must be written in the same record update.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub entry: StatusHistoryEntry,
    pub interview: Option<InterviewDetails>,
    pub feedback: Option<String>,
}

impl StatusChange {
    pub fn target(&self) -> ApplicationStatus {
        self.entry.status
    }

    /// Applies the change to an in-memory record. Status and history move together.
    pub fn apply_to(&self, application: &mut Application) {
        application.status = self.entry.status;
        application.status_history.push(self.entry.clone());
        if let Some(interview) = &self.interview {
            application.interview_date = Some(interview.date);
            application.interview_location = interview.location.clone();
            application.interview_type = interview.kind;
            application.interview_notes = interview.notes.clone();
        }
        if let Some(feedback) = &self.feedback {
            application.feedback = Some(feedback.clone());
        }
        application.updated_at = self.entry.timestamp;
    }
}

/// Filter for the application list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub student_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
}

impl ApplicationFilter {
    pub fn matches(&self, application: &Application) -> bool {
        self.student_id.map_or(true, |id| application.student_id == id)
            && self.job_id.map_or(true, |id| application.job_id == id)
            && self.status.map_or(true, |s| application.status == s)
    }
}
