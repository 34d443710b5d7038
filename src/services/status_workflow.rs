//! Transition rules for the application status machine.
//!
//! `Strict` enforces the table in [`allowed_targets`]. `Permissive` accepts any
//! enumerated status after any other, which is how staff override a record by hand.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::application::{
    ApplicationStatus, InterviewDetails, StatusChange, StatusHistoryEntry,
};
use crate::utils::time::display_datetime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    #[default]
    Strict,
    Permissive,
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(TransitionPolicy::Strict),
            "permissive" => Ok(TransitionPolicy::Permissive),
            other => Err(format!("unknown transition policy '{}'", other)),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionPolicy::Strict => f.write_str("strict"),
            TransitionPolicy::Permissive => f.write_str("permissive"),
        }
    }
}

/// Statuses reachable from `from` under the strict policy.
pub fn allowed_targets(from: ApplicationStatus) -> &'static [ApplicationStatus] {
    use ApplicationStatus::*;

    match from {
        Applied => &[UnderReview, Shortlisted, InterviewScheduled, Rejected, Withdrawn],
        UnderReview => &[Shortlisted, InterviewScheduled, Rejected, Withdrawn],
        Shortlisted => &[InterviewScheduled, Selected, Rejected, Withdrawn],
        // rescheduling keeps the record in interview_scheduled
        InterviewScheduled => &[InterviewScheduled, Interviewed, Rejected, Withdrawn],
        Interviewed => &[Shortlisted, Selected, OfferExtended, Rejected, Withdrawn],
        Selected => &[OfferExtended, Rejected, Withdrawn],
        OfferExtended => &[OfferAccepted, OfferDeclined, Withdrawn],
        OfferAccepted | OfferDeclined | Rejected | Withdrawn => &[],
    }
}

impl TransitionPolicy {
    pub fn check(self, from: ApplicationStatus, to: ApplicationStatus) -> Result<()> {
        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::Strict if allowed_targets(from).contains(&to) => Ok(()),
            TransitionPolicy::Strict if from.is_terminal() => Err(Error::InvalidState(format!(
                "Application is already {} and cannot change status",
                from
            ))),
            TransitionPolicy::Strict => Err(Error::InvalidState(format!(
                "Cannot change status from {} to {}",
                from, to
            ))),
        }
    }
}

/// Plain status update. `note` falls back to "Status changed to {status}".
pub fn status_update(
    status: ApplicationStatus,
    note: Option<String>,
    feedback: Option<String>,
    at: DateTime<Utc>,
) -> StatusChange {
    let note = note
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("Status changed to {}", status));

    StatusChange {
        entry: StatusHistoryEntry {
            status,
            timestamp: at,
            note,
        },
        interview: None,
        feedback,
    }
}

pub fn interview_scheduled(details: InterviewDetails, at: DateTime<Utc>) -> StatusChange {
    let note = format!("Interview scheduled for {}", display_datetime(details.date));

    StatusChange {
        entry: StatusHistoryEntry {
            status: ApplicationStatus::InterviewScheduled,
            timestamp: at,
            note,
        },
        interview: Some(details),
        feedback: None,
    }
}

pub fn withdrawal(at: DateTime<Utc>) -> StatusChange {
    StatusChange {
        entry: StatusHistoryEntry {
            status: ApplicationStatus::Withdrawn,
            timestamp: at,
            note: "Application withdrawn by applicant".to_string(),
        },
        interview: None,
        feedback: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus::*;
    use chrono::TimeZone;

    #[test]
    fn terminal_states_have_no_targets() {
        for status in ApplicationStatus::ALL {
            if status.is_terminal() {
                assert!(allowed_targets(status).is_empty(), "{status} should be terminal");
            } else {
                assert!(!allowed_targets(status).is_empty(), "{status} should have exits");
            }
        }
    }

    #[test]
    fn every_live_state_can_withdraw() {
        for status in ApplicationStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(TransitionPolicy::Strict.check(status, Withdrawn).is_ok());
        }
    }

    #[test]
    fn applied_is_never_a_target() {
        for status in ApplicationStatus::ALL {
            assert!(!allowed_targets(status).contains(&Applied));
        }
    }

    #[test]
    fn strict_rejects_skipping_to_offer() {
        let err = TransitionPolicy::Strict.check(Applied, OfferAccepted).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn strict_rejects_leaving_terminal_state() {
        let err = TransitionPolicy::Strict.check(Withdrawn, UnderReview).unwrap_err();
        match err {
            Error::InvalidState(msg) => assert!(msg.contains("already withdrawn")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn permissive_accepts_anything() {
        for from in ApplicationStatus::ALL {
            for to in ApplicationStatus::ALL {
                assert!(TransitionPolicy::Permissive.check(from, to).is_ok());
            }
        }
    }

    #[test]
    fn status_update_defaults_note() {
        let change = status_update(Shortlisted, None, None, Utc::now());
        assert_eq!(change.entry.note, "Status changed to shortlisted");

        let blank = status_update(Shortlisted, Some("   ".into()), None, Utc::now());
        assert_eq!(blank.entry.note, "Status changed to shortlisted");

        let given = status_update(Shortlisted, Some("Strong profile".into()), None, Utc::now());
        assert_eq!(given.entry.note, "Strong profile");
    }

    #[test]
    fn interview_note_carries_formatted_date() {
        let date = Utc.with_ymd_and_hms(2026, 11, 3, 14, 30, 0).unwrap();
        let change = interview_scheduled(
            InterviewDetails {
                date,
                location: Some("Room 204".into()),
                kind: None,
                notes: None,
            },
            Utc::now(),
        );
        assert_eq!(change.target(), InterviewScheduled);
        assert_eq!(change.entry.note, "Interview scheduled for 2026-11-03 14:30 UTC");
    }

    #[test]
    fn policy_parses_from_config_values() {
        assert_eq!("Strict".parse::<TransitionPolicy>(), Ok(TransitionPolicy::Strict));
        assert_eq!("permissive".parse::<TransitionPolicy>(), Ok(TransitionPolicy::Permissive));
        assert!("lenient".parse::<TransitionPolicy>().is_err());
    }
}
