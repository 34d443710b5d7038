//! Persistence abstraction for PlacementHub.
//!
//! Services depend on [`PlacementStore`], never on a concrete backend.
//! [`PgStore`] is the production implementation and [`MemoryStore`] backs the
//! demo mode and the test suite. Both enforce the same two storage-level
//! guarantees: one application per (job, student) pair, and status changes on
//! a single application that serialize instead of overwriting each other.

pub mod memory;
pub mod postgres;

use std::future::Future;

use uuid::Uuid;

use crate::error::Result;
use crate::models::application::{Application, ApplicationFilter, StatusChange};
use crate::models::job::{Job, JobChanges};
use crate::models::profile::{Employer, Student};
use crate::services::status_workflow::TransitionPolicy;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub trait PlacementStore: Clone + Send + Sync + 'static {
    // ── Applications ─────────────────────────────────────────────────────

    /// Persist a new application. Fails with `DuplicateApplication` when one
    /// already exists for the same (job, student) pair, even if the caller's
    /// pre-flight check passed.
    fn insert_application(
        &self,
        application: Application,
    ) -> impl Future<Output = Result<Application>> + Send + '_;

    fn get_application(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Application>>> + Send + '_;

    fn find_application(
        &self,
        job_id: Uuid,
        student_id: Uuid,
    ) -> impl Future<Output = Result<Option<Application>>> + Send + '_;

    /// Matching applications, newest `created_at` first.
    fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> impl Future<Output = Result<Vec<Application>>> + Send + '_;

    /// Check `policy` against the current status and apply `change` as one
    /// locked read-modify-write. Returns `None` if the application is absent.
    fn transition_application(
        &self,
        id: Uuid,
        change: StatusChange,
        policy: TransitionPolicy,
    ) -> impl Future<Output = Result<Option<Application>>> + Send + '_;

    /// Physically remove an application. Returns whether a record was deleted.
    fn delete_application(&self, id: Uuid) -> impl Future<Output = Result<bool>> + Send + '_;

    // ── Jobs ─────────────────────────────────────────────────────────────

    fn insert_job(&self, job: Job) -> impl Future<Output = Result<Job>> + Send + '_;

    fn get_job(&self, id: Uuid) -> impl Future<Output = Result<Option<Job>>> + Send + '_;

    /// Fetch a job and bump its view counter in the same write.
    fn view_job(&self, id: Uuid) -> impl Future<Output = Result<Option<Job>>> + Send + '_;

    fn list_jobs(
        &self,
        active: Option<bool>,
    ) -> impl Future<Output = Result<Vec<Job>>> + Send + '_;

    fn update_job(
        &self,
        id: Uuid,
        changes: JobChanges,
    ) -> impl Future<Output = Result<Option<Job>>> + Send + '_;

    // ── Profiles ─────────────────────────────────────────────────────────

    fn insert_student(&self, student: Student) -> impl Future<Output = Result<Student>> + Send + '_;

    fn get_student(&self, id: Uuid) -> impl Future<Output = Result<Option<Student>>> + Send + '_;

    fn insert_employer(
        &self,
        employer: Employer,
    ) -> impl Future<Output = Result<Employer>> + Send + '_;

    fn get_employer(&self, id: Uuid) -> impl Future<Output = Result<Option<Employer>>> + Send + '_;
}
