use uuid::Uuid;

use crate::dto::profile_dto::{CreateEmployerPayload, CreateStudentPayload};
use crate::error::{Error, Result};
use crate::models::profile::{Employer, Student};
use crate::store::PlacementStore;
use crate::utils::time::now;

#[derive(Clone)]
pub struct ProfileService<S> {
    store: S,
}

impl<S: PlacementStore> ProfileService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_student(&self, payload: CreateStudentPayload) -> Result<Student> {
        let student = Student {
            id: Uuid::new_v4(),
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            department: payload.department,
            gpa: payload.gpa,
            graduation_year: payload.graduation_year,
            skills: payload
                .skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            created_at: now(),
        };
        let student = self.store.insert_student(student).await?;
        tracing::info!(student_id = %student.id, "student registered");
        Ok(student)
    }

    pub async fn get_student(&self, id: Uuid) -> Result<Student> {
        self.store
            .get_student(id)
            .await?
            .ok_or_else(|| Error::NotFound("Student not found".to_string()))
    }

    pub async fn create_employer(&self, payload: CreateEmployerPayload) -> Result<Employer> {
        let employer = Employer {
            id: Uuid::new_v4(),
            company_name: payload.company_name.trim().to_string(),
            industry: payload.industry,
            location: payload.location,
            contact_email: payload.contact_email,
            created_at: now(),
        };
        let employer = self.store.insert_employer(employer).await?;
        tracing::info!(employer_id = %employer.id, "employer registered");
        Ok(employer)
    }

    pub async fn get_employer(&self, id: Uuid) -> Result<Employer> {
        self.store
            .get_employer(id)
            .await?
            .ok_or_else(|| Error::NotFound("Employer not found".to_string()))
    }
}
