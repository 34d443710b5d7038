use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentPayload {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub department: Option<String>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub gpa: Option<f64>,
    #[validate(range(min = 1950, max = 2100))]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployerPayload {
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
}
