//! Employee records and write payloads.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Minimum accepted age on input.
pub const MIN_AGE: i32 = 16;
/// Maximum accepted age on input.
pub const MAX_AGE: i32 = 75;

/// An employee as returned by the upstream API.
///
/// Field names on the wire match the upstream contract and are kept as-is in
/// the public responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,

    #[serde(rename = "employee_name")]
    pub name: String,

    #[serde(rename = "employee_salary", deserialize_with = "positive_salary")]
    pub salary: u64,

    #[serde(rename = "employee_age")]
    pub age: i32,

    #[serde(rename = "employee_title")]
    pub title: String,

    #[serde(rename = "employee_email", default)]
    pub email: Option<String>,
}

fn positive_salary<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let salary = u64::deserialize(deserializer)?;
    if salary == 0 {
        return Err(D::Error::custom("employee_salary must be greater than 0"));
    }
    Ok(salary)
}

/// Payload for creating an employee. `id` and `email` are assigned upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub salary: i64,
    pub age: i32,
    pub title: String,
}

impl EmployeeInput {
    /// Check field constraints, returning one message per violated field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name must not be blank".to_string());
        }
        if self.salary <= 0 {
            problems.push("salary must be greater than 0".to_string());
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            problems.push(format!("age must be between {MIN_AGE} and {MAX_AGE}"));
        }
        if self.title.trim().is_empty() {
            problems.push("title must not be blank".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Body of the upstream DELETE request.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteRequest<'a> {
    pub name: &'a str,
}
