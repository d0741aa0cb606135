//! Employee aggregation service.
//!
//! # Responsibilities
//! - Expose employee operations to the HTTP layer
//! - Derive search, highest salary and top earners from one collection fetch
//! - Compose create (POST + compensating read) and delete (resolve name + DELETE)
//!
//! # Design Decisions
//! - The upstream client is the only path to data; nothing is cached
//! - Client errors propagate unchanged; only empty results are re-classified
//! - No fan-out: at most two sequential upstream round trips per call

use std::cmp::Reverse;

use crate::employee::error::{EmployeeError, EmployeeResult};
use crate::employee::model::{Employee, EmployeeInput};
use crate::upstream::UpstreamClient;

/// Number of employees returned by [`EmployeeService::top10_by_earning`].
pub const TOP_EARNERS: usize = 10;

/// Stateless service over the upstream employee API.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    client: UpstreamClient,
}

impl EmployeeService {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Fetch the whole collection in one upstream call.
    pub async fn get_all(&self) -> EmployeeResult<Vec<Employee>> {
        tracing::info!("Fetching all employees");
        let envelope = self.client.fetch_envelope(&self.client.collection_url()).await?;
        let employees = envelope.into_list().ok_or_else(|| {
            EmployeeError::service_error(
                "retrieve all employees",
                "upstream returned a single record where a list was expected",
            )
        })?;
        tracing::info!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    /// Employees whose name contains `fragment` (case-sensitive).
    pub async fn search(&self, fragment: &str) -> EmployeeResult<Vec<Employee>> {
        tracing::info!(fragment, "Searching employees by name");
        let matches = filter_by_name(self.get_all().await?, fragment);
        if matches.is_empty() {
            tracing::warn!(fragment, "No employees matched");
            return Err(EmployeeError::not_found(
                "search employees by name",
                format!("No employees found with name containing: {fragment}"),
            ));
        }
        tracing::info!(fragment, count = matches.len(), "Found matching employees");
        Ok(matches)
    }

    pub async fn get_by_id(&self, id: &str) -> EmployeeResult<Employee> {
        tracing::info!(id, "Fetching employee by id");
        let envelope = self.client.fetch_envelope(&self.client.record_url(id)).await?;
        envelope.into_single().ok_or_else(|| {
            EmployeeError::not_found(
                "retrieve employee by ID",
                format!("Employee not found with ID: {id}"),
            )
        })
    }

    pub async fn highest_salary(&self) -> EmployeeResult<u64> {
        tracing::info!("Calculating highest salary");
        highest_salary_of(&self.get_all().await?).ok_or_else(|| {
            EmployeeError::service_error(
                "calculate highest employee salary",
                "No employees found to calculate highest salary",
            )
        })
    }

    pub async fn top10_by_earning(&self) -> EmployeeResult<Vec<Employee>> {
        tracing::info!("Fetching top earning employees");
        Ok(top_earners(self.get_all().await?, TOP_EARNERS))
    }

    /// Create an employee and return the upstream record, including the
    /// server-assigned id and email.
    ///
    /// The upstream create returns no body, so the record is recovered by
    /// searching for the submitted name and taking the first exact match.
    pub async fn create(&self, input: &EmployeeInput) -> EmployeeResult<Employee> {
        tracing::info!(name = %input.name, "Creating employee");
        self.client.create(input).await?;

        let candidates = match self.search(&input.name).await {
            Ok(candidates) => candidates,
            Err(EmployeeError::NotFound { .. }) => Vec::new(),
            Err(e) => return Err(e),
        };
        let employee = candidates
            .into_iter()
            .find(|e| e.name == input.name)
            .ok_or_else(|| {
                EmployeeError::service_error(
                    "create employee",
                    format!("created employee '{}' not found on re-read", input.name),
                )
            })?;

        tracing::info!(id = %employee.id, name = %employee.name, "Created employee");
        Ok(employee)
    }

    /// Delete by id. The upstream deletes by name, so the id is resolved first;
    /// an unresolvable id never reaches the delete call.
    pub async fn delete_by_id(&self, id: &str) -> EmployeeResult<String> {
        tracing::info!(id, "Deleting employee");
        let employee = self.get_by_id(id).await?;
        self.client.delete(&employee.name).await?;
        tracing::info!(id, name = %employee.name, "Deleted employee");
        Ok(format!("Successfully deleted employee: {}", employee.name))
    }
}

fn filter_by_name(employees: Vec<Employee>, fragment: &str) -> Vec<Employee> {
    employees
        .into_iter()
        .filter(|e| e.name.contains(fragment))
        .collect()
}

fn highest_salary_of(employees: &[Employee]) -> Option<u64> {
    employees.iter().map(|e| e.salary).max()
}

fn top_earners(mut employees: Vec<Employee>, n: usize) -> Vec<Employee> {
    employees.sort_by_key(|e| Reverse(e.salary));
    employees.truncate(n);
    employees
}
