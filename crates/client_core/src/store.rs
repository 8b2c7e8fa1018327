use shared::{
    domain::{Employee, EmployeeId},
    error::GatewayError,
};
use tracing::{info, warn};

use crate::gateway::ApiGateway;

pub const LIST_FAILURE_CONTEXT: &str = "Error loading employees";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Last known employee collection, exactly as the server listed it.
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    status: LoadStatus,
    records: Vec<Employee>,
    error: Option<String>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Records in server order. Only meaningful while `Loaded`.
    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    /// Failure message. Only set while `Failed`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.records.iter().find(|employee| employee.id == id)
    }

    /// Re-lists the collection and replaces whatever was held before.
    pub async fn refresh<G>(&mut self, gateway: &G) -> LoadStatus
    where
        G: ApiGateway + ?Sized,
    {
        self.mark_loading();
        let result = gateway.list().await;
        self.finish(result)
    }

    /// Enters `Loading` without calling the gateway.
    pub fn mark_loading(&mut self) {
        self.status = LoadStatus::Loading;
        self.error = None;
    }

    fn finish(&mut self, result: Result<Vec<Employee>, GatewayError>) -> LoadStatus {
        match result {
            Ok(records) => {
                info!(count = records.len(), "employee list loaded");
                self.records = records;
                self.error = None;
                self.status = LoadStatus::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "employee list failed");
                self.records.clear();
                // Always prefixed, even when the server sent a detail.
                self.error = Some(format!("{LIST_FAILURE_CONTEXT}: {err}"));
                self.status = LoadStatus::Failed;
            }
        }
        self.status
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
