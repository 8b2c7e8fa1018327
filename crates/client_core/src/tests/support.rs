use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId},
    error::GatewayError,
};

use crate::gateway::ApiGateway;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(EmployeeDraft),
    Update(EmployeeId, EmployeeDraft),
    Delete(EmployeeId),
}

pub enum Reply {
    Records(Vec<Employee>),
    Saved(Employee),
    Deleted,
    Fail(GatewayError),
    /// Never resolves, like a request stuck in flight.
    Pending,
}

/// In-memory gateway that answers each call with the next queued reply and
/// records what was asked, in order.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls").len()
    }

    fn record(&self, call: Call) -> Reply {
        let label = format!("{call:?}");
        self.calls.lock().expect("calls").push(call);
        self.replies
            .lock()
            .expect("replies")
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected call with no reply queued: {label}"))
    }
}

#[async_trait]
impl ApiGateway for ScriptedGateway {
    async fn list(&self) -> Result<Vec<Employee>, GatewayError> {
        match self.record(Call::List) {
            Reply::Records(records) => Ok(records),
            Reply::Fail(err) => Err(err),
            Reply::Pending => std::future::pending().await,
            _ => panic!("list answered with a non-list reply"),
        }
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee, GatewayError> {
        match self.record(Call::Create(draft.clone())) {
            Reply::Saved(employee) => Ok(employee),
            Reply::Fail(err) => Err(err),
            Reply::Pending => std::future::pending().await,
            _ => panic!("create answered with a non-save reply"),
        }
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Employee, GatewayError> {
        match self.record(Call::Update(id, draft.clone())) {
            Reply::Saved(employee) => Ok(employee),
            Reply::Fail(err) => Err(err),
            Reply::Pending => std::future::pending().await,
            _ => panic!("update answered with a non-save reply"),
        }
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), GatewayError> {
        match self.record(Call::Delete(id)) {
            Reply::Deleted => Ok(()),
            Reply::Fail(err) => Err(err),
            Reply::Pending => std::future::pending().await,
            _ => panic!("delete answered with a non-delete reply"),
        }
    }
}

pub fn juan() -> Employee {
    Employee {
        id: EmployeeId(1),
        full_name: "Juan Pérez".to_string(),
        document: "1234567890".to_string(),
        email: Some("juan@example.com".to_string()),
        phone: Some("3001234567".to_string()),
        area: Some("Sistemas".to_string()),
        salary: Some(3_500_000.0),
        hire_date: NaiveDate::from_ymd_opt(2024, 1, 15),
    }
}

pub fn maria() -> Employee {
    Employee {
        id: EmployeeId(2),
        full_name: "María García".to_string(),
        document: "0987654321".to_string(),
        email: Some("maria@example.com".to_string()),
        phone: Some("3109876543".to_string()),
        area: Some("RRHH".to_string()),
        salary: Some(4_000_000.0),
        hire_date: NaiveDate::from_ymd_opt(2024, 2, 20),
    }
}

/// Only the required fields set; every optional is absent.
pub fn sparse(id: i64) -> Employee {
    Employee {
        id: EmployeeId(id),
        full_name: "Juan Pérez".to_string(),
        document: "1234567890".to_string(),
        email: None,
        phone: None,
        area: None,
        salary: None,
        hire_date: None,
    }
}
