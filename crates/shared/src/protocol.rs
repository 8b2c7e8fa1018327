use serde::{Deserialize, Serialize};

/// Collection path of the employee resource.
pub const EMPLOYEES_PATH: &str = "/empleados";

pub fn employee_path(id: crate::domain::EmployeeId) -> String {
    format!("{EMPLOYEES_PATH}/{}", id.0)
}

/// Error body returned by the directory API on non-success responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    /// Schema validation failures, one entry per offending field.
    Issues(Vec<ValidationIssue>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

impl ErrorBody {
    /// Flattens the detail into a single line, or `None` when it is empty.
    pub fn message(&self) -> Option<String> {
        let message = match &self.detail {
            ErrorDetail::Message(message) => message.trim().to_string(),
            ErrorDetail::Issues(issues) => issues
                .iter()
                .map(ValidationIssue::describe)
                .collect::<Vec<_>>()
                .join("; "),
        };
        (!message.is_empty()).then_some(message)
    }
}

impl ValidationIssue {
    fn describe(&self) -> String {
        // loc looks like ["body", "documento"]; the last segment names the field.
        match self.loc.last() {
            Some(serde_json::Value::String(field)) => format!("{field}: {}", self.msg),
            _ => self.msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeId;

    #[test]
    fn string_detail_is_used_as_is() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Documento ya registrado"}"#).expect("body");
        assert_eq!(body.message().as_deref(), Some("Documento ya registrado"));
    }

    #[test]
    fn issue_list_detail_is_joined() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail": [
                {"loc": ["body", "nombre"], "msg": "String should have at least 1 character", "type": "string_too_short"},
                {"loc": ["body", "sueldo"], "msg": "Input should be greater than or equal to 0"}
            ]}"#,
        )
        .expect("body");
        assert_eq!(
            body.message().as_deref(),
            Some("nombre: String should have at least 1 character; sueldo: Input should be greater than or equal to 0")
        );
    }

    #[test]
    fn blank_detail_counts_as_missing() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "  "}"#).expect("body");
        assert_eq!(body.message(), None);
    }

    #[test]
    fn member_path_includes_id() {
        assert_eq!(employee_path(EmployeeId(1)), "/empleados/1");
    }
}
