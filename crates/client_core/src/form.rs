//! Modal edit buffer for creating or editing one employee.
//!
//! Field values are kept as the raw text the user typed. They are parsed into
//! an [`EmployeeDraft`] only when validated or submitted, so a half-typed salary
//! or date never loses what was entered.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use shared::{
    domain::{Employee, EmployeeDraft, EmployeeField, EmployeeId},
    error::GatewayError,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::gateway::ApiGateway;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    Editing(EmployeeId),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("no employee form is open")]
    Closed,
    #[error("an employee form is already open")]
    AlreadyOpen,
    #[error("employee {0} is not in the loaded list")]
    UnknownEmployee(EmployeeId),
    #[error("invalid fields: {}", join_fields(.0))]
    Invalid(BTreeSet<EmployeeField>),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

fn join_fields(fields: &BTreeSet<EmployeeField>) -> String {
    fields
        .iter()
        .map(|field| field.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw text for each input of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: BTreeMap<EmployeeField, String>,
}

impl FormFields {
    pub fn from_employee(employee: &Employee) -> Self {
        let mut fields = Self::default();
        fields.set(EmployeeField::FullName, employee.full_name.clone());
        fields.set(EmployeeField::Document, employee.document.clone());
        fields.set_opt(EmployeeField::Email, employee.email.clone());
        fields.set_opt(EmployeeField::Phone, employee.phone.clone());
        fields.set_opt(EmployeeField::Area, employee.area.clone());
        fields.set_opt(EmployeeField::Salary, employee.salary.map(|v| v.to_string()));
        fields.set_opt(
            EmployeeField::HireDate,
            employee
                .hire_date
                .map(|date| date.format(DATE_INPUT_FORMAT).to_string()),
        );
        fields
    }

    pub fn get(&self, field: EmployeeField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: EmployeeField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    fn set_opt(&mut self, field: EmployeeField, value: Option<String>) {
        if let Some(value) = value {
            self.set(field, value);
        }
    }

    /// Fields whose current text would be rejected.
    pub fn invalid_fields(&self) -> BTreeSet<EmployeeField> {
        EmployeeField::ALL
            .into_iter()
            .filter(|field| !is_acceptable(*field, self.get(*field)))
            .collect()
    }

    pub fn to_draft(&self) -> Result<EmployeeDraft, BTreeSet<EmployeeField>> {
        let invalid = self.invalid_fields();
        if !invalid.is_empty() {
            return Err(invalid);
        }

        Ok(EmployeeDraft {
            full_name: self.get(EmployeeField::FullName).trim().to_string(),
            document: self.get(EmployeeField::Document).trim().to_string(),
            email: self.optional_text(EmployeeField::Email),
            phone: self.optional_text(EmployeeField::Phone),
            area: self.optional_text(EmployeeField::Area),
            salary: self
                .optional_text(EmployeeField::Salary)
                .and_then(|raw| parse_salary(&raw)),
            hire_date: self
                .optional_text(EmployeeField::HireDate)
                .and_then(|raw| parse_date(&raw)),
        })
    }

    fn optional_text(&self, field: EmployeeField) -> Option<String> {
        let value = self.get(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

fn is_acceptable(field: EmployeeField, raw: &str) -> bool {
    let value = raw.trim();
    if value.is_empty() {
        return !field.is_required();
    }
    if let Some(max) = field.max_len() {
        if value.chars().count() > max {
            return false;
        }
    }
    match field {
        EmployeeField::Email => looks_like_email(value),
        EmployeeField::Salary => parse_salary(value).is_some(),
        EmployeeField::HireDate => parse_date(value).is_some(),
        EmployeeField::FullName
        | EmployeeField::Document
        | EmployeeField::Phone
        | EmployeeField::Area => true,
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

fn parse_salary(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_INPUT_FORMAT).ok()
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    mode: FormMode,
    fields: FormFields,
    validation_errors: BTreeSet<EmployeeField>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn validation_errors(&self) -> &BTreeSet<EmployeeField> {
        &self.validation_errors
    }

    pub fn title(&self) -> Option<&'static str> {
        match self.mode {
            FormMode::Closed => None,
            FormMode::Creating => Some("New Employee"),
            FormMode::Editing(_) => Some("Edit Employee"),
        }
    }

    pub fn open_create(&mut self) -> Result<(), FormError> {
        self.open(FormMode::Creating, FormFields::default())
    }

    pub fn open_edit(&mut self, employee: &Employee) -> Result<(), FormError> {
        self.open(
            FormMode::Editing(employee.id),
            FormFields::from_employee(employee),
        )
    }

    fn open(&mut self, mode: FormMode, fields: FormFields) -> Result<(), FormError> {
        if self.is_open() {
            return Err(FormError::AlreadyOpen);
        }
        debug!(?mode, "employee form opened");
        self.mode = mode;
        self.fields = fields;
        self.validation_errors.clear();
        Ok(())
    }

    /// Cancel and the close control both end up here.
    pub fn close(&mut self) {
        if self.is_open() {
            debug!(mode = ?self.mode, "employee form closed");
        }
        *self = Self::default();
    }

    pub fn set_field(
        &mut self,
        field: EmployeeField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        if !self.is_open() {
            return Err(FormError::Closed);
        }
        self.fields.set(field, value);
        self.validation_errors.remove(&field);
        Ok(())
    }

    /// Runs the local checks and remembers which fields failed.
    pub fn validate(&mut self) -> BTreeSet<EmployeeField> {
        self.validation_errors = self.fields.invalid_fields();
        self.validation_errors.clone()
    }

    pub fn draft(&self) -> Result<EmployeeDraft, BTreeSet<EmployeeField>> {
        self.fields.to_draft()
    }

    /// Sends the draft. On success the session closes; on any failure it
    /// stays open with the typed fields intact.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<Employee, FormError>
    where
        G: ApiGateway + ?Sized,
    {
        let mode = self.mode;
        if mode == FormMode::Closed {
            return Err(FormError::Closed);
        }

        let invalid = self.validate();
        if !invalid.is_empty() {
            return Err(FormError::Invalid(invalid));
        }
        let draft = self.draft().map_err(FormError::Invalid)?;

        let saved = match mode {
            FormMode::Creating => gateway.create(&draft).await?,
            FormMode::Editing(id) => gateway.update(id, &draft).await?,
            FormMode::Closed => return Err(FormError::Closed),
        };

        info!(employee_id = %saved.id, ?mode, "employee saved");
        self.close();
        Ok(saved)
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
