//! Render model for the directory screen, plus a plain-text rendering of it.

use std::fmt;

use shared::domain::{Employee, EmployeeField, EmployeeId};

use crate::{
    banner::Banner,
    form::FormSession,
    format::{date_or_placeholder, salary_or_placeholder, text_or_placeholder},
    store::{CollectionStore, LoadStatus},
};

pub const APP_TITLE: &str = "HR Management";
pub const LOADING_TEXT: &str = "Loading employees...";
pub const EMPTY_TEXT: &str = "No employees registered";
pub const UNAVAILABLE_TEXT: &str = "Employee list unavailable. Use `refresh` to retry.";

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryView {
    pub banner: Option<String>,
    pub body: ListBody,
    pub form: Option<FormView>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListBody {
    Booting,
    Loading,
    Empty,
    Unavailable,
    Table(Vec<EmployeeRow>),
}

/// One employee with every column already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: EmployeeId,
    pub full_name: String,
    pub document: String,
    pub email: String,
    pub phone: String,
    pub area: String,
    pub salary: String,
    pub hire_date: String,
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            full_name: employee.full_name.clone(),
            document: employee.document.clone(),
            email: text_or_placeholder(employee.email.as_deref()),
            phone: text_or_placeholder(employee.phone.as_deref()),
            area: text_or_placeholder(employee.area.as_deref()),
            salary: salary_or_placeholder(employee.salary),
            hire_date: date_or_placeholder(employee.hire_date),
        }
    }
}

impl EmployeeRow {
    fn cells(&self) -> [String; 8] {
        [
            self.id.to_string(),
            self.full_name.clone(),
            self.document.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.area.clone(),
            self.salary.clone(),
            self.hire_date.clone(),
        ]
    }
}

const TABLE_HEADERS: [&str; 8] = [
    "ID", "Name", "Document", "Email", "Phone", "Area", "Salary", "Hire date",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub inputs: Vec<FormInput>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub field: EmployeeField,
    pub value: String,
    pub required: bool,
    pub invalid: bool,
}

impl DirectoryView {
    pub fn build(store: &CollectionStore, form: &FormSession, banner: &Banner) -> Self {
        let body = match store.status() {
            LoadStatus::Idle => ListBody::Booting,
            LoadStatus::Loading => ListBody::Loading,
            LoadStatus::Failed => ListBody::Unavailable,
            LoadStatus::Loaded if store.records().is_empty() => ListBody::Empty,
            LoadStatus::Loaded => {
                ListBody::Table(store.records().iter().map(EmployeeRow::from).collect())
            }
        };

        let form = form.title().map(|title| FormView {
            title,
            inputs: EmployeeField::ALL
                .into_iter()
                .map(|field| FormInput {
                    field,
                    value: form.fields().get(field).to_string(),
                    required: field.is_required(),
                    invalid: form.validation_errors().contains(&field),
                })
                .collect(),
        });

        Self {
            banner: banner.message().map(str::to_string),
            body,
            form,
        }
    }
}

impl fmt::Display for DirectoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {APP_TITLE} ==")?;
        if let Some(message) = &self.banner {
            writeln!(f, "[!] {message}  (dismiss to close)")?;
        }
        match &self.body {
            ListBody::Booting => {}
            ListBody::Loading => writeln!(f, "{LOADING_TEXT}")?,
            ListBody::Empty => writeln!(f, "{EMPTY_TEXT}")?,
            ListBody::Unavailable => writeln!(f, "{UNAVAILABLE_TEXT}")?,
            ListBody::Table(rows) => write_table(f, rows)?,
        }
        if let Some(form) = &self.form {
            write!(f, "{form}")?;
        }
        Ok(())
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, rows: &[EmployeeRow]) -> fmt::Result {
    let cells: Vec<[String; 8]> = rows.iter().map(EmployeeRow::cells).collect();
    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(f, &TABLE_HEADERS, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(f, "{}", rule.join("-+-"))?;
    for row in &cells {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        write_row(f, &values, &widths)?;
    }
    Ok(())
}

fn write_row(f: &mut fmt::Formatter<'_>, values: &[&str], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = values
        .iter()
        .zip(widths.iter())
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- {} -- [x]", self.title)?;
        for input in &self.inputs {
            let marker = if input.required { "*" } else { " " };
            let flag = if input.invalid { "  <- invalid" } else { "" };
            writeln!(
                f,
                "{marker} {:<10} ({:<13}) [{}]{flag}",
                input.field.label(),
                input.field.wire_name(),
                input.value
            )?;
        }
        writeln!(f, "[submit] [cancel]")
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
