use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(EmployeeId);

/// An employee as returned by the directory API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(rename = "nombre")]
    pub full_name: String,
    #[serde(rename = "documento")]
    pub document: String,
    #[serde(rename = "correo", default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(rename = "sueldo", default, deserialize_with = "deserialize_salary")]
    pub salary: Option<f64>,
    #[serde(rename = "fecha_ingreso", default)]
    pub hire_date: Option<NaiveDate>,
}

impl Employee {
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            full_name: self.full_name.clone(),
            document: self.document.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            area: self.area.clone(),
            salary: self.salary,
            hire_date: self.hire_date,
        }
    }
}

/// Request body for create and update. Has no id; the server assigns one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    #[serde(rename = "nombre")]
    pub full_name: String,
    #[serde(rename = "documento")]
    pub document: String,
    #[serde(rename = "correo")]
    pub email: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub area: Option<String>,
    #[serde(rename = "sueldo", default, deserialize_with = "deserialize_salary")]
    pub salary: Option<f64>,
    #[serde(rename = "fecha_ingreso")]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeDraft {
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            full_name: self.full_name,
            document: self.document,
            email: self.email,
            phone: self.phone,
            area: self.area,
            salary: self.salary,
            hire_date: self.hire_date,
        }
    }
}

// Decimal columns come back as JSON strings from some backends.
fn deserialize_salary<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireSalary {
        Number(f64),
        Text(String),
    }

    match Option::<WireSalary>::deserialize(deserializer)? {
        None => Ok(None),
        Some(WireSalary::Number(value)) => Ok(Some(value)),
        Some(WireSalary::Text(raw)) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid salary value '{raw}'"))),
    }
}

/// Editable employee fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmployeeField {
    FullName,
    Document,
    Email,
    Phone,
    Area,
    Salary,
    HireDate,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 7] = [
        EmployeeField::FullName,
        EmployeeField::Document,
        EmployeeField::Email,
        EmployeeField::Phone,
        EmployeeField::Area,
        EmployeeField::Salary,
        EmployeeField::HireDate,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            EmployeeField::FullName => "nombre",
            EmployeeField::Document => "documento",
            EmployeeField::Email => "correo",
            EmployeeField::Phone => "telefono",
            EmployeeField::Area => "area",
            EmployeeField::Salary => "sueldo",
            EmployeeField::HireDate => "fecha_ingreso",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmployeeField::FullName => "Full name",
            EmployeeField::Document => "Document",
            EmployeeField::Email => "Email",
            EmployeeField::Phone => "Phone",
            EmployeeField::Area => "Area",
            EmployeeField::Salary => "Salary",
            EmployeeField::HireDate => "Hire date",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, EmployeeField::FullName | EmployeeField::Document)
    }

    /// Column width enforced by the server for text fields.
    pub fn max_len(self) -> Option<usize> {
        match self {
            EmployeeField::FullName => Some(100),
            EmployeeField::Document => Some(20),
            EmployeeField::Email => Some(100),
            EmployeeField::Phone => Some(20),
            EmployeeField::Area => Some(50),
            EmployeeField::Salary | EmployeeField::HireDate => None,
        }
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employee field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for EmployeeField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let field = match normalized.as_str() {
            "nombre" | "name" | "full_name" => EmployeeField::FullName,
            "documento" | "document" => EmployeeField::Document,
            "correo" | "email" => EmployeeField::Email,
            "telefono" | "phone" => EmployeeField::Phone,
            "area" | "department" => EmployeeField::Area,
            "sueldo" | "salary" => EmployeeField::Salary,
            "fecha_ingreso" | "hire_date" => EmployeeField::HireDate,
            _ => return Err(UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_with_null_optionals_deserializes() {
        let raw = r#"{
            "id": 1,
            "nombre": "Juan Pérez",
            "documento": "1234567890",
            "correo": null,
            "telefono": null,
            "area": null,
            "sueldo": null,
            "fecha_ingreso": null
        }"#;
        let employee: Employee = serde_json::from_str(raw).expect("employee");
        assert_eq!(employee.id, EmployeeId(1));
        assert_eq!(employee.email, None);
        assert_eq!(employee.salary, None);
        assert_eq!(employee.hire_date, None);
    }

    #[test]
    fn employee_with_missing_optionals_deserializes() {
        let raw = r#"{"id": 4, "nombre": "Ana", "documento": "77"}"#;
        let employee: Employee = serde_json::from_str(raw).expect("employee");
        assert_eq!(employee.area, None);
        assert_eq!(employee.salary, None);
    }

    #[test]
    fn salary_accepts_decimal_strings() {
        let raw = r#"{"id": 2, "nombre": "María", "documento": "0987", "sueldo": "4000000.00", "fecha_ingreso": "2024-02-20"}"#;
        let employee: Employee = serde_json::from_str(raw).expect("employee");
        assert_eq!(employee.salary, Some(4_000_000.0));
        assert_eq!(
            employee.hire_date,
            NaiveDate::from_ymd_opt(2024, 2, 20)
        );
    }

    #[test]
    fn draft_serializes_wire_names_and_nulls() {
        let draft = EmployeeDraft {
            full_name: "Pedro López".to_string(),
            document: "1122334455".to_string(),
            area: Some("Ventas".to_string()),
            salary: Some(2_500_000.0),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..EmployeeDraft::default()
        };
        let value = serde_json::to_value(&draft).expect("json");
        assert_eq!(value["nombre"], "Pedro López");
        assert_eq!(value["documento"], "1122334455");
        assert_eq!(value["area"], "Ventas");
        assert_eq!(value["fecha_ingreso"], "2024-03-01");
        assert!(value["correo"].is_null());
        assert!(value["telefono"].is_null());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn field_names_parse_from_wire_and_english() {
        assert_eq!("nombre".parse::<EmployeeField>(), Ok(EmployeeField::FullName));
        assert_eq!("hire-date".parse::<EmployeeField>(), Ok(EmployeeField::HireDate));
        assert_eq!("Salary".parse::<EmployeeField>(), Ok(EmployeeField::Salary));
        assert!("id".parse::<EmployeeField>().is_err());
    }
}
