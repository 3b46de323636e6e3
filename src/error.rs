use std::fmt::{self, Display};

use potion::Error;

#[derive(Debug)]
pub struct CatalogError {
    info: String,
}

impl CatalogError {
    pub fn new(info: String) -> Self {
        Self { info }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(value: std::io::Error) -> Self {
        Self::new(format!("Failed to read catalog: {value}"))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(format!(
            "Invalid catalog at line {}, column {}: {value}",
            value.line(),
            value.column()
        ))
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.info)
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug)]
pub struct ReportError {
    info: String,
}

impl ReportError {
    pub fn new(info: String) -> Self {
        Self { info }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        Self::new(format!("{value}"))
    }
}

impl From<printpdf::Error> for ReportError {
    fn from(value: printpdf::Error) -> Self {
        Self::new(format!("{value:?}"))
    }
}

impl From<tokio::task::JoinError> for ReportError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::new(format!("Report task failed: {value}"))
    }
}

impl Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.info)
    }
}

impl std::error::Error for ReportError {}

impl Into<Error> for ReportError {
    fn into(self) -> Error {
        Error {
            code: 500,
            info: Some(self.info),
            redirect: None,
        }
    }
}

pub fn not_found(info: &str) -> Error {
    Error {
        code: 404,
        info: Some(info.to_string()),
        redirect: None,
    }
}
