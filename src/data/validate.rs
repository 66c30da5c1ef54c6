use std::fmt;
use std::path::Path;

use crate::data::catalog::{CatalogError, RoomCatalog, FINISH_ROOM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Check that every room and strategy is well-formed for the boost search.
pub fn validate_catalog(catalog: &RoomCatalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !catalog.contains(FINISH_ROOM) {
        report.push(
            ValidationSeverity::Error,
            "catalog",
            format!("missing '{FINISH_ROOM}' entry"),
        );
    }

    let mut rooms: Vec<_> = catalog.rooms().collect();
    rooms.sort_by(|a, b| a.name.cmp(&b.name));

    for room in rooms {
        let context = format!("room '{}'", room.name);
        if room.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, &context, "name is empty");
        }
        if !(room.boostless_time > 0.0) {
            report.push(
                ValidationSeverity::Error,
                &context,
                format!("boostless_time must be positive (got {})", room.boostless_time),
            );
        }
        if room.boost_strats.is_empty() {
            report.push(
                ValidationSeverity::Warning,
                &context,
                "no boost strategies; room can never hold a boost",
            );
        }

        for strat in &room.boost_strats {
            let context = format!("room '{}' strategy '{}'", room.name, strat.name);
            if strat.time > room.boostless_time {
                report.push(
                    ValidationSeverity::Error,
                    &context,
                    format!(
                        "time {} exceeds boostless_time {}",
                        strat.time, room.boostless_time
                    ),
                );
            }
            if strat.boost_time < 0.0 || strat.boost_time > strat.time {
                report.push(
                    ValidationSeverity::Error,
                    &context,
                    format!(
                        "boost_time {} must be within [0, {}]",
                        strat.boost_time, strat.time
                    ),
                );
            }
        }
    }

    report
}

pub fn validate_catalog_file(path: impl AsRef<Path>) -> Result<ValidationReport, CatalogError> {
    let catalog = RoomCatalog::load(path)?;
    Ok(validate_catalog(&catalog))
}
