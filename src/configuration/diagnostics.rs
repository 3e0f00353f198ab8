use std::fmt::{self, Display, Formatter};

use tracing::warn;

use super::{dispatch::DirectiveOutcome, registry::FieldType};


/// What went wrong on a configuration line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DiagnosticKind {
    UnknownKeyword,

    MissingArgument { keyword: &'static str },

    ConversionFailed {
        keyword: &'static str,
        expected: FieldType,
    },

    CapacityExceeded {
        keyword: &'static str,
        capacity: usize,
    },

    /// Reading the already opened file failed; the rest of it was skipped.
    ReadFailed { reason: String },
}

impl DiagnosticKind {
    /// Maps a directive outcome to its diagnostic, or `None` if it was applied.
    pub fn from_outcome(outcome: DirectiveOutcome) -> Option<Self> {
        match outcome {
            DirectiveOutcome::Applied { .. } => None,
            DirectiveOutcome::UnknownKeyword => Some(Self::UnknownKeyword),
            DirectiveOutcome::MissingArgument { keyword } => {
                Some(Self::MissingArgument { keyword })
            }
            DirectiveOutcome::ConversionFailed { keyword, expected } => {
                Some(Self::ConversionFailed { keyword, expected })
            }
            DirectiveOutcome::CapacityExceeded { keyword, capacity } => {
                Some(Self::CapacityExceeded { keyword, capacity })
            }
        }
    }

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::MissingArgument { keyword }
            | Self::ConversionFailed { keyword, .. }
            | Self::CapacityExceeded { keyword, .. } => Some(*keyword),
            Self::UnknownKeyword | Self::ReadFailed { .. } => None,
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKeyword => write!(f, "unknown keyword"),
            Self::MissingArgument { keyword } => {
                write!(f, "argument missing to configuration parameter {}", keyword)
            }
            Self::ConversionFailed { keyword, expected } => write!(
                f,
                "illegal format for configuration parameter {} (expected {})",
                keyword, expected
            ),
            Self::CapacityExceeded { keyword, capacity } => write!(
                f,
                "no more space left in configuration string list {} (capacity is {})",
                keyword, capacity
            ),
            Self::ReadFailed { reason } => {
                write!(f, "failed to read configuration file: {}", reason)
            }
        }
    }
}


/// A single non-fatal problem found while parsing a configuration file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ConfigurationDiagnostic {
    pub kind: DiagnosticKind,

    /// 1-based line number, if the problem is tied to a line.
    pub line_number: Option<usize>,

    /// The offending line, verbatim.
    pub line: Option<String>,
}

impl ConfigurationDiagnostic {
    pub fn for_line(kind: DiagnosticKind, line_number: usize, line: impl Into<String>) -> Self {
        Self {
            kind,
            line_number: Some(line_number),
            line: Some(line.into()),
        }
    }

    pub fn without_line(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            line_number: None,
            line: None,
        }
    }
}

impl Display for ConfigurationDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.line_number, self.line.as_ref()) {
            (Some(line_number), Some(line)) => {
                write!(f, "{}, line {}: \"{}\"", self.kind, line_number, line)
            }
            (Some(line_number), None) => write!(f, "{}, line {}", self.kind, line_number),
            _ => write!(f, "{}", self.kind),
        }
    }
}


/// Every diagnostic reported while parsing one configuration file, in order.
///
/// Diagnostics never affect whether loading succeeded.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct ConfigurationDiagnostics {
    diagnostics: Vec<ConfigurationDiagnostic>,
}

impl ConfigurationDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `diagnostic` and forwards it to the log as a warning.
    pub fn report(&mut self, diagnostic: ConfigurationDiagnostic) {
        warn!("Configuration: {}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigurationDiagnostic> {
        self.diagnostics.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &DiagnosticKind> {
        self.diagnostics.iter().map(|diagnostic| &diagnostic.kind)
    }

    pub fn as_slice(&self) -> &[ConfigurationDiagnostic] {
        &self.diagnostics
    }
}

impl<'a> IntoIterator for &'a ConfigurationDiagnostics {
    type Item = &'a ConfigurationDiagnostic;
    type IntoIter = std::slice::Iter<'a, ConfigurationDiagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_outcomes_produce_no_diagnostic() {
        assert_eq!(
            DiagnosticKind::from_outcome(DirectiveOutcome::Applied { keyword: "user" }),
            None
        );

        assert_eq!(
            DiagnosticKind::from_outcome(DirectiveOutcome::MissingArgument { keyword: "user" }),
            Some(DiagnosticKind::MissingArgument { keyword: "user" })
        );
    }

    #[test]
    fn display_includes_line_context() {
        let diagnostic = ConfigurationDiagnostic::for_line(
            DiagnosticKind::CapacityExceeded {
                keyword: "mask_host",
                capacity: 128,
            },
            12,
            "mask_host = 10.0.0.1",
        );

        let display = diagnostic.to_string();
        assert!(display.contains("mask_host"));
        assert!(display.contains("line 12"));
        assert!(display.contains("\"mask_host = 10.0.0.1\""));
        assert_eq!(diagnostic.kind.keyword(), Some("mask_host"));
    }

    #[test]
    fn report_keeps_diagnostics_in_order() {
        let mut diagnostics = ConfigurationDiagnostics::new();

        diagnostics.report(ConfigurationDiagnostic::for_line(
            DiagnosticKind::UnknownKeyword,
            1,
            "bogus=1",
        ));
        diagnostics.report(ConfigurationDiagnostic::without_line(
            DiagnosticKind::ReadFailed {
                reason: "interrupted".to_string(),
            },
        ));

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics.kinds().collect::<Vec<_>>(),
            vec![
                &DiagnosticKind::UnknownKeyword,
                &DiagnosticKind::ReadFailed {
                    reason: "interrupted".to_string()
                },
            ]
        );
    }
}
