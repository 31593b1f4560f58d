use thiserror::Error;

pub type PrintResult<T> = Result<T, PrintError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("Printer '{printer}' expects {expected} child(ren), found {found}")]
    InvalidChildCount {
        printer: String,
        expected: usize,
        found: usize,
    },

    #[error("Root print context is missing '{field}'")]
    MissingRootConfiguration { field: &'static str },

    #[error("An access path needs at least one accessor")]
    EmptyAccessPath,
}

impl PrintError {
    pub fn invalid_child_count(printer: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::InvalidChildCount {
            printer: printer.into(),
            expected,
            found,
        }
    }

    pub fn missing_root_configuration(field: &'static str) -> Self {
        Self::MissingRootConfiguration { field }
    }

    /// Whether the error was raised by a printer receiving the wrong arity.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::InvalidChildCount { .. })
    }
}
