use specgen_printer::PrintError;
use specgen_spec::SpecError;
use thiserror::Error;

/// Result alias shared by the generator crates
pub type CommonResult<T> = Result<T, CommonError>;

/// Any failure raised while turning a spec into a source file
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Print error: {0}")]
    Print(#[from] PrintError),

    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Generic(String),
}

impl CommonError {
    /// Errors caused by the spec document rather than by the generator.
    pub fn is_spec_error(&self) -> bool {
        matches!(self, CommonError::Spec(_))
    }
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}
