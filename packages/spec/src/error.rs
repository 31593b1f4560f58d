use thiserror::Error;

pub type SpecResult<T> = Result<T, SpecError>;

#[derive(Error, Debug)]
pub enum SpecError {
    #[error("'{key}' is missing")]
    MissingKey { key: String },

    #[error("Invalid spec JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spec has no 'lang.{lang}' section")]
    MissingLanguage { lang: String },
}

impl SpecError {
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    pub fn missing_language(lang: impl Into<String>) -> Self {
        Self::MissingLanguage { lang: lang.into() }
    }
}
