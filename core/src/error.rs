use thiserror::Error;

/// Errors raised by the layers around the stats engine (snapshot loading,
/// label parsing, date parsing). The engine itself never fails.
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Unknown {kind} label '{label}'")]
    UnknownLabel { kind: &'static str, label: String },
}

pub type ClinicResult<T> = Result<T, ClinicError>;
