use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed {kind} id '{value}'")]
    MalformedId {
        kind: &'static str,
        value: String,
        #[source]
        source: uuid::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
