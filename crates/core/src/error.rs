#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid reference: {entity} with id {id} does not exist")]
    InvalidReference { entity: &'static str, id: String },
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::InvalidArgument(errors.to_string())
    }
}
