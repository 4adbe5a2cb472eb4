use stack_string::StackString;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormSyncError {
    #[error("TYPEFORM_TOKEN must be set")]
    MissingToken,
    #[error("The response does not match the requested update of form {0}")]
    ResponseMismatch(StackString),
}
