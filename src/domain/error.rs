/// Errors raised by component detection and application devfile updates.
///
/// An absent optional attribute is never an error; attribute reads surface it as
/// `Ok(None)` instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DetectionError {
    #[error("attribute {key} is malformed: {reason}")]
    MalformedValue { key: String, reason: String },

    #[error("unable to parse devfile: {0}")]
    Devfile(String),

    #[error("unable to parse devfile")]
    DevfileSyntax(#[source] DevfileSyntaxError),

    #[error("application already has a component with name {0}")]
    DuplicateName(String),

    #[error("component source is nil")]
    InvalidSource,

    #[error("{0} is nil")]
    NilInput(&'static str),

    #[error("{0}")]
    Rejected(String),
}

/// YAML syntax or shape error raised while reading a devfile.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DevfileSyntaxError(#[source] pub serde_yaml::Error);

impl PartialEq for DevfileSyntaxError {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_string() == other.0.to_string()
    }
}

impl Eq for DevfileSyntaxError {}

impl From<serde_yaml::Error> for DetectionError {
    fn from(e: serde_yaml::Error) -> Self {
        DetectionError::DevfileSyntax(DevfileSyntaxError(e))
    }
}

impl DetectionError {
    pub(crate) fn malformed(key: &str, reason: impl ToString) -> Self {
        DetectionError::MalformedValue {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
