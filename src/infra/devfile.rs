use crate::domain::{devfile::DevfileData, error::DetectionError, port::DevfileParser};

/// Parses devfile documents written in YAML (or JSON, being a YAML subset).
pub struct YamlDevfileParser;

impl DevfileParser for YamlDevfileParser {
    fn parse(&self, content: &[u8]) -> Result<DevfileData, DetectionError> {
        let devfile: DevfileData = serde_yaml::from_slice(content)?;
        if devfile.schema_version.is_empty() {
            return Err(DetectionError::Devfile("schemaVersion not present in devfile".to_string()));
        }
        if !devfile.schema_version.starts_with("2.") {
            return Err(DetectionError::Devfile(format!(
                "unsupported schemaVersion {}",
                devfile.schema_version
            )));
        }
        Ok(devfile)
    }
}
