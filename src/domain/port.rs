use super::{devfile::DevfileData, error::DetectionError};

pub trait DevfileParser {
    fn parse(&self, content: &[u8]) -> Result<DevfileData, DetectionError>;
}
