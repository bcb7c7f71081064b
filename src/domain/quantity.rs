use std::sync::LazyLock;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use regex::Regex;

use super::error::DetectionError;

// <signedNumber><suffix>, suffix being binary SI, decimal SI or a decimal exponent.
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[KMGTPE]i|[mkMGTPE]|[eE][+-]?[0-9]+)?$")
        .expect("quantity pattern is valid")
});

/// Parses a Kubernetes resource quantity such as `500m`, `2` or `1Gi`.
pub fn parse_quantity(key: &str, value: &str) -> Result<Quantity, DetectionError> {
    if QUANTITY.is_match(value) {
        Ok(Quantity(value.to_string()))
    } else {
        Err(DetectionError::malformed(
            key,
            format!("quantities must match the regular expression '{}', got {value:?}", QUANTITY.as_str()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_kubernetes_quantities() {
        for value in ["2", "500m", "1Gi", "0.5", ".5", "+1", "-1k", "1e3", "1E-2", "128Mi", "1E"] {
            assert_eq!(
                parse_quantity("cpu", value),
                Ok(Quantity(value.to_string())),
                "{value} should parse"
            );
        }
    }

    #[test]
    fn rejects_malformed_quantities() {
        for value in ["", "abc", "1GB", "1 Gi", "Gi", "1.2.3", "1e", "1Ki2"] {
            assert!(
                matches!(
                    parse_quantity("deployment/cpuLimit", value),
                    Err(DetectionError::MalformedValue { ref key, .. }) if key == "deployment/cpuLimit"
                ),
                "{value} should be rejected"
            );
        }
    }
}
