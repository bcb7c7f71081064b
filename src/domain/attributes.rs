use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::error::DetectionError;

/// Free-form attribute namespace attached to a devfile or to one of its components.
///
/// Every read distinguishes three outcomes: `Ok(None)` when the key is absent,
/// `Ok(Some(_))` when it holds a value of the requested shape and
/// `Err(DetectionError::MalformedValue)` when it holds anything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>, DetectionError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(DetectionError::malformed(
                key,
                format!("expected a string, found {other}"),
            )),
        }
    }

    pub fn get_number(&self, key: &str) -> Result<Option<f64>, DetectionError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(number)) => number
                .as_f64()
                .map(Some)
                .ok_or_else(|| DetectionError::malformed(key, "number out of range")),
            Some(other) => Err(DetectionError::malformed(
                key,
                format!("expected a number, found {other}"),
            )),
        }
    }

    /// Reads a number that must be integral and fit an `i32`.
    pub fn get_integer(&self, key: &str) -> Result<Option<i32>, DetectionError> {
        match self.get_number(key)? {
            None => Ok(None),
            Some(number)
                if number.fract() == 0.0
                    && number >= f64::from(i32::MIN)
                    && number <= f64::from(i32::MAX) =>
            {
                Ok(Some(number as i32))
            }
            Some(number) => Err(DetectionError::malformed(
                key,
                format!("{number} is not a valid integer"),
            )),
        }
    }

    pub fn get_into<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DetectionError> {
        self.get(key)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| DetectionError::malformed(key, e))
            })
            .transpose()
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Attributes(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use map_macro::btree_map;
    use serde_json::json;

    use super::*;

    fn fixture() -> Attributes {
        Attributes::from_iter(btree_map! {
            "route" => json!("my-route"),
            "port" => json!(8080),
            "ratio" => json!(1.5),
            "null" => Value::Null,
            "env" => json!([{"name": "A", "value": "1"}]),
        })
    }

    #[test]
    fn absent_key_is_not_an_error() {
        let attributes = fixture();
        assert_eq!(attributes.get_string("missing"), Ok(None));
        assert_eq!(attributes.get_number("missing"), Ok(None));
        assert_eq!(attributes.get_into::<Vec<String>>("missing"), Ok(None));
    }

    #[test]
    fn null_value_reads_as_absent() {
        assert_eq!(fixture().get_string("null"), Ok(None));
    }

    #[test]
    fn string_read_rejects_other_shapes() {
        let attributes = fixture();
        assert_eq!(
            attributes.get_string("route"),
            Ok(Some("my-route".to_string()))
        );
        assert!(matches!(
            attributes.get_string("port"),
            Err(DetectionError::MalformedValue { key, .. }) if key == "port"
        ));
    }

    #[test]
    fn integer_read_rejects_fractions_and_strings() {
        let attributes = fixture();
        assert_eq!(attributes.get_integer("port"), Ok(Some(8080)));
        assert!(attributes.get_integer("ratio").is_err());
        assert!(attributes.get_integer("route").is_err());
    }

    #[test]
    fn structured_read_deserializes_value() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Pair {
            name: String,
            value: String,
        }
        let env: Option<Vec<Pair>> = fixture().get_into("env").unwrap();
        assert_eq!(
            env,
            Some(vec![Pair {
                name: "A".into(),
                value: "1".into()
            }])
        );
        assert!(fixture().get_into::<Vec<Pair>>("route").is_err());
    }

    #[test]
    fn put_string_overwrites() {
        let mut attributes = fixture();
        attributes.put_string("route", "other");
        assert_eq!(attributes.get_string("route"), Ok(Some("other".into())));
    }
}
