use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Field deserializer that never fails: a value of the wrong shape is replaced by `T::default()`.
///
/// Extraction output and older catalog records are not guaranteed to match the current schema. Rather than rejecting a
/// whole product because, say, `category` holds a value the portal does not know about, the offending field is reset to
/// its default and a warning is logged. Use together with `#[serde(default)]` so that missing fields are covered too.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    let result = serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        warn!("🧹️ Replacing malformed value {value} with its default. {e}");
        T::default()
    });
    Ok(result)
}
