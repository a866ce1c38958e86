use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod categories;

/// HTML forms submit empty strings for blank inputs; map those to `None`
/// instead of failing integer parsing.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
