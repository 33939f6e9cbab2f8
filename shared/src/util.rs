/// Date-time format used by the backend's JSON mapper
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde adapter for optional `yyyy-MM-dd HH:mm:ss` timestamps.
///
/// Use with `#[serde(default, with = "crate::util::opt_datetime")]`.
pub mod opt_datetime {
    use super::DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(DATETIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
