//! Stored timestamp format: RFC 3339, UTC `Z`, always three fractional digits
//! (`2024-05-10T14:30:00.000Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

pub(crate) fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
