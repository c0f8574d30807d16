//! ISO-8601 rendering shared by every serialized timestamp.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Renders `2026-10-19T08:00:00.000Z`, millisecond precision, UTC designator.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Stamped {
        #[serde(serialize_with = "serialize")]
        at: DateTime<Utc>,
    }

    #[test]
    fn renders_millisecond_utc() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2026-10-19T08:00:00.000Z"}"#);
    }
}
