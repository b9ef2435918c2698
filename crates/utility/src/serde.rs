pub mod date_time {
    use chrono::{DateTime, NaiveDateTime, ParseError, Utc};

    /// Parses RFC 3339 timestamps. Timestamps without offset, as some
    /// backends emit them, are taken to be UTC.
    pub fn parse_utc(s: &str) -> Result<DateTime<Utc>, ParseError> {
        match DateTime::parse_from_rfc3339(s) {
            Ok(date_time) => Ok(date_time.with_timezone(&Utc)),
            Err(_) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc()),
        }
    }
}

/// Serializes a `chrono::Duration` as `hh:mm:ss`.
pub mod duration {
    use chrono::Duration;
    use schemars::gen::SchemaGenerator;
    use schemars::schema::{InstanceType, Schema, SchemaObject};
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(duration: &Duration) -> String {
        let total_seconds = duration.num_seconds();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parts: Vec<&str> = s.split(':').collect();

        if parts.len() != 3 {
            return Err(D::Error::invalid_length(
                parts.len(),
                &"Expected format hh:mm:ss",
            ));
        }

        let hours: i64 = parts[0].parse().map_err(D::Error::custom)?;
        let minutes: i64 = parts[1].parse().map_err(D::Error::custom)?;
        let seconds: i64 = parts[2].parse().map_err(D::Error::custom)?;

        Ok(Duration::hours(hours)
            + Duration::minutes(minutes)
            + Duration::seconds(seconds))
    }

    pub fn schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            format: Some("hh:mm:ss".to_owned()),
            ..Default::default()
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    use super::{date_time, duration};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Cooldown {
        #[serde(with = "duration")]
        remaining: Duration,
    }

    #[test]
    fn duration_as_hh_mm_ss() {
        let value = Cooldown {
            remaining: Duration::hours(3) + Duration::seconds(5),
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"remaining":"03:00:05"}"#);
        assert_eq!(serde_json::from_str::<Cooldown>(&json).unwrap(), value);
    }

    #[test]
    fn rejects_malformed_duration() {
        assert!(serde_json::from_str::<Cooldown>(r#"{"remaining":"03:00"}"#).is_err());
        assert!(serde_json::from_str::<Cooldown>(r#"{"remaining":"a:b:c"}"#).is_err());
    }

    #[test]
    fn parses_timestamps() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(date_time::parse_utc("2024-05-01T12:30:00.000Z").unwrap(), expected);
        assert_eq!(date_time::parse_utc("2024-05-01T14:30:00+02:00").unwrap(), expected);
        assert_eq!(date_time::parse_utc("2024-05-01T12:30:00").unwrap(), expected);
        assert!(date_time::parse_utc("yesterday").is_err());
    }
}
