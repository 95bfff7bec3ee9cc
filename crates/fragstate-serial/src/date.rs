//! Date and time-window serializers (epoch milliseconds).

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SerialError, SerialResult};
use crate::traits::Serializer;

/// Parse decimal epoch milliseconds into a UTC timestamp.
///
/// Accepts exactly what the serializers emit: an optional `-` followed by
/// ASCII digits. Whitespace and a leading `+` are rejected.
fn parse_millis(kind: &'static str, input: &str, part: &str) -> SerialResult<DateTime<Utc>> {
    let digits = part.strip_prefix('-').unwrap_or(part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SerialError::Malformed {
            kind,
            input: input.to_string(),
            reason: format!("{part:?} is not decimal milliseconds"),
        });
    }
    let millis: i64 = part.parse().map_err(|e| SerialError::Malformed {
        kind,
        input: input.to_string(),
        reason: format!("{e}"),
    })?;
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| SerialError::Malformed {
            kind,
            input: input.to_string(),
            reason: format!("{millis} ms is out of range"),
        })
}

/// Stores a `DateTime<Utc>` as decimal milliseconds since the UNIX epoch.
///
/// Precision is whole milliseconds; anything finer is truncated.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateSerializer;

impl Serializer for DateSerializer {
    type Value = DateTime<Utc>;

    fn serialize(&self, value: &DateTime<Utc>) -> SerialResult<String> {
        Ok(value.timestamp_millis().to_string())
    }

    fn deserialize(&self, raw: &str) -> SerialResult<Option<DateTime<Utc>>> {
        parse_millis("date", raw, raw).map(Some)
    }
}

/// A span of time between two instants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window from its endpoints.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Stores a [`TimeWindow`] as `{startMillis}-{endMillis}`.
///
/// Instants before the epoch would put a second `-` in the output, so they
/// are rejected on serialize and cannot be read back either. This rejection
/// is provisional: a separator that cannot appear in a number would let
/// pre-epoch windows through, at the cost of changing the stored format.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeWindowSerializer;

impl Serializer for TimeWindowSerializer {
    type Value = TimeWindow;

    fn serialize(&self, value: &TimeWindow) -> SerialResult<String> {
        let start = value.start.timestamp_millis();
        let end = value.end.timestamp_millis();
        if start < 0 || end < 0 {
            return Err(SerialError::Unrepresentable {
                kind: "time window",
                reason: format!("endpoints before the epoch ({start}, {end})"),
            });
        }
        Ok(format!("{start}-{end}"))
    }

    fn deserialize(&self, raw: &str) -> SerialResult<Option<TimeWindow>> {
        let parts: Vec<&str> = raw.split('-').collect();
        let [start, end] = parts.as_slice() else {
            return Err(SerialError::Malformed {
                kind: "time window",
                input: raw.to_string(),
                reason: format!("expected 2 components, found {}", parts.len()),
            });
        };
        Ok(Some(TimeWindow::new(
            parse_millis("time window", raw, start)?,
            parse_millis("time window", raw, end)?,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOV_27_2017_IN_MILLIS: &str = "1511740800000";

    fn nov_27_2017() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2017, 11, 27, 0, 0, 0).unwrap()
    }

    #[test]
    fn serializes_a_date_into_millis() {
        assert_eq!(
            DateSerializer.serialize(&nov_27_2017()).unwrap(),
            NOV_27_2017_IN_MILLIS
        );
    }

    #[test]
    fn deserializes_millis_into_a_date() {
        assert_eq!(
            DateSerializer.deserialize(NOV_27_2017_IN_MILLIS).unwrap(),
            Some(nov_27_2017())
        );
    }

    #[test]
    fn date_is_identity_on_its_own_output() {
        let date = Utc.timestamp_millis_opt(1_700_000_123_456).unwrap();
        let raw = DateSerializer.serialize(&date).unwrap();
        assert_eq!(DateSerializer.deserialize(&raw).unwrap(), Some(date));
    }

    #[test]
    fn date_truncates_sub_millisecond_precision() {
        let date = nov_27_2017() + chrono::Duration::microseconds(1_500);
        let raw = DateSerializer.serialize(&date).unwrap();
        assert_eq!(raw, "1511740800001");
    }

    #[test]
    fn date_rejects_non_numeric() {
        let err = DateSerializer.deserialize("yesterday").unwrap_err();
        assert!(matches!(err, SerialError::Malformed { .. }), "got: {err}");
    }

    #[test]
    fn window_round_trip() {
        let window = TimeWindow::new(nov_27_2017(), nov_27_2017() + chrono::Duration::hours(1));
        let raw = TimeWindowSerializer.serialize(&window).unwrap();
        assert_eq!(raw, "1511740800000-1511744400000");
        assert_eq!(TimeWindowSerializer.deserialize(&raw).unwrap(), Some(window));
    }

    #[test]
    fn window_rejects_pre_epoch_endpoints() {
        let window = TimeWindow::new(
            Utc.timestamp_millis_opt(-1000).unwrap(),
            nov_27_2017(),
        );
        let err = TimeWindowSerializer.serialize(&window).unwrap_err();
        assert!(matches!(err, SerialError::Unrepresentable { .. }), "got: {err}");
    }

    #[test]
    fn window_rejects_wrong_component_count() {
        assert!(TimeWindowSerializer.deserialize("1511740800000").is_err());
        assert!(TimeWindowSerializer.deserialize("-1000-5").is_err());
        assert!(TimeWindowSerializer.deserialize("1-2-3").is_err());
    }

    #[test]
    fn date_rejects_input_it_would_never_emit() {
        for raw in [" 123", "123 ", "+123", "", "-", "12a"] {
            let err = DateSerializer.deserialize(raw).unwrap_err();
            assert!(matches!(err, SerialError::Malformed { .. }), "{raw:?}: {err}");
        }
    }

    #[test]
    fn date_accepts_pre_epoch_millis() {
        let date = DateSerializer.deserialize("-1000").unwrap().unwrap();
        assert_eq!(date.timestamp_millis(), -1000);
    }

    #[test]
    fn window_rejects_padded_components() {
        assert!(TimeWindowSerializer.deserialize("1000- 2000").is_err());
        assert!(TimeWindowSerializer.deserialize("+1000-2000").is_err());
    }
}
