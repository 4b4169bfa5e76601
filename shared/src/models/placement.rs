//! Placement model and shift-hours math

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dated venue shift a staff member is placed into
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    #[serde(default)]
    pub venue: String,
    /// Position worked, e.g. "Bar Staff"
    #[serde(default)]
    pub role_title: String,
    /// Shift day; the service may echo a full ISO datetime, see [`Placement::day`]
    #[serde(default)]
    pub date: String,
    /// "HH:MM"
    #[serde(default)]
    pub start_time: String,
    /// "HH:MM"
    #[serde(default)]
    pub end_time: String,
    /// Serialized as a JSON number; the service stores plain numbers
    #[serde(default, with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    /// Derived from start/end, recomputed client-side before any send
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_hours: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Placement {
    /// Calendar day of the shift. The service stores dates as datetimes
    /// and echoes "2025-03-14T00:00:00.000Z"; views and filters only
    /// ever want the "YYYY-MM-DD" prefix.
    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }

    /// Hours for this placement from its own start/end times
    pub fn recomputed_hours(&self) -> Option<Decimal> {
        worked_hours(&self.start_time, &self.end_time)
    }
}

/// Partial placement edit, sent flat as the edit-offer body. Absent
/// fields are left untouched by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub hourly_rate: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_hours: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlacementPatch {
    /// Recompute hours when the patch carries both times. Edits that
    /// touch neither time keep whatever hours they already state.
    pub fn with_recomputed_hours(mut self) -> Self {
        if let (Some(start), Some(end)) = (&self.start_time, &self.end_time)
            && let Some(hours) = worked_hours(start, end)
        {
            self.total_hours = Some(hours);
        }
        self
    }
}

/// Hours between two "HH:MM" times, rounded to 2 dp.
///
/// A shift whose end is at or before its start wraps past midnight:
/// 22:00-02:00 is 4 hours. Returns `None` when either time fails to
/// parse.
pub fn worked_hours(start: &str, end: &str) -> Option<Decimal> {
    let s = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
    let e = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
    let mut minutes = (e - s).num_minutes();
    if minutes <= 0 {
        minutes += 24 * 60;
    }
    Some((Decimal::from(minutes) / Decimal::from(60)).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_day_shift() {
        assert_eq!(worked_hours("09:00", "17:30"), Some(Decimal::new(85, 1)));
    }

    #[test]
    fn test_overnight_shift_wraps_midnight() {
        assert_eq!(worked_hours("22:00", "02:00"), Some(Decimal::from(4)));
    }

    #[test]
    fn test_equal_times_mean_full_day() {
        assert_eq!(worked_hours("08:00", "08:00"), Some(Decimal::from(24)));
    }

    #[test]
    fn test_fractional_hours_round_to_2dp() {
        // 50 minutes
        assert_eq!(worked_hours("10:00", "10:50"), Some(Decimal::new(83, 2)));
    }

    #[test]
    fn test_unparseable_times_yield_none() {
        assert_eq!(worked_hours("", "17:00"), None);
        assert_eq!(worked_hours("9am", "5pm"), None);
    }

    #[test]
    fn test_patch_recomputes_hours_only_with_both_times() {
        let patch = PlacementPatch {
            start_time: Some("18:00".into()),
            end_time: Some("01:00".into()),
            total_hours: Some(Decimal::from(99)),
            ..Default::default()
        }
        .with_recomputed_hours();
        assert_eq!(patch.total_hours, Some(Decimal::from(7)));

        let untouched = PlacementPatch {
            start_time: Some("18:00".into()),
            total_hours: Some(Decimal::from(99)),
            ..Default::default()
        }
        .with_recomputed_hours();
        assert_eq!(untouched.total_hours, Some(Decimal::from(99)));
    }

    #[test]
    fn test_money_fields_ride_the_wire_as_numbers() {
        let p = Placement {
            venue: "Royal Oak".into(),
            hourly_rate: Decimal::new(125, 1),
            total_hours: Decimal::new(55, 1),
            ..Default::default()
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"hourlyRate\":12.5"));
        assert!(json.contains("\"totalHours\":5.5"));

        let back: Placement = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hourly_rate, Decimal::new(125, 1));
    }

    #[test]
    fn test_day_strips_datetime_suffix() {
        let p = Placement {
            date: "2025-03-14T00:00:00.000Z".into(),
            ..Default::default()
        };
        assert_eq!(p.day(), "2025-03-14");
        let short = Placement {
            date: "2025-03".into(),
            ..Default::default()
        };
        assert_eq!(short.day(), "2025-03");
    }
}
