//! Groups a forecast series into calendar-day summaries.
//!
//! Points are bucketed by the UTC date of `init + offset`, buckets are
//! ordered by date and only the first [`FORECAST_DAYS`] are kept.
//!
//! The condition of a day is not averaged. The soonest day takes its first
//! point (closest to "now"); every later day takes the point at index
//! `len / 2`, which approximates midday when points are evenly spaced. It is
//! a heuristic only: uneven spacing or partial days shift the chosen point.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::types::{DailySummary, RawForecastPoint};

/// Maximum number of days in a forecast strip
pub const FORECAST_DAYS: usize = 7;

pub fn aggregate_daily(init: DateTime<Utc>, points: &[RawForecastPoint]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, Vec<&RawForecastPoint>> = BTreeMap::new();

    for point in points {
        let Some(at) = init.checked_add_signed(TimeDelta::hours(i64::from(point.offset_hours)))
        else {
            tracing::warn!(
                "Skipping forecast point {}h after {}: out of range",
                point.offset_hours,
                init
            );
            continue;
        };
        days.entry(at.date_naive()).or_default().push(point);
    }

    days.into_iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .filter_map(|(index, (date, group))| summarize(date, &group, index == 0))
        .collect()
}

fn summarize(date: NaiveDate, group: &[&RawForecastPoint], soonest: bool) -> Option<DailySummary> {
    let representative = if soonest {
        group.first()?
    } else {
        group.get(group.len() / 2)?
    };

    let (min_temp, max_temp) = group.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), point| (lo.min(point.temperature), hi.max(point.temperature)),
    );

    Some(DailySummary {
        date,
        min_temp,
        max_temp,
        condition: representative.condition_token().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn point(offset_hours: u32, temperature: f64, weather: &str) -> RawForecastPoint {
        RawForecastPoint {
            offset_hours,
            temperature,
            weather: Some(weather.to_string()),
            prec_type: None,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_day_series() {
        let points: Vec<_> = (0..24)
            .map(|i| point(i * 3, f64::from(i), "clearday"))
            .collect();

        let days = aggregate_daily(base(), &points);
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![ymd(2024, 6, 1), ymd(2024, 6, 2), ymd(2024, 6, 3)]);
    }

    #[test]
    fn test_offset_72_starts_a_new_day() {
        // 0, 3, ..., 72: the last point is midnight of the fourth day
        let points: Vec<_> = (0..=24)
            .map(|i| point(i * 3, f64::from(i), "clearday"))
            .collect();
        assert_eq!(points.len(), 25);

        let days = aggregate_daily(base(), &points);
        assert_eq!(days.len(), 4);
        assert_eq!(days[3].date, ymd(2024, 6, 4));
        assert_eq!((days[3].min_temp, days[3].max_temp), (24.0, 24.0));
    }

    #[test]
    fn test_empty_series() {
        assert!(aggregate_daily(base(), &[]).is_empty());
    }

    #[test]
    fn test_caps_at_seven_days() {
        let points: Vec<_> = (0..10).map(|d| point(d * 24, 5.0, "rain")).collect();
        let days = aggregate_daily(base(), &points);
        assert_eq!(days.len(), FORECAST_DAYS);
        assert_eq!(days.last().map(|d| d.date), Some(ymd(2024, 6, 7)));
    }

    #[test]
    fn test_min_max_per_day() {
        let points = vec![
            point(0, 12.0, "clear"),
            point(6, 19.5, "clear"),
            point(12, 23.0, "clear"),
            point(18, 15.0, "clear"),
            point(24, -2.0, "snow"),
            point(30, 1.5, "snow"),
        ];
        let days = aggregate_daily(base(), &points);
        assert_eq!(days.len(), 2);
        assert_eq!((days[0].min_temp, days[0].max_temp), (12.0, 23.0));
        assert_eq!((days[1].min_temp, days[1].max_temp), (-2.0, 1.5));
    }

    #[test]
    fn test_representative_point_selection() {
        let points = vec![
            // Day one: first point wins
            point(0, 10.0, "fogday"),
            point(6, 11.0, "rainday"),
            point(12, 12.0, "rainday"),
            // Day two: index 3 / 2 = 1
            point(24, 10.0, "snownight"),
            point(30, 11.0, "pcloudyday"),
            point(36, 12.0, "snowday"),
            // Day three: index 4 / 2 = 2
            point(48, 10.0, "cloudynight"),
            point(54, 10.0, "cloudyday"),
            point(60, 10.0, "windyday"),
            point(66, 10.0, "cloudynight"),
        ];
        let days = aggregate_daily(base(), &points);
        let conditions: Vec<_> = days.iter().map(|d| d.condition.as_str()).collect();
        assert_eq!(conditions, vec!["fogday", "pcloudyday", "windyday"]);
    }

    #[test]
    fn test_single_point_day() {
        let days = aggregate_daily(base(), &[point(0, 7.0, "humidday"), point(30, 9.0, "fog")]);
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].min_temp, 9.0);
        assert_eq!(days[1].max_temp, 9.0);
        assert_eq!(days[1].condition, "fog");
    }

    #[test]
    fn test_out_of_order_points_sort_by_date() {
        let points = vec![
            point(50, 3.0, "rain"),
            point(2, 1.0, "clear"),
            point(26, 2.0, "snow"),
        ];
        let days = aggregate_daily(base(), &points);
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![ymd(2024, 6, 1), ymd(2024, 6, 2), ymd(2024, 6, 3)]);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_base_hour_shifts_day_boundary() {
        let init = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();
        let points = vec![point(3, 20.0, "clear"), point(6, 18.0, "clear")];
        let days = aggregate_daily(init, &points);
        // 21:00 on the 1st and 00:00 on the 2nd
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].date, ymd(2024, 6, 2));
    }

    #[test]
    fn test_invariants_hold_for_mixed_series() {
        let points: Vec<_> = (0..64u32)
            .map(|i| point(i * 3, f64::from((i * 37) % 23) - 8.0, "mcloudyday"))
            .collect();
        let days = aggregate_daily(base(), &points);
        assert_eq!(days.len(), FORECAST_DAYS);

        for day in &days {
            let temps: Vec<f64> = points
                .iter()
                .filter(|p| {
                    (base() + TimeDelta::hours(i64::from(p.offset_hours))).date_naive() == day.date
                })
                .map(|p| p.temperature)
                .collect();
            let lo = temps.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(day.min_temp <= day.max_temp);
            assert_eq!((day.min_temp, day.max_temp), (lo, hi));
        }
    }
}
