//! OpenWeatherMap payload normalization.
//!
//! Upstream temperatures are Kelvin. Dates are rendered in local time as
//! `"<abbreviated weekday> <full month> <day> <year>"`.

use std::collections::HashSet;

use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{GatewayError, Result};
use crate::models::{WeatherPoint, WeatherResult};

/// Forecast entries considered, about three to four days of 3-hourly data
pub const FORECAST_ENTRY_LIMIT: usize = 10;

const DATE_FORMAT: &str = "%a %B %d %Y";

/// A reading: the primary condition plus the main block.
#[derive(Debug, Deserialize)]
struct Reading {
    weather: Vec<Condition>,
    main: MainBlock,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    /// Kelvin
    temp: f64,
}

impl Reading {
    fn into_point(self, date: String) -> Result<WeatherPoint> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::MalformedResponse("empty weather list".to_string()))?;

        Ok(WeatherPoint {
            date,
            condition: condition.main,
            temperature_celsius: kelvin_to_celsius(self.main.temp),
            description: condition.description,
        })
    }
}

// == Conversions ==
/// Converts Kelvin to Celsius, rounded to 2 decimal places.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    ((kelvin - 273.15) * 100.0).round() / 100.0
}

pub fn format_date<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    moment.format(DATE_FORMAT).to_string()
}

/// Local calendar date of a Unix timestamp.
fn local_date(timestamp: i64) -> Result<String> {
    Local
        .timestamp_opt(timestamp, 0)
        .earliest()
        .map(|moment| format_date(&moment))
        .ok_or_else(|| GatewayError::MalformedResponse(format!("invalid timestamp {}", timestamp)))
}

fn parse_reading(value: &Value) -> Result<Reading> {
    Reading::deserialize(value).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

// == Current ==
/// Normalizes a current-weather body into a single-point result dated now.
pub fn parse_current(body: &Value, location: &str) -> Result<WeatherResult> {
    parse_current_at(body, location, &Local::now())
}

/// As [`parse_current`] with an explicit "now".
pub fn parse_current_at<Tz: TimeZone>(
    body: &Value,
    location: &str,
    now: &DateTime<Tz>,
) -> Result<WeatherResult>
where
    Tz::Offset: std::fmt::Display,
{
    let point = parse_reading(body)?.into_point(format_date(now))?;
    Ok(WeatherResult::new(location, vec![point]))
}

// == Forecast ==
/// Normalizes a forecast body into at most one point per calendar day.
///
/// Only the first [`FORECAST_ENTRY_LIMIT`] entries are inspected. The first
/// entry seen for a date wins and dates keep encounter order.
pub fn parse_forecast(body: &Value, location: &str) -> Result<WeatherResult> {
    let entries = body
        .get("list")
        .and_then(Value::as_array)
        .ok_or_else(|| GatewayError::MalformedResponse("missing forecast list".to_string()))?;

    let mut seen = HashSet::new();
    let mut points = Vec::new();

    for entry in entries.iter().take(FORECAST_ENTRY_LIMIT) {
        let timestamp = entry.get("dt").and_then(Value::as_i64).ok_or_else(|| {
            GatewayError::MalformedResponse("forecast entry without dt".to_string())
        })?;
        let date = local_date(timestamp)?;

        if seen.insert(date.clone()) {
            points.push(parse_reading(entry)?.into_point(date)?);
        }
    }

    Ok(WeatherResult::new(location, points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use serde_json::json;

    fn entry(moment: DateTime<Local>, main: &str, kelvin: f64) -> Value {
        json!({
            "dt": moment.timestamp(),
            "weather": [{"main": main, "description": format!("{} desc", main)}],
            "main": {"temp": kelvin}
        })
    }

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).earliest().unwrap()
    }

    #[test]
    fn test_kelvin_to_celsius() {
        assert_eq!(kelvin_to_celsius(295.15), 22.0);
        assert_eq!(kelvin_to_celsius(273.15), 0.0);
        assert_eq!(kelvin_to_celsius(290.157), 17.01);
        assert_eq!(kelvin_to_celsius(0.0), -273.15);
    }

    #[test]
    fn test_parse_current() {
        let body = json!({
            "weather": [{"main": "Clear", "description": "clear sky"}],
            "main": {"temp": 295.15},
            "name": "London"
        });
        let now = local(2022, 1, 1, 12);

        let result = parse_current_at(&body, "London", &now).unwrap();

        assert_eq!(result.count, 1);
        assert_eq!(result.unit, "metric");
        assert_eq!(result.location, "London");
        assert_eq!(result.data[0].date, "Sat January 01 2022");
        assert_eq!(result.data[0].condition, "Clear");
        assert_eq!(result.data[0].temperature_celsius, 22.0);
        assert_eq!(result.data[0].description.as_deref(), Some("clear sky"));
    }

    #[test]
    fn test_parse_current_missing_fields_is_malformed() {
        let no_weather = json!({"main": {"temp": 280.0}});
        let empty_weather = json!({"weather": [], "main": {"temp": 280.0}});
        let no_temp = json!({"weather": [{"main": "Rain"}], "main": {}});

        for body in [no_weather, empty_weather, no_temp] {
            let err = parse_current(&body, "Paris").unwrap_err();
            assert!(matches!(err, GatewayError::MalformedResponse(_)));
        }
    }

    #[test]
    fn test_forecast_groups_by_date_first_wins() {
        // 10 entries over 4 local calendar days
        let list = vec![
            entry(local(2024, 1, 10, 9), "Rain", 280.15),
            entry(local(2024, 1, 10, 12), "Clear", 281.15),
            entry(local(2024, 1, 10, 15), "Clear", 282.15),
            entry(local(2024, 1, 11, 0), "Snow", 270.15),
            entry(local(2024, 1, 11, 3), "Clear", 271.15),
            entry(local(2024, 1, 11, 6), "Clear", 272.15),
            entry(local(2024, 1, 12, 9), "Clouds", 275.15),
            entry(local(2024, 1, 12, 12), "Clear", 276.15),
            entry(local(2024, 1, 13, 9), "Mist", 277.15),
            entry(local(2024, 1, 13, 12), "Clear", 278.15),
        ];

        let result = parse_forecast(&json!({"list": list}), "Oslo").unwrap();

        assert_eq!(result.count, 4);
        let conditions: Vec<&str> = result.data.iter().map(|p| p.condition.as_str()).collect();
        assert_eq!(conditions, vec!["Rain", "Snow", "Clouds", "Mist"]);
        assert_eq!(result.data[0].date, "Wed January 10 2024");
        assert_eq!(result.data[0].temperature_celsius, 7.0);
        assert_eq!(result.data[3].date, "Sat January 13 2024");
    }

    #[test]
    fn test_forecast_only_reads_first_ten_entries() {
        let start = local(2024, 6, 1, 0);
        let mut list: Vec<Value> = (0..10)
            .map(|i| entry(start + Duration::hours(3 * i), "Clear", 293.15))
            .collect();
        // Entry 11 is on a new day and malformed; it must be ignored
        list.push(json!({"dt": (start + Duration::days(3)).timestamp()}));

        let result = parse_forecast(&json!({"list": list}), "Rome").unwrap();

        // 30 hours from local midnight spans two dates
        assert_eq!(result.count, 2);
        assert_eq!(result.data.len(), 2);
    }

    #[test]
    fn test_forecast_missing_list_is_malformed() {
        let err = parse_forecast(&json!({"cod": "200"}), "Rome").unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn test_forecast_empty_list() {
        let result = parse_forecast(&json!({"list": []}), "Rome").unwrap();
        assert_eq!(result.count, 0);
        assert_eq!(result.unit, "metric");
    }

    proptest! {
        #[test]
        fn prop_celsius_has_two_decimals(kelvin in 0.0f64..400.0) {
            let celsius = kelvin_to_celsius(kelvin);
            prop_assert!((celsius - (kelvin - 273.15)).abs() <= 0.005 + 1e-9);
            prop_assert!(((celsius * 100.0).round() - celsius * 100.0).abs() < 1e-6);
        }

        #[test]
        fn prop_forecast_has_one_point_per_date(
            offsets in prop::collection::vec(0i64..(5 * 24), 0..15)
        ) {
            let start = local(2024, 3, 1, 0);
            let list: Vec<Value> = offsets
                .iter()
                .map(|h| entry(start + Duration::hours(*h), "Clear", 290.0))
                .collect();

            let result = parse_forecast(&json!({"list": list}), "X").unwrap();

            let dates: HashSet<&str> = result.data.iter().map(|p| p.date.as_str()).collect();
            prop_assert_eq!(dates.len(), result.data.len());
            prop_assert_eq!(result.count, result.data.len());
            prop_assert!(result.count <= FORECAST_ENTRY_LIMIT);
        }
    }
}
