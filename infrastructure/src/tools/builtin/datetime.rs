//! get_datetime: current date and date arithmetic

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use serde_json::json;
use toolloop_domain::{Tool, ToolArguments, ToolError, ToolParameter, ToolSpec};

pub const GET_DATETIME: &str = "get_datetime";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The `get_datetime` tool.
///
/// Text input is `now`, `add_days <date> <days>` or `diff_days <date>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatetimeTool {
    fixed_now: Option<NaiveDateTime>,
}

impl DatetimeTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tool whose clock is frozen at `now`.
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            fixed_now: Some(now),
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.fixed_now.unwrap_or_else(|| Local::now().naive_local())
    }
}

struct Request<'a> {
    operation: &'a str,
    date: Option<&'a str>,
    days: Option<i64>,
}

impl<'a> Request<'a> {
    fn from_args(args: &'a ToolArguments) -> Result<Self, ToolError> {
        match args {
            ToolArguments::Text(text) => {
                let mut parts = text.split_whitespace();
                let operation = parts.next().unwrap_or("now");
                let date = parts.next();
                let days = parts
                    .next()
                    .map(|d| {
                        d.parse::<i64>().map_err(|_| {
                            ToolError::invalid_argument(format!("days must be an integer, got '{}'", d))
                        })
                    })
                    .transpose()?;
                Ok(Self {
                    operation,
                    date,
                    days,
                })
            }
            ToolArguments::Structured(_) => Ok(Self {
                operation: args.get_string("operation").unwrap_or("now"),
                date: args.get_string("date"),
                days: args.get_i64("days"),
            }),
        }
    }

    fn date(&self) -> Result<NaiveDate, ToolError> {
        let raw = self.date.ok_or_else(|| {
            ToolError::invalid_argument(format!("'{}' needs a date (yyyy-MM-dd)", self.operation))
        })?;
        NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
            ToolError::invalid_argument(format!("Invalid date '{}', expected yyyy-MM-dd", raw))
        })
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[async_trait]
impl Tool for DatetimeTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            GET_DATETIME,
            "Get the current date and time, add days to a date, or count days until a date.",
        )
        .with_parameter(
            ToolParameter::new("operation", "now, add_days or diff_days", true)
                .with_allowed_values(["now", "add_days", "diff_days"]),
        )
        .with_parameter(ToolParameter::new("date", "Date in yyyy-MM-dd format", false))
        .with_parameter(
            ToolParameter::new("days", "Days to add (add_days)", false).with_type("integer"),
        )
    }

    async fn execute(&self, args: &ToolArguments) -> Result<String, ToolError> {
        let request = Request::from_args(args)?;
        let now = self.now();

        let result = match request.operation {
            "now" => json!({
                "datetime": now.format(DATETIME_FORMAT).to_string(),
                "weekday": weekday_name(now.weekday()),
                "timestamp": now.and_utc().timestamp_millis(),
            }),
            "add_days" => {
                let date = request.date()?;
                let days = request.days.unwrap_or(0);
                let shifted = TimeDelta::try_days(days)
                    .and_then(|delta| date.checked_add_signed(delta))
                    .ok_or_else(|| {
                        ToolError::invalid_argument(format!("Cannot add {} days to {}", days, date))
                    })?;
                json!({
                    "original": date.format(DATE_FORMAT).to_string(),
                    "days_added": days,
                    "result": shifted.format(DATE_FORMAT).to_string(),
                    "weekday": weekday_name(shifted.weekday()),
                })
            }
            "diff_days" => {
                let date = request.date()?;
                let today = now.date();
                json!({
                    "from": today.format(DATE_FORMAT).to_string(),
                    "to": date.format(DATE_FORMAT).to_string(),
                    "days_difference": (date - today).num_days(),
                })
            }
            other => {
                return Err(ToolError::invalid_argument(format!(
                    "Unknown operation '{}', expected now, add_days or diff_days",
                    other
                )));
            }
        };

        Ok(result.to_string())
    }
}
