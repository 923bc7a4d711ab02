//! get_weather: sample weather lookup

use async_trait::async_trait;
use serde_json::json;
use toolloop_domain::{Tool, ToolArguments, ToolError, ToolParameter, ToolSpec};

pub const GET_WEATHER: &str = "get_weather";

struct CityWeather {
    city: &'static str,
    celsius: i32,
    condition: &'static str,
    humidity: u8,
    wind: &'static str,
}

const SAMPLE_DATA: &[CityWeather] = &[
    CityWeather {
        city: "Beijing",
        celsius: 25,
        condition: "Sunny",
        humidity: 45,
        wind: "NE 3",
    },
    CityWeather {
        city: "Shanghai",
        celsius: 28,
        condition: "Cloudy",
        humidity: 65,
        wind: "E 2",
    },
    CityWeather {
        city: "Guangzhou",
        celsius: 32,
        condition: "Thunderstorms",
        humidity: 80,
        wind: "S 4",
    },
    CityWeather {
        city: "Shenzhen",
        celsius: 30,
        condition: "Partly cloudy",
        humidity: 70,
        wind: "SE 3",
    },
    CityWeather {
        city: "Hangzhou",
        celsius: 27,
        condition: "Overcast",
        humidity: 60,
        wind: "NW 2",
    },
    CityWeather {
        city: "Chengdu",
        celsius: 22,
        condition: "Light rain",
        humidity: 75,
        wind: "Calm",
    },
    CityWeather {
        city: "Paris",
        celsius: 18,
        condition: "Sunny",
        humidity: 55,
        wind: "W 2",
    },
    CityWeather {
        city: "Tokyo",
        celsius: 21,
        condition: "Cloudy",
        humidity: 68,
        wind: "S 2",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    fn convert(self, celsius: i32) -> i32 {
        match self {
            Unit::Celsius => celsius,
            Unit::Fahrenheit => (celsius as f64 * 9.0 / 5.0 + 32.0) as i32,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }
}

/// The `get_weather` tool, backed by a fixed sample table.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherTool;

impl WeatherTool {
    fn lookup(city: &str) -> Option<&'static CityWeather> {
        SAMPLE_DATA
            .iter()
            .find(|entry| entry.city.eq_ignore_ascii_case(city))
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            GET_WEATHER,
            "Get the current weather of a city: temperature, condition, humidity and wind. Input: the city name.",
        )
        .with_parameter(ToolParameter::new("city", "City name, e.g. Paris", true))
        .with_parameter(
            ToolParameter::new("unit", "Temperature unit", false)
                .with_allowed_values(["celsius", "fahrenheit"]),
        )
    }

    async fn execute(&self, args: &ToolArguments) -> Result<String, ToolError> {
        let city = args
            .require_primary("city")
            .map_err(ToolError::invalid_argument)?
            .trim_matches(|c| c == '"' || c == '\'');

        let unit = match args.get_string("unit") {
            None | Some("celsius") => Unit::Celsius,
            Some("fahrenheit") => Unit::Fahrenheit,
            Some(other) => {
                return Err(ToolError::invalid_argument(format!(
                    "Unknown unit '{}', expected celsius or fahrenheit",
                    other
                )));
            }
        };

        let data = Self::lookup(city).ok_or_else(|| {
            ToolError::not_found(format!("No weather information for city '{}'", city))
        })?;
        let temperature = format!("{}{}", unit.convert(data.celsius), unit.symbol());

        if args.is_text() {
            return Ok(format!(
                "{}: {}, {}, humidity {}%, wind {}",
                data.city, data.condition, temperature, data.humidity, data.wind
            ));
        }

        Ok(json!({
            "city": data.city,
            "temperature": temperature,
            "condition": data.condition,
            "humidity": format!("{}%", data.humidity),
            "wind": data.wind,
        })
        .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_text_lookup_is_case_insensitive() {
        let out = WeatherTool
            .execute(&ToolArguments::text("paris"))
            .await
            .unwrap();
        assert_eq!(out, "Paris: Sunny, 18°C, humidity 55%, wind W 2");
    }

    #[tokio::test]
    async fn test_structured_fahrenheit() {
        let args = ToolArguments::Structured(json!({"city": "Beijing", "unit": "fahrenheit"}));
        let out = WeatherTool.execute(&args).await.unwrap();

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["city"], "Beijing");
        assert_eq!(value["temperature"], "77°F");
        assert_eq!(value["humidity"], "45%");
    }

    #[tokio::test]
    async fn test_unknown_city_names_the_city() {
        let err = WeatherTool
            .execute(&ToolArguments::text("Atlantis"))
            .await
            .unwrap_err();
        assert_eq!(err.code, "NOT_FOUND");
        assert!(err.message.contains("Atlantis"));
    }

    #[tokio::test]
    async fn test_missing_city() {
        let args = ToolArguments::Structured(json!({"unit": "celsius"}));
        let err = WeatherTool.execute(&args).await.unwrap_err();
        assert_eq!(err.message, "Missing required parameter: city");
    }
}
