//! Built-in tools
//!
//! Small sample-data tools that are enough to run both loops end to end.
//! Configuration picks which of them are registered by name.

mod calculate;
mod datetime;
mod search;
mod weather;

pub use calculate::{CALCULATE, CalculateTool, evaluate, format_number};
pub use datetime::{DatetimeTool, GET_DATETIME};
pub use search::{DEFAULT_NUM_RESULTS, WEB_SEARCH, WebSearchTool};
pub use weather::{GET_WEATHER, WeatherTool};

use std::str::FromStr;
use std::sync::Arc;
use toolloop_domain::Tool;

/// The closed set of built-in tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTool {
    Calculate,
    GetWeather,
    WebSearch,
    GetDatetime,
}

impl BuiltinTool {
    pub fn all() -> &'static [BuiltinTool] {
        &[
            BuiltinTool::Calculate,
            BuiltinTool::GetWeather,
            BuiltinTool::WebSearch,
            BuiltinTool::GetDatetime,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinTool::Calculate => CALCULATE,
            BuiltinTool::GetWeather => GET_WEATHER,
            BuiltinTool::WebSearch => WEB_SEARCH,
            BuiltinTool::GetDatetime => GET_DATETIME,
        }
    }

    pub fn instantiate(&self) -> Arc<dyn Tool> {
        match self {
            BuiltinTool::Calculate => Arc::new(CalculateTool),
            BuiltinTool::GetWeather => Arc::new(WeatherTool),
            BuiltinTool::WebSearch => Arc::new(WebSearchTool),
            BuiltinTool::GetDatetime => Arc::new(DatetimeTool::new()),
        }
    }
}

impl std::fmt::Display for BuiltinTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BuiltinTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calculate" | "calculator" => Ok(BuiltinTool::Calculate),
            "get_weather" | "weather" => Ok(BuiltinTool::GetWeather),
            "web_search" | "search" => Ok(BuiltinTool::WebSearch),
            "get_datetime" | "datetime" => Ok(BuiltinTool::GetDatetime),
            _ => Err(format!("Unknown builtin tool: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_spec() {
        for builtin in BuiltinTool::all() {
            assert_eq!(builtin.instantiate().spec().name, builtin.name());
        }
    }

    #[test]
    fn test_from_str_accepts_names_and_aliases() {
        assert_eq!("get_weather".parse::<BuiltinTool>(), Ok(BuiltinTool::GetWeather));
        assert_eq!("Calculator".parse::<BuiltinTool>(), Ok(BuiltinTool::Calculate));
        assert!("read_file".parse::<BuiltinTool>().is_err());
    }
}
