//! Result and tool listing formatters

pub mod console;
