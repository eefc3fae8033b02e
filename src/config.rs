use crate::runtime::error::{self, ScriptError};
use std::env::var;

/// Environment variable holding the number of squares along the table's x axis.
pub const TABLE_WIDTH_VAR: &str = "TOYROBOT_TABLE_WIDTH";

/// Environment variable holding the number of squares along the table's y axis.
pub const TABLE_HEIGHT_VAR: &str = "TOYROBOT_TABLE_HEIGHT";

const DEFAULT_TABLE_SIZE: i64 = 5;

/// Settings for the robot's world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub table_width: i64,
    pub table_height: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config { table_width: DEFAULT_TABLE_SIZE, table_height: DEFAULT_TABLE_SIZE }
    }
}

impl Config {
    /// Read the configuration from the environment, using the defaults for anything not set.
    pub fn from_env() -> error::Result<Config> {
        Config::from_lookup(|name| var(name).ok())
    }

    /// Build the configuration from any name to value lookup.
    pub fn from_lookup<F>(lookup: F) -> error::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            table_width: table_dimension(
                TABLE_WIDTH_VAR,
                lookup(TABLE_WIDTH_VAR),
                defaults.table_width,
            )?,
            table_height: table_dimension(
                TABLE_HEIGHT_VAR,
                lookup(TABLE_HEIGHT_VAR),
                defaults.table_height,
            )?,
        })
    }
}

/// A table dimension must be a positive whole number.
fn table_dimension(name: &str, value: Option<String>, default: i64) -> error::Result<i64> {
    let Some(text) = value else {
        return Ok(default);
    };

    match text.trim().parse::<i64>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ScriptError::Config(format!(
            "{} must be a positive integer, found '{}'",
            name, text
        ))),
    }
}
