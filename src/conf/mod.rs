//! Provides application configuration options.
//!
//! Configuration options can be parsed from config files in TOML format and
//! overridden with `LECTERN_*` environment variables.

pub mod api;

use std::{collections::HashMap, env};

use config::{
    Config, ConfigError, Environment, File, FileFormat, Source, Value,
};
use serde::{Deserialize, Serialize};

pub use self::api::Api;

/// CLI argument that provides a path to the configuration file.
static APP_CONF_PATH_CMD_ARG_NAME: &str = "--conf";
/// Environment variable that provides a path to the configuration file.
static APP_CONF_PATH_ENV_VAR_NAME: &str = "LECTERN_CONF";

/// All configuration settings of the application.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Conf {
    /// Catalog API client settings.
    pub api: Api,
}

impl Source for Conf {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<HashMap<String, Value>, ConfigError> {
        let serialized = toml::to_string(self)
            .map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        File::from_str(serialized.as_str(), FileFormat::Toml).collect()
    }
}

impl Conf {
    /// Creates a new [`Conf`] and applies values from the following sources,
    /// in that order:
    /// - default values;
    /// - configuration file, the name of which is given as a command line
    ///   parameter or an environment variable;
    /// - environment variables.
    ///
    /// # Errors
    ///
    /// Errors if a configuration file cannot be read or some provided value
    /// cannot be deserialized into its settings type.
    pub fn parse() -> Result<Self, ConfigError> {
        let mut cfg = Config::new();

        cfg.merge(Self::default())?;

        if let Some(path) = get_conf_file_name(
            env::var(APP_CONF_PATH_ENV_VAR_NAME),
            env::args(),
        ) {
            cfg.merge(File::with_name(&path))?;
        }

        cfg.merge(Environment::with_prefix("LECTERN").separator("__"))?;

        cfg.try_into()
    }
}

/// Returns the name of the configuration file, if it's defined.
fn get_conf_file_name<T>(
    env_var: Result<String, env::VarError>,
    cmd_args: T,
) -> Option<String>
where
    T: Iterator<Item = String>,
{
    if let Ok(path) = env_var {
        Some(path)
    } else {
        let mut args = cmd_args.skip_while(|a| a != APP_CONF_PATH_CMD_ARG_NAME);
        if args.next().is_some() {
            args.next()
        } else {
            None
        }
    }
}
