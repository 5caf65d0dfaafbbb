use std::env;
use std::fmt;
use std::io::Write;

use log::{Level, ParseLevelError};

use crate::properties::Properties;

/// The environment variable the log level is read from when none is configured.
pub const LOG_LEVEL_ENV_VAR: &str = "POWERTOOLS_LOG_LEVEL";

/// The level used when none is configured, or the configured one isn't recognized.
pub const DEFAULT_LOG_LEVEL: &str = "DEBUG";

const DEFAULT_LEVEL: Level = Level::Debug;

/**
Configuration for a `Logger`.

The configuration is consumed when the logger is created. Anything left unset falls back
to a default: the level to the `POWERTOOLS_LOG_LEVEL` environment variable, then `DEBUG`,
and the writer to standard output.

# Examples

```
use lambda_logger::{LogConfig, Logger};

let logger = Logger::new(
    LogConfig::from_env()
        .property("service", "checkout")
        .inject_context(true),
);

logger.info("ready");
```
*/
#[derive(Default)]
pub struct LogConfig {
    pub(crate) log_level: String,
    pub(crate) writer: Option<Box<dyn Write + Send>>,
    pub(crate) properties: Properties,
    pub(crate) inject_context: bool,
}

impl LogConfig {
    /**
    An empty configuration.

    The level is left unset, so it's read from `POWERTOOLS_LOG_LEVEL` when the logger is created.
    */
    pub fn new() -> Self {
        Default::default()
    }

    /**
    A configuration with its level taken from the `POWERTOOLS_LOG_LEVEL` environment variable.
    */
    pub fn from_env() -> Self {
        Self::new().log_level(env_level(|key| env::var(key).ok()))
    }

    /**
    Set the level name, like `info` or `WARN`.

    Names are matched case-insensitively. An empty name means the level is read from
    `POWERTOOLS_LOG_LEVEL`, then defaults to `DEBUG`.
    */
    pub fn log_level<S>(mut self, level: S) -> Self
    where
        S: Into<String>,
    {
        self.log_level = level.into();
        self
    }

    /**
    Set the sink records are written to.
    */
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.writer = Some(Box::new(writer));
        self
    }

    /**
    Attach a property to every record.

    Properties are written in the order they're added. Adding a key twice keeps the last value.
    */
    pub fn property<K, V>(mut self, k: K, v: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.properties.insert(k.into(), v.into());
        self
    }

    /**
    Attach a set of properties to every record.
    */
    pub fn properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /**
    Whether `Logger::start_invocation` should inject the invocation context.
    */
    pub fn inject_context(mut self, inject: bool) -> Self {
        self.inject_context = inject;
        self
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LogConfig")
            .field("log_level", &self.log_level)
            .field("writer", &self.writer.as_ref().map(|_| "..."))
            .field("properties", &self.properties)
            .field("inject_context", &self.inject_context)
            .finish()
    }
}

/**
Look up a level by name.

The recognized names are `TRACE`, `DEBUG`, `INFO`, `WARN` and `ERROR`, in any case.
*/
pub fn resolve_level(name: &str) -> Result<Level, ParseLevelError> {
    name.trim().parse()
}

fn env_level<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(LOG_LEVEL_ENV_VAR).unwrap_or_default()
}

/**
The level a logger filters at, along with the level name if it was rejected.

An empty `name` is replaced by the `POWERTOOLS_LOG_LEVEL` value found through `lookup`.
*/
pub(crate) fn effective_level<F>(name: &str, lookup: F) -> (Level, Option<String>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut name = name.trim().to_owned();
    if name.is_empty() {
        name = env_level(lookup).trim().to_owned();
    }

    if name.is_empty() {
        return (DEFAULT_LEVEL, None);
    }

    match resolve_level(&name) {
        Ok(level) => (level, None),
        Err(_) => (DEFAULT_LEVEL, Some(name)),
    }
}
