/*!
Structured logging for serverless functions.

This crate wraps a leveled logger that writes one JSON object per record, and enriches those
records with properties and invocation metadata. It's compatible with `log`.

- Call `Logger::new` once when the function starts to create a logger.
- Call `Logger::inject_context` at the start of an invocation to attach the function name,
  memory size, ARN and request id to every record after it.
- Call `Logger::enrich` or `Logger::event` to attach fields of your own.

# Examples

```
use lambda_logger::{LogConfig, Logger, RequestContext};

let mut logger = Logger::new(
    LogConfig::from_env().property("service", "checkout"),
);

logger.inject_context(&RequestContext::new(
    "arn:aws:lambda:eu-west-1:123456789012:function:checkout",
    "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
));

lambda_logger::info!(logger, "handling a request for {}", "Timmy");
```

Will output (the invocation fields only if they could be loaded):

```text
{"level":"info","time":"2024-02-12T06:31:58Z","location":"src/main.rs:14","service":"checkout","function_name":"checkout","function_memory_size":"128","function_arn":"arn:aws:lambda:eu-west-1:123456789012:function:checkout","function_request_id":"c6af9ac6-7b61-11e6-9a41-93e8deadbeef","message":"handling a request for Timmy"}
```
*/

#[macro_use]
mod macros;

mod config;
mod ctxt;
mod properties;
mod record;

use std::env;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use env_logger::{Target, WriteStyle};
use log::{Log, Metadata, Record, SetLoggerError};

use self::properties::{Chained, Properties};

pub use self::config::{resolve_level, LogConfig, DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV_VAR};
pub use self::ctxt::{
    InvocationContext, RequestContext, FUNCTION_ARN_CONTEXT_KEY, FUNCTION_MEMORY_SIZE_ENV_VAR,
    FUNCTION_NAME_ENV_VAR, REQUEST_ID_CONTEXT_KEY, UNKNOWN, UNKNOWN_MEMORY_SIZE,
};
pub use log::{Level, ParseLevelError};

const TARGET: &str = "lambda_logger";

/**
A logger that enriches every record it writes with a fixed set of fields.

Cloning a logger is cheap. Clones, and the loggers returned by `enrich`, share the same
underlying writer and level.
*/
#[derive(Clone)]
pub struct Logger {
    engine: Arc<env_logger::Logger>,
    level: Level,
    properties: Arc<Properties>,
    inject_context: bool,
}

impl Logger {
    /**
    Create a logger from a configuration.

    This never fails. A level left empty is read from `POWERTOOLS_LOG_LEVEL`. An
    unrecognized level name falls back to `DEBUG`, and a warning naming the rejected value
    is written as the logger's first record.
    */
    #[track_caller]
    pub fn new(config: LogConfig) -> Self {
        let LogConfig {
            log_level,
            writer,
            properties,
            inject_context,
        } = config;

        let (level, rejected) = config::effective_level(&log_level, |key| env::var(key).ok());

        let target = match writer {
            Some(writer) => Target::Pipe(writer),
            None => Target::Stdout,
        };

        let engine = env_logger::Builder::new()
            .target(target)
            .write_style(WriteStyle::Never)
            .filter_level(level.to_level_filter())
            .format(record::format)
            .build();

        let logger = Logger {
            engine: Arc::new(engine),
            level,
            properties: Arc::new(properties),
            inject_context,
        };

        if let Some(rejected) = rejected {
            logger.warn(format_args!(
                "unrecognized log level `{}`, defaulting to {}",
                rejected, DEFAULT_LOG_LEVEL
            ));
        }

        logger
    }

    /**
    The level this logger writes at.

    Records less severe than this level are discarded.
    */
    pub fn level(&self) -> Level {
        self.level
    }

    /**
    Whether a record at `level` would be written.
    */
    pub fn is_enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /**
    Attach the invocation context to every record written after this call.

    The function name and memory size are read from the environment, the ARN and request id
    from `request`. See `inject_invocation_context` for how missing values are reported.
    */
    #[track_caller]
    pub fn inject_context(&mut self, request: &RequestContext) {
        let ctxt = InvocationContext::resolve(request);
        self.inject_invocation_context(&ctxt);
    }

    /**
    Attach an already resolved invocation context to every record written after this call.

    A warning is written for each field that couldn't be loaded. Those warnings don't carry
    the invocation fields. All four fields are attached afterwards, including the ones that
    hold a sentinel. Injecting again replaces the previous values.
    */
    #[track_caller]
    pub fn inject_invocation_context(&mut self, ctxt: &InvocationContext) {
        for failure in ctxt.failures() {
            self.warn(failure);
        }

        self.attach(ctxt.fields());
    }

    /**
    Prepare the logger for a new invocation.

    This injects the invocation context if the logger was configured with `inject_context`,
    and does nothing otherwise.
    */
    #[track_caller]
    pub fn start_invocation(&mut self, request: &RequestContext) {
        if self.inject_context {
            self.inject_context(request);
        }
    }

    /**
    Create a logger with an additional field.

    If this logger already has a field with the same name, then the new value will be used
    by the returned logger. This logger is unchanged.
    */
    pub fn enrich<K, V>(&self, k: K, v: V) -> Logger
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut logger = self.clone();
        logger.attach(Some((k.into(), v.into())));
        logger
    }

    /**
    Begin a record with fields of its own.

    ```
    # use lambda_logger::{Level, LogConfig, Logger};
    # let logger = Logger::new(LogConfig::new());
    logger
        .event(Level::Info)
        .field("order_id", "42")
        .log("order placed");
    ```
    */
    pub fn event(&self, level: Level) -> Event<'_> {
        Event {
            logger: self,
            level,
            fields: Properties::default(),
        }
    }

    #[track_caller]
    pub fn error<M>(&self, message: M)
    where
        M: fmt::Display,
    {
        self.write(Level::Error, &Properties::Empty, format_args!("{}", message))
    }

    #[track_caller]
    pub fn warn<M>(&self, message: M)
    where
        M: fmt::Display,
    {
        self.write(Level::Warn, &Properties::Empty, format_args!("{}", message))
    }

    #[track_caller]
    pub fn info<M>(&self, message: M)
    where
        M: fmt::Display,
    {
        self.write(Level::Info, &Properties::Empty, format_args!("{}", message))
    }

    #[track_caller]
    pub fn debug<M>(&self, message: M)
    where
        M: fmt::Display,
    {
        self.write(Level::Debug, &Properties::Empty, format_args!("{}", message))
    }

    #[track_caller]
    pub fn trace<M>(&self, message: M)
    where
        M: fmt::Display,
    {
        self.write(Level::Trace, &Properties::Empty, format_args!("{}", message))
    }

    /**
    Route records from the `log` macros through this logger.

    This sets the global maximum level to this logger's level, so it can only be called
    once per process.
    */
    pub fn install(&self) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(self.level.to_level_filter());

        Ok(())
    }

    #[track_caller]
    fn write(&self, level: Level, fields: &Properties, args: fmt::Arguments) {
        if !self.is_enabled(level) {
            return;
        }

        let location = Location::caller();
        let kvs = Chained::new(&*self.properties, fields);

        self.engine.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(TARGET)
                .file(Some(location.file()))
                .line(Some(location.line()))
                .key_values(&kvs)
                .build(),
        );
    }

    fn attach<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut properties = (*self.properties).clone();
        properties.extend(fields);

        self.properties = Arc::new(properties);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("properties", &self.properties)
            .field("inject_context", &self.inject_context)
            .finish()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.is_enabled(metadata.level())
    }

    fn log(&self, record: &Record) {
        if !self.is_enabled(record.level()) {
            return;
        }

        let kvs = Chained::new(&*self.properties, record.key_values());

        self.engine.log(&record.to_builder().key_values(&kvs).build());
    }

    fn flush(&self) {
        self.engine.flush()
    }
}

/**
A record being built by `Logger::event`.
*/
#[must_use = "call .log to write the record"]
pub struct Event<'a> {
    logger: &'a Logger,
    level: Level,
    fields: Properties,
}

impl<'a> Event<'a> {
    /**
    Attach a field to this record only.
    */
    pub fn field<K, V>(mut self, k: K, v: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.insert(k.into(), v.into());
        self
    }

    /**
    Write the record.
    */
    #[track_caller]
    pub fn log<M>(self, message: M)
    where
        M: fmt::Display,
    {
        self.logger
            .write(self.level, &self.fields, format_args!("{}", message))
    }
}
