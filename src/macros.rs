/*!
Template-string logging.

Each macro takes a `Logger` followed by `format!` style arguments:

```
# use lambda_logger::{LogConfig, Logger};
let logger = Logger::new(LogConfig::new());

lambda_logger::info!(logger, "handled {} of {} items", 3, 4);
```

The reported `location` is where the macro is called.
*/

/// Log a formatted message at the error level.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format_args!($($arg)+))
    };
}

/// Log a formatted message at the warn level.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format_args!($($arg)+))
    };
}

/// Log a formatted message at the info level.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format_args!($($arg)+))
    };
}

/// Log a formatted message at the debug level.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format_args!($($arg)+))
    };
}

/// Log a formatted message at the trace level.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(format_args!($($arg)+))
    };
}
