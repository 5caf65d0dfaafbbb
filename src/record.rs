use std::fmt;
use std::io::{self, Write};

use env_logger::fmt::Formatter;
use log::kv::{self, Key, Value, VisitSource};
use log::{Level, Record};
use serde::ser::Serializer;
use serde_derive::Serialize;

use crate::properties::Properties;

/**
Write a record as a single line of JSON.

Fields are written in a fixed order: `level`, `time`, `location`, every key-value
on the record, then `message`. A key-value that shares its name with one of the
built-in fields is written as `fields.<name>`.
*/
pub(crate) fn format(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let mut fields = Fields::default();
    record
        .key_values()
        .visit(&mut fields)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

    let log = Log {
        level: record.level(),
        time: buf.timestamp().to_string(),
        location: location(record),
        fields: &fields.0,
        message: record.args(),
    };

    serde_json::to_writer(&mut *buf, &log)?;
    writeln!(buf)
}

const RESERVED: &[&str] = &["level", "time", "location", "message"];

/// Collects the key-values of a record, later pairs overriding earlier ones.
#[derive(Default)]
struct Fields(Properties);

impl<'kvs> VisitSource<'kvs> for Fields {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        let key = key.as_str();
        let key = if RESERVED.contains(&key) {
            format!("fields.{}", key)
        } else {
            key.to_owned()
        };

        self.0.insert(key, value.to_string());

        Ok(())
    }
}

#[derive(Serialize)]
struct Log<'a, 'b> {
    #[serde(serialize_with = "serialize_level")]
    level: Level,
    time: String,
    location: String,
    #[serde(flatten)]
    fields: &'a Properties,
    #[serde(serialize_with = "serialize_msg")]
    message: &'a fmt::Arguments<'b>,
}

fn location(record: &Record) -> String {
    match (record.file(), record.line()) {
        (Some(file), Some(line)) => format!("{}:{}", file, line),
        (Some(file), None) => file.to_owned(),
        _ => record.target().to_owned(),
    }
}

pub(crate) fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

fn serialize_level<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(level_name(*level))
}

fn serialize_msg<S>(msg: &&fmt::Arguments, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(msg)
}
