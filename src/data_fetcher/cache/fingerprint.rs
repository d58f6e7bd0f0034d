//! Cache key derivation.
//!
//! A fingerprint has the shape `vsports:{endpoint}:{params}`, where `params`
//! is the query map rendered as JSON with sorted keys and `", "` / `": "`
//! separators, or `null` when the request carries no query parameters:
//!
//! ```text
//! vsports:teams/by/tournament/118:null
//! vsports:events:{"end_date": "2025-01-24", "start_date": "2025-01-24"}
//! ```
//!
//! Keys are stable across releases so existing Redis entries stay readable
//! after an upgrade.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::Formatter;
use std::collections::BTreeMap;
use std::io;

use crate::constants::cache::KEY_NAMESPACE;

/// JSON formatter that puts a space after `,` and `:`
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn render_params(params: &BTreeMap<String, Value>) -> String {
    if params.is_empty() {
        return "null".to_string();
    }

    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    // Serializing a map of JSON values into memory cannot fail
    if params.serialize(&mut serializer).is_err() {
        return "null".to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Builds the cache key for an endpoint and its query parameters.
///
/// `BTreeMap` iteration is ordered, so equal parameter sets always produce
/// the same key regardless of insertion order.
pub fn fingerprint(endpoint: &str, params: &BTreeMap<String, Value>) -> String {
    format!("{KEY_NAMESPACE}:{endpoint}:{}", render_params(params))
}
