//! Parser for ticket files.
//!
//! A ticket file is a run of `Key: value` headers followed by a free-form
//! body. Parsing happens in two passes: every line is first classified into
//! a header map or the body buffer, then the map is resolved against
//! [`REQUIRED_HEADERS`] and [`OPTIONAL_HEADERS`].

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::str::FromStr;

use crate::types::{DATE_FORMAT, TicketRecord};

/// Headers every ticket file must carry.
pub const REQUIRED_HEADERS: [&str; 7] = [
    "Subject",
    "Type",
    "Issuer",
    "Date",
    "Priority",
    "Status",
    "Assigned to",
];

/// Headers introduced after the first version of the format, paired with
/// the value files written before they existed are read as.
pub const OPTIONAL_HEADERS: [(&str, &str); 1] = [("Weight", "1")];

/// Length of a date rendered with [`DATE_FORMAT`].
const DATE_LEN: usize = "YYYY-MM-DD HH:MM:SS".len();

/// Errors that can occur when parsing a ticket file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTicketError {
    /// A header from [`REQUIRED_HEADERS`] is absent.
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// The `Date` value does not match [`DATE_FORMAT`].
    #[error("Invalid date (expected YYYY-MM-DD HH:MM:SS): {0}")]
    MalformedDate(String),

    /// `Priority` is not an integer, or `Weight` is not an unsigned one.
    #[error("Invalid integer for {field}: {value}")]
    MalformedInteger {
        /// Header name.
        field: String,
        /// Value as found in the file.
        value: String,
    },

    /// `Type` or `Status` names no known variant.
    #[error("Invalid value for {field}: {value}")]
    InvalidEnumValue {
        /// Header name.
        field: String,
        /// Value as found in the file.
        value: String,
    },
}

/// Parse a ticket from its on-disk text.
///
/// `id` and `release` are not stored in the file. When given they are
/// stamped onto the result; otherwise the record keeps its defaults.
///
/// # Errors
///
/// Fails if a required header is missing or a value cannot be read. No
/// partially filled record is ever returned.
pub fn parse_ticket(
    input: &str,
    id: Option<&str>,
    release: Option<&str>,
) -> Result<TicketRecord, ParseTicketError> {
    let (mut headers, body) = split_headers(input);
    headers.check_schema()?;

    let mut ticket = TicketRecord {
        title: headers.value("Subject").to_string(),
        kind: parse_enum(&headers, "Type")?,
        issuer: headers.value("Issuer").to_string(),
        created_at: parse_date(headers.value("Date"))?,
        body,
        priority: parse_integer(&headers, "Priority")?,
        weight: parse_integer(&headers, "Weight")?,
        status: parse_enum(&headers, "Status")?,
        assigned_to: headers.value("Assigned to").to_string(),
        ..TicketRecord::default()
    };

    if let Some(id) = id {
        ticket.id = id.to_string();
    }
    if let Some(release) = release {
        ticket.release = release.to_string();
    }

    Ok(ticket)
}

/// Header values keyed by header name.
#[derive(Debug, Default)]
struct Headers(HashMap<String, String>);

impl Headers {
    /// Verify required headers and fill in defaults for optional ones.
    fn check_schema(&mut self) -> Result<(), ParseTicketError> {
        if let Some(missing) = REQUIRED_HEADERS
            .iter()
            .find(|key| !self.0.contains_key(**key))
        {
            return Err(ParseTicketError::MissingRequiredField(
                (*missing).to_string(),
            ));
        }

        for (key, default) in OPTIONAL_HEADERS {
            self.0
                .entry(key.to_string())
                .or_insert_with(|| default.to_string());
        }

        Ok(())
    }

    /// Value of a header that [`Headers::check_schema`] guarantees.
    fn value(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }
}

/// Sort lines into headers and body text.
///
/// Blank lines and `#` comments are dropped. A line with a colon is a
/// header; the last occurrence of a key wins. Everything else is body.
fn split_headers(input: &str) -> (Headers, String) {
    let mut headers = Headers::default();
    let mut body = String::new();

    for line in input.lines() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            if !REQUIRED_HEADERS.contains(&key) && !OPTIONAL_HEADERS.iter().any(|(k, _)| *k == key)
            {
                tracing::trace!(key, "Ignoring unknown header");
            }
            headers.0.insert(key.to_string(), value.trim().to_string());
        } else {
            body.push_str(line);
            body.push('\n');
        }
    }

    (headers, body)
}

fn parse_date(value: &str) -> Result<NaiveDateTime, ParseTicketError> {
    // chrono accepts unpadded fields; the format does not.
    if value.len() != DATE_LEN {
        return Err(ParseTicketError::MalformedDate(value.to_string()));
    }

    NaiveDateTime::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ParseTicketError::MalformedDate(value.to_string()))
}

fn parse_integer<T: FromStr>(headers: &Headers, field: &str) -> Result<T, ParseTicketError> {
    let value = headers.value(field);
    value
        .parse()
        .map_err(|_| ParseTicketError::MalformedInteger {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_enum<T: FromStr>(headers: &Headers, field: &str) -> Result<T, ParseTicketError> {
    let value = headers.value(field);
    value
        .parse()
        .map_err(|_| ParseTicketError::InvalidEnumValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}
