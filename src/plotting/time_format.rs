//! Translation of date-fns style patterns (as carried in chart configurations)
//! into chrono strftime strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{ChartError, Result};

/// Convert a pattern such as `yyyy-MM-dd'T'HH:mm:ss` to `%Y-%m-%dT%H:%M:%S`.
///
/// Unknown letters are copied through unchanged.
pub fn to_strftime(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // '' is a literal quote, otherwise copy until the closing quote
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&next| next == c).count();
        let token = match (c, run) {
            ('y', 2) => Some("%y"),
            ('y', _) => Some("%Y"),
            ('M', 1) => Some("%-m"),
            ('M', 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('d', 1) => Some("%-d"),
            ('d', _) => Some("%d"),
            ('H', 1) => Some("%-H"),
            ('H', _) => Some("%H"),
            ('h', 1) => Some("%-I"),
            ('h', _) => Some("%I"),
            ('m', _) => Some("%M"),
            ('s', _) => Some("%S"),
            ('a', _) => Some("%p"),
            _ => None,
        };

        match token {
            Some(token) => out.push_str(token),
            None => (0..run).for_each(|_| push_literal(&mut out, c)),
        }
        i += run;
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Parse a label with a date-fns pattern. Date-only patterns resolve to
/// midnight.
pub fn parse_time(value: &str, pattern: &str) -> Result<NaiveDateTime> {
    let format = to_strftime(pattern);
    NaiveDateTime::parse_from_str(value, &format)
        .or_else(|_| {
            NaiveDate::parse_from_str(value, &format)
                .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|_| ChartError::TimeParse {
            value: value.to_string(),
            format: pattern.to_string(),
        })
}

/// Format seconds since the epoch with a date-fns pattern.
pub fn format_timestamp(seconds: f64, pattern: &str) -> String {
    DateTime::<Utc>::from_timestamp(seconds.round() as i64, 0)
        .map(|dt| dt.naive_utc().format(&to_strftime(pattern)).to_string())
        .unwrap_or_default()
}
