use lazy_static::lazy_static;
use regex;

use super::partial::{parse_partial, PartialDate};
use crate::error::{Error, Result};

// Spellings the register uses for "date unknown".
const NO_DATE_MARKERS: [&str; 2] = ["s.d.", "?"];

/// A date expression classified into one of the grammar's shapes. Matching
/// order is fixed: unknown marker, explicit `/` range, exact calendar shape,
/// implicit single-hyphen range, `ca.` approximation. The exact shape is
/// tried before hyphen-splitting so that `1734-06` reads as June 1734, not
/// as the range 1734..06.
#[derive(Debug, PartialEq)]
pub enum Expr<'a> {
    Empty,
    Range(&'a str, &'a str),
    Circa(&'a str),
    Exact(PartialDate),
}

pub fn classify(raw: &str) -> Result<Expr> {
    let raw = raw.trim();

    if is_unknown(raw) {
        return Ok(Expr::Empty);
    }

    if let Some((lhs, rhs)) = split_range(raw, '/') {
        return Ok(Expr::Range(lhs, rhs));
    }

    if let Ok(partial) = parse_partial(raw) {
        return Ok(Expr::Exact(partial));
    }

    if raw.matches('-').count() == 1 {
        if let Some((lhs, rhs)) = split_range(raw, '-') {
            return Ok(Expr::Range(lhs, rhs));
        }
    }

    if let Some(rest) = strip_circa(raw) {
        return Ok(Expr::Circa(rest));
    }

    Err(Error::from(format!("unrecognized date expression '{}'", raw)))
}

fn is_unknown(raw: &str) -> bool {
    lazy_static! {
        // Whatever is left once the markers are stripped: zeros,
        // punctuation, and whitespace only. The zero covers the placeholder
        // year forms ("0000", "0000-00-00").
        static ref RE: regex::Regex = regex::Regex::new(r"^[\s\p{P}0]*$").unwrap();
    }

    let mut rest = raw.to_owned();
    for marker in &NO_DATE_MARKERS {
        rest = rest.replace(marker, "");
    }
    RE.is_match(&rest)
}

fn split_range(raw: &str, separator: char) -> Option<(&str, &str)> {
    let at = raw.find(separator)?;
    Some((raw[..at].trim(), raw[at + 1..].trim()))
}

fn strip_circa(raw: &str) -> Option<&str> {
    let at = raw.find("ca.")?;
    Some(raw[at + "ca.".len()..].trim())
}
