use std::cmp;

use chrono::{Datelike, Duration, NaiveDate};
use nom::{
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, opt},
    sequence::preceded,
};

use super::result::{IResult, ParseError, Span};
use crate::error::{Error, Result};

/// A calendar date with possibly-missing low-order components: `1734`,
/// `1734-06`, `1734-06-12`. A `00` month or day is a placeholder for an
/// unknown component, so `1734-00-00` means the same as `1734`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
}

impl PartialDate {
    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Complete the date against an anchor: missing components are taken
    /// from the anchor, with an anchor-supplied day clamped to the true last
    /// day of the resolved month. An explicitly given day must exist in the
    /// calendar.
    pub fn fill(&self, anchor: NaiveDate) -> Result<NaiveDate> {
        let month = self.month.unwrap_or_else(|| anchor.month());

        match self.day {
            Some(day) => NaiveDate::from_ymd_opt(self.year, month, day).ok_or_else(|| {
                Error::from(format!(
                    "no such calendar day: {:04}-{:02}-{:02}",
                    self.year, month, day
                ))
            }),
            None => {
                let day = cmp::min(anchor.day(), last_day_of_month(self.year, month));
                Ok(NaiveDate::from_ymd_opt(self.year, month, day).unwrap())
            }
        }
    }
}

pub fn parse_partial(s: &str) -> Result<PartialDate> {
    match all_consuming(partial_date)(Span::new(s)) {
        Ok((_, partial)) => Ok(partial),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(Error::from(format!(
            "{} at offset {}",
            e.message(),
            e.offset()
        ))),
        _ => unreachable!(),
    }
}

fn partial_date(input: Span) -> IResult<PartialDate> {
    let (rest, year) = four_digits(input)?;
    let (rest, month) = opt(preceded(tag("-"), two_digits))(rest)?;
    let (rest, day) = match month {
        Some(_) => opt(preceded(tag("-"), two_digits))(rest)?,
        None => (rest, None),
    };

    if year == 0 {
        return Err(nom::Err::Failure(ParseError::new(
            "year 0000 is a placeholder, not a calendar year".to_owned(),
            input,
        )));
    }

    // `00` stands for an unknown component.
    let month = month.filter(|&m| m != 0);
    let day = day.filter(|&d| d != 0);

    if let Some(m) = month {
        if m > 12 {
            return Err(nom::Err::Failure(ParseError::new(
                format!("month {} out of range", m),
                input,
            )));
        }
    }
    if day.is_some() && month.is_none() {
        return Err(nom::Err::Failure(ParseError::new(
            "day given without a month".to_owned(),
            input,
        )));
    }
    if let Some(d) = day {
        if d > 31 {
            return Err(nom::Err::Failure(ParseError::new(
                format!("day {} out of range", d),
                input,
            )));
        }
    }

    Ok((rest, PartialDate { year, month, day }))
}

fn four_digits(input: Span) -> IResult<i32> {
    let (rest, digits) = take_while_m_n(4, 4, |c: char| c.is_ascii_digit())(input)?;
    Ok((rest, digits.fragment().parse::<i32>().unwrap()))
}

fn two_digits(input: Span) -> IResult<u32> {
    let (rest, digits) = take_while_m_n(2, 2, |c: char| c.is_ascii_digit())(input)?;
    Ok((rest, digits.fragment().parse::<u32>().unwrap()))
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    (NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap() - Duration::days(1)).day()
}
