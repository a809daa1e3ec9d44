//! The values stored in the tree: a name and the birthday that goes with it.
//!
//! # Examples
//!
//! ```
//! use birthday_book::record::{Date, Record};
//!
//! let record: Record = "Amy 3 2 1991".parse().unwrap();
//!
//! assert_eq!(record.name(), "Amy");
//! assert_eq!(record.birthday(), Date::new(3, 2, 1991));
//! assert_eq!(record.to_line(), "Amy 3 2 1991");
//! assert_eq!(record.to_string(), "Name: Amy, Birthday: 3/2/1991");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ParseRecordError;

/// A calendar date. None of the fields are range checked, so `13/42/-7` is as good a
/// `Date` as any other.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Date {
    month: i32,
    day: i32,
    year: i32,
}

impl Date {
    /// Builds a date from its month, day and year.
    pub const fn new(month: i32, day: i32, year: i32) -> Self {
        Self { month, day, year }
    }

    /// The month, conventionally `1..=12`.
    pub const fn month(&self) -> i32 {
        self.month
    }

    /// The day of the month.
    pub const fn day(&self) -> i32 {
        self.day
    }

    /// The year.
    pub const fn year(&self) -> i32 {
        self.year
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}

/// A person's name and birthday. The name is the key the tree orders records by.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Record {
    name: String,
    birthday: Date,
}

impl Record {
    /// Builds a record.
    pub fn new(name: impl Into<String>, birthday: Date) -> Self {
        Self {
            name: name.into(),
            birthday,
        }
    }

    /// The key of this record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The birthday of this record.
    pub fn birthday(&self) -> Date {
        self.birthday
    }

    /// Renders the record the way it is persisted: `name month day year`.
    pub fn to_line(&self) -> String {
        let Date { month, day, year } = self.birthday;
        format!("{} {} {} {}", self.name, month, day, year)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Birthday: {}", self.name, self.birthday)
    }
}

impl FromStr for Record {
    type Err = ParseRecordError;

    /// Parses a persisted line: the first four whitespace separated fields. Anything after the
    /// year is ignored.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();
        let name = fields
            .next()
            .ok_or(ParseRecordError::MissingField("name"))?;
        let month = parse_field(fields.next(), "month")?;
        let day = parse_field(fields.next(), "day")?;
        let year = parse_field(fields.next(), "year")?;

        Ok(Self::new(name, Date::new(month, day, year)))
    }
}

/// Whether `name` survives being persisted: it must be non-empty and hold no whitespace,
/// since the saved line is split on whitespace.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(char::is_whitespace)
}

fn parse_field(token: Option<&str>, field: &'static str) -> Result<i32, ParseRecordError> {
    let token = token.ok_or(ParseRecordError::MissingField(field))?;
    token
        .parse()
        .map_err(|source| ParseRecordError::InvalidNumber {
            field,
            value: token.to_owned(),
            source,
        })
}
