use chrono::prelude::*;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use crate::calendars::holidays::parse_iso_date;
use crate::calendars::weekdays::{parse_weekday, weekday_name};
use crate::error::{BizdaysError, Result};

/// The position of a match within a window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ordinal {
    /// The n-th match, counted from one.
    Nth(u32),
    /// The last match.
    Last,
}

/// What an expression counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Unit {
    /// Calendar days.
    Day,
    /// Business days of the calendar.
    BizDay,
    /// A given weekday.
    Weekday(Weekday),
}

/// The window a position is looked up in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// The month when one is given, else the year.
    #[default]
    Implicit,
    Month,
    Year,
    NextMonth,
    PreviousMonth,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

/// The date a shift counts from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A position looked up in a window, e.g. `10th bizday of month`.
    Position {
        ordinal: Ordinal,
        unit: Unit,
        scope: Scope,
    },
    /// A literal date.
    Date(NaiveDate),
}

/// A parsed relative date expression.
///
/// # Examples
/// ```rust
/// # use bizdays::calendars::{DateExpr, Ordinal, Unit, Scope};
/// # use chrono::Weekday;
/// let expr: DateExpr = "last fri of year".parse().unwrap();
/// assert_eq!(
///     expr,
///     DateExpr::Position { ordinal: Ordinal::Last, unit: Unit::Weekday(Weekday::Fri), scope: Scope::Year }
/// );
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DateExpr {
    /// The n-th, or last, unit of a window.
    Position {
        ordinal: Ordinal,
        unit: Unit,
        scope: Scope,
    },
    /// A number of units strictly before or after a reference date.
    Shift {
        count: u32,
        unit: Unit,
        direction: Direction,
        reference: Reference,
    },
}

impl DateExpr {
    /// Returns `true` if resolving the expression needs a year.
    pub fn needs_window(&self) -> bool {
        match self {
            DateExpr::Position { .. } => true,
            DateExpr::Shift { reference, .. } => matches!(reference, Reference::Position { .. }),
        }
    }
}

impl FromStr for DateExpr {
    type Err = BizdaysError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<String> = s.split_whitespace().map(|t| t.to_lowercase()).collect();
        trace!(?tokens, "tokenized date expression");
        let mut parser = Parser {
            source: s,
            tokens: &tokens,
            pos: 0,
        };
        let expr = parser.expr()?;
        trace!(?expr, "parsed date expression");
        Ok(expr)
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [String],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, msg: &str) -> BizdaysError {
        BizdaysError::Expression(format!("{msg} in '{}'", self.source.trim()))
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn next(&mut self) -> Option<&'a str> {
        let token = self.tokens.get(self.pos).map(String::as_str);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<DateExpr> {
        let ordinal = self.ordinal()?;
        let unit = self.unit()?;
        let expr = match self.peek() {
            None => DateExpr::Position {
                ordinal,
                unit,
                scope: Scope::Implicit,
            },
            Some("of") => {
                self.pos += 1;
                DateExpr::Position {
                    ordinal,
                    unit,
                    scope: self.scope()?,
                }
            }
            Some("before") | Some("after") => {
                let direction = if self.next() == Some("before") {
                    Direction::Before
                } else {
                    Direction::After
                };
                let count = match ordinal {
                    Ordinal::Nth(n) => n,
                    Ordinal::Last => 1,
                };
                DateExpr::Shift {
                    count,
                    unit,
                    direction,
                    reference: self.reference()?,
                }
            }
            Some(token) => {
                let msg = format!("unexpected '{token}'");
                return Err(self.error(&msg));
            }
        };
        if let Some(token) = self.peek() {
            let msg = format!("trailing '{token}'");
            return Err(self.error(&msg));
        }
        Ok(expr)
    }

    fn reference(&mut self) -> Result<Reference> {
        if let Some(date) = self.peek().and_then(parse_iso_date) {
            self.pos += 1;
            return Ok(Reference::Date(date));
        }
        let ordinal = self.ordinal()?;
        let unit = self.unit()?;
        let scope = if self.peek() == Some("of") {
            self.pos += 1;
            self.scope()?
        } else {
            Scope::Implicit
        };
        Ok(Reference::Position {
            ordinal,
            unit,
            scope,
        })
    }

    fn ordinal(&mut self) -> Result<Ordinal> {
        let token = self.next().ok_or_else(|| self.error("missing ordinal"))?;
        let ordinal = match token {
            "first" => Ordinal::Nth(1),
            "second" => Ordinal::Nth(2),
            "third" => Ordinal::Nth(3),
            "fourth" => Ordinal::Nth(4),
            "fifth" => Ordinal::Nth(5),
            "last" => Ordinal::Last,
            t => {
                let n = ["st", "nd", "rd", "th"]
                    .iter()
                    .find_map(|suffix| t.strip_suffix(suffix))
                    .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|digits| digits.parse::<u32>().ok());
                match n {
                    Some(n) if n > 0 => Ordinal::Nth(n),
                    _ => {
                        let msg = format!("invalid ordinal '{t}'");
                        return Err(self.error(&msg));
                    }
                }
            }
        };
        Ok(ordinal)
    }

    fn unit(&mut self) -> Result<Unit> {
        let token = self.next().ok_or_else(|| self.error("missing day unit"))?;
        let unit = match token {
            "day" => Unit::Day,
            "bizday" => Unit::BizDay,
            "business" => match self.next() {
                Some("day") => Unit::BizDay,
                _ => return Err(self.error("expected 'day' after 'business'")),
            },
            t => match parse_weekday(t) {
                Some(w) => Unit::Weekday(w),
                None => {
                    let msg = format!("invalid day unit '{t}'");
                    return Err(self.error(&msg));
                }
            },
        };
        Ok(unit)
    }

    fn scope(&mut self) -> Result<Scope> {
        let scope = match (self.next(), self.peek()) {
            (Some("month"), _) => Scope::Month,
            (Some("year"), _) => Scope::Year,
            (Some("next"), Some("month")) => Scope::NextMonth,
            (Some("previous"), Some("month")) => Scope::PreviousMonth,
            _ => return Err(self.error("invalid scope after 'of'")),
        };
        if matches!(scope, Scope::NextMonth | Scope::PreviousMonth) {
            self.pos += 1;
        }
        Ok(scope)
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ordinal::Last => f.write_str("last"),
            Ordinal::Nth(n) => {
                let suffix = match (n % 10, n % 100) {
                    (_, 11..=13) => "th",
                    (1, _) => "st",
                    (2, _) => "nd",
                    (3, _) => "rd",
                    _ => "th",
                };
                write!(f, "{n}{suffix}")
            }
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Day => f.write_str("day"),
            Unit::BizDay => f.write_str("bizday"),
            Unit::Weekday(w) => f.write_str(&weekday_name(*w).to_lowercase()),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Implicit => Ok(()),
            Scope::Month => f.write_str(" of month"),
            Scope::Year => f.write_str(" of year"),
            Scope::NextMonth => f.write_str(" of next month"),
            Scope::PreviousMonth => f.write_str(" of previous month"),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Position {
                ordinal,
                unit,
                scope,
            } => write!(f, "{ordinal} {unit}{scope}"),
            Reference::Date(d) => write!(f, "{d}"),
        }
    }
}

impl fmt::Display for DateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateExpr::Position {
                ordinal,
                unit,
                scope,
            } => write!(f, "{ordinal} {unit}{scope}"),
            DateExpr::Shift {
                count,
                unit,
                direction,
                reference,
            } => {
                let direction = match direction {
                    Direction::Before => "before",
                    Direction::After => "after",
                };
                write!(f, "{} {unit} {direction} {reference}", Ordinal::Nth(*count))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::nd;

    fn parse(s: &str) -> Result<DateExpr> {
        s.parse()
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(
            parse("15th day").unwrap(),
            DateExpr::Position {
                ordinal: Ordinal::Nth(15),
                unit: Unit::Day,
                scope: Scope::Implicit
            }
        );
        assert_eq!(
            parse("  LAST   Friday ").unwrap(),
            DateExpr::Position {
                ordinal: Ordinal::Last,
                unit: Unit::Weekday(Weekday::Fri),
                scope: Scope::Implicit
            }
        );
        assert_eq!(
            parse("first business day of next month").unwrap(),
            DateExpr::Position {
                ordinal: Ordinal::Nth(1),
                unit: Unit::BizDay,
                scope: Scope::NextMonth
            }
        );
    }

    #[test]
    fn test_parse_shift() {
        assert_eq!(
            parse("10th fri before 10th bizday").unwrap(),
            DateExpr::Shift {
                count: 10,
                unit: Unit::Weekday(Weekday::Fri),
                direction: Direction::Before,
                reference: Reference::Position {
                    ordinal: Ordinal::Nth(10),
                    unit: Unit::BizDay,
                    scope: Scope::Implicit
                }
            }
        );
        // last counts as a single step
        assert_eq!(
            parse("last bizday after 2018-02-01").unwrap(),
            DateExpr::Shift {
                count: 1,
                unit: Unit::BizDay,
                direction: Direction::After,
                reference: Reference::Date(nd(2018, 2, 1))
            }
        );
        assert!(!parse("15th bizday before 2018-02-01").unwrap().needs_window());
        assert!(parse("first day before last day of year").unwrap().needs_window());
    }

    #[test]
    fn test_parse_errors() {
        for expr in [
            "",
            "day",
            "first",
            "0th day",
            "-1st day",
            "firstly day",
            "first week",
            "first day of week",
            "first day before",
            "first day around 15th day",
            "first day of month before 15th day",
            "15th day extra",
            "first business",
            "first bizday after 2018-02-30",
        ] {
            match parse(expr) {
                Err(e) => assert!(e.is_format(), "{expr}: {e}"),
                Ok(x) => panic!("'{expr}' parsed as {x:?}"),
            }
        }
    }

    #[test]
    fn test_display() {
        for expr in [
            "1st day",
            "last friday of year",
            "2nd bizday before 10th bizday",
            "3rd tuesday after 2002-01-01",
            "11th bizday of previous month",
        ] {
            assert_eq!(parse(expr).unwrap().to_string(), expr);
        }
        assert_eq!(Ordinal::Nth(22).to_string(), "22nd");
        assert_eq!(Ordinal::Nth(112).to_string(), "112th");
    }
}
