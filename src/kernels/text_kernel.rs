//! NAIF text kernel reader (LSK, PCK).
//!
//! A text kernel mixes free comment text with data blocks. Only the lines
//! between a `\begindata` marker and the next `\begintext` marker are
//! interpreted, as a sequence of assignments:
//!
//! ```text
//! \begindata
//! DELTET/DELTA_AT = ( 10, @1972-JAN-1
//!                     11, @1972-JUL-1 )
//! BODY10_RADII    = ( 696000. 696000. 696000. )
//! NAME            = 'It''s quoted'
//! BODY10_GM      += 1.32712440041D11
//! \begintext
//! ```
//!
//! * `=` replaces any previous value of the variable, `+=` appends to it.
//! * Numbers accept the Fortran `D` exponent marker.
//! * Strings are single-quoted, a doubled quote stands for one quote.
//! * Values starting with `@` are calendar dates, kept verbatim.
//! * Vectors are parenthesized, values separated by blanks and/or commas.
use std::{collections::HashMap, fs};

use camino::Utf8Path;
use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till1, take_while},
    character::complete::{char, multispace0},
    combinator::map,
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{delimited, preceded},
    IResult, Parser,
};

use crate::barytrack_errors::BaryTrackError;

const BEGIN_DATA: &str = "\\begindata";
const BEGIN_TEXT: &str = "\\begintext";

#[derive(Debug, Clone, PartialEq)]
pub enum KernelValue {
    Number(f64),
    Text(String),
    /// `@`-prefixed calendar date, without the `@`.
    Date(String),
}

impl KernelValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            KernelValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            KernelValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&str> {
        match self {
            KernelValue::Date(s) => Some(s),
            _ => None,
        }
    }
}

/// Variables collected from every text kernel loaded so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KernelPool {
    variables: HashMap<String, Vec<KernelValue>>,
}

impl KernelPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a text kernel from disk and merge its data blocks into the pool.
    pub fn load(&mut self, path: &Utf8Path) -> Result<(), BaryTrackError> {
        let content = fs::read_to_string(path)?;
        let before = self.variables.len();
        self.parse_str(&content)?;
        debug!(
            "text kernel {path}: {} new variables",
            self.variables.len() - before
        );
        Ok(())
    }

    /// Merge the data blocks of a text kernel held in memory.
    pub fn parse_str(&mut self, content: &str) -> Result<(), BaryTrackError> {
        let data = data_blocks(content);
        let mut input = data.as_str();

        loop {
            let (rest, _) = multispace0::<&str, Error<&str>>(input)
                .map_err(|e| BaryTrackError::TextKernelParsing(e.to_string()))?;
            if rest.is_empty() {
                break;
            }
            let (rest, (name, operator, values)) =
                assignment(rest).map_err(|_| BaryTrackError::TextKernelParsing(snippet(rest)))?;

            if operator == "+=" {
                self.variables
                    .entry(name.to_string())
                    .or_default()
                    .extend(values);
            } else {
                self.variables.insert(name.to_string(), values);
            }
            input = rest;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[KernelValue]> {
        self.variables.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Numeric values of `name`, or `None` if the variable is missing or
    /// holds non numeric values.
    pub fn numbers(&self, name: &str) -> Option<Vec<f64>> {
        self.get(name)?.iter().map(KernelValue::as_number).collect()
    }

    /// Values of the body constant `BODY<id>_<item>`.
    ///
    /// Arguments
    /// -----------------
    /// * `body`: NAIF id of the body.
    /// * `item`: constant name, e.g. `"RADII"` (case insensitive).
    /// * `max_count`: maximum number of values the caller accepts.
    ///
    /// Return
    /// ----------
    /// * The numeric values, or [`BaryTrackError::BodyConstantNotFound`] /
    ///   [`BaryTrackError::BodyConstantTooLarge`].
    pub fn body_values(
        &self,
        body: i32,
        item: &str,
        max_count: usize,
    ) -> Result<Vec<f64>, BaryTrackError> {
        let name = format!("BODY{body}_{}", item.to_ascii_uppercase());
        let values = self
            .numbers(&name)
            .ok_or_else(|| BaryTrackError::BodyConstantNotFound(name.clone()))?;

        if values.len() > max_count {
            return Err(BaryTrackError::BodyConstantTooLarge {
                name,
                found: values.len(),
                max: max_count,
            });
        }
        Ok(values)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Concatenate the lines of every `\begindata` block.
fn data_blocks(content: &str) -> String {
    let mut in_data = false;
    let mut data = String::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(BEGIN_DATA) {
            in_data = true;
        } else if trimmed.starts_with(BEGIN_TEXT) {
            in_data = false;
        } else if in_data {
            data.push_str(line);
            data.push('\n');
        }
    }
    data
}

fn snippet(input: &str) -> String {
    let line = input.lines().next().unwrap_or_default();
    format!("cannot parse assignment near {:?}", line.trim())
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '(' || c == ')'
}

fn separators(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_whitespace() || c == ',')(input)
}

fn number(input: &str) -> IResult<&str, KernelValue> {
    let (rest, token) = take_till1(is_delimiter)(input)?;
    token
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .map(|value| (rest, KernelValue::Number(value)))
        .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Float)))
}

fn date(input: &str) -> IResult<&str, KernelValue> {
    let (rest, token) = preceded(char('@'), take_till1(is_delimiter)).parse(input)?;
    Ok((rest, KernelValue::Date(token.to_string())))
}

/// Single-quoted string, `''` stands for one quote.
fn quoted(input: &str) -> IResult<&str, KernelValue> {
    let (rest, parts) = delimited(
        char('\''),
        many0(alt((map(tag("''"), |_| "'"), is_not("'")))),
        char('\''),
    )
    .parse(input)?;
    Ok((rest, KernelValue::Text(parts.concat())))
}

fn scalar(input: &str) -> IResult<&str, KernelValue> {
    alt((quoted, date, number)).parse(input)
}

fn vector(input: &str) -> IResult<&str, Vec<KernelValue>> {
    let (input, _) = char('(')(input)?;
    let (input, values) = many0(preceded(separators, scalar)).parse(input)?;
    let (input, _) = separators(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, values))
}

fn value(input: &str) -> IResult<&str, Vec<KernelValue>> {
    if input.starts_with('(') {
        vector(input)
    } else {
        let (rest, v) = scalar(input)?;
        Ok((rest, vec![v]))
    }
}

fn assignment(input: &str) -> IResult<&str, (&str, &str, Vec<KernelValue>)> {
    let (input, name) = take_till1(|c: char| c.is_whitespace() || c == '=' || c == '+')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, operator) = alt((tag("+="), tag("="))).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, values) = value(input)?;
    Ok((input, (name, operator, values)))
}
