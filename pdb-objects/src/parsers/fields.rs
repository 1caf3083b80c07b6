//! Decoding of fixed-width columns.
//!
//! Columns are written as in the PDB format documentation: 1-indexed and
//! inclusive. A blank field, or a field that starts after the end of the
//! line, is absent. Absent text fields are empty strings and absent numbers
//! are `None`. Only non-blank content that does not parse is an error.
use std::fmt;
use std::str::FromStr;

use crate::parsers::errors::FormatError;

/// A named range of columns in a PDB line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    /// First column, 1-indexed.
    pub first: usize,
    /// Last column, inclusive.
    pub last: usize,
}

impl Field {
    pub const fn new(name: &'static str, first: usize, last: usize) -> Self {
        Self { name, first, last }
    }

    /// A field that spans a single column.
    pub const fn column(name: &'static str, column: usize) -> Self {
        Self::new(name, column, column)
    }

    /// Byte range of the field, 0-indexed and exclusive.
    pub fn range(&self) -> std::ops::Range<usize> {
        (self.first - 1)..self.last
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{} (column {})", self.name, self.first)
        } else {
            write!(f, "{} (columns {}-{})", self.name, self.first, self.last)
        }
    }
}

/// Reads typed fields out of one line.
#[derive(Debug, Clone, Copy)]
pub struct FieldDecoder<'a> {
    line: &'a str,
}

impl<'a> FieldDecoder<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line }
    }

    /// The raw content of the field, without trimming.
    ///
    /// When the line stops inside the field, only the available columns are
    /// returned. Numbers never go through this path.
    pub fn raw(&self, field: Field) -> Option<&'a str> {
        let range = field.range();
        if range.start >= self.line.len() {
            return None;
        }
        let end = range.end.min(self.line.len());
        self.line.get(range.start..end)
    }

    pub fn text(&self, field: Field) -> String {
        self.raw(field)
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }

    pub fn integer<T>(&self, field: Field) -> Result<Option<T>, FormatError>
    where
        T: FromStr,
    {
        self.number(field)
    }

    pub fn float(&self, field: Field) -> Result<Option<f64>, FormatError> {
        self.number(field)
    }

    pub fn required_float(&self, field: Field) -> Result<f64, FormatError> {
        self.float(field)?.ok_or(FormatError::MissingField(field))
    }

    fn number<T>(&self, field: Field) -> Result<Option<T>, FormatError>
    where
        T: FromStr,
    {
        // A number cut by the end of the line lost its low order digits.
        let Some(content) = self.line.get(field.range()).map(str::trim) else {
            return Ok(None);
        };
        if content.is_empty() {
            return Ok(None);
        }
        content
            .parse()
            .map(Some)
            .map_err(|_| FormatError::InvalidNumber {
                field,
                content: content.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;
    use rstest::rstest;

    const SERIAL: Field = Field::new("serial", 7, 11);
    const CHAIN: Field = Field::column("chainID", 22);
    const X: Field = Field::new("x", 31, 38);

    const LINE: &str =
        "ATOM    123  N   MET A   1      20.154  29.699   5.276  1.00 49.05           N";

    #[test]
    fn test_range_is_zero_indexed() {
        assert_eq!(SERIAL.range(), 6..11);
        assert_eq!(CHAIN.range(), 21..22);
    }

    #[rstest]
    #[case(SERIAL, "serial (columns 7-11)")]
    #[case(CHAIN, "chainID (column 22)")]
    fn test_display(#[case] field: Field, #[case] expected: &str) {
        assert_eq!(field.to_string(), expected);
    }

    #[test]
    fn test_decode_present_fields() {
        let decoder = FieldDecoder::new(LINE);
        assert_eq!(decoder.integer::<u32>(SERIAL), Ok(Some(123)));
        assert_eq!(decoder.text(CHAIN), "A");
        assert_f64_near!(decoder.required_float(X).unwrap(), 20.154);
    }

    #[rstest]
    // Blank columns
    #[case("ATOM          N   MET A   1")]
    // Line stops before the field
    #[case("ATOM")]
    fn test_absent_integer(#[case] line: &str) {
        let decoder = FieldDecoder::new(line);
        assert_eq!(decoder.integer::<u32>(SERIAL), Ok(None));
    }

    #[test]
    fn test_truncated_text_uses_available_columns() {
        const NAME: Field = Field::new("name", 13, 16);
        let decoder = FieldDecoder::new("ATOM      1  N");
        assert_eq!(decoder.raw(NAME), Some(" N"));
        assert_eq!(decoder.text(NAME), "N");
    }

    #[rstest]
    #[case("ATOM    1")]
    #[case("ATOM    12")]
    fn test_truncated_number_is_absent(#[case] line: &str) {
        let decoder = FieldDecoder::new(line);
        assert_eq!(decoder.integer::<u32>(SERIAL), Ok(None));
    }

    #[test]
    fn test_truncated_required_float_is_missing() {
        let decoder = FieldDecoder::new("ATOM      1  N   MET A   1      20.1");
        assert_eq!(
            decoder.required_float(X),
            Err(FormatError::MissingField(X))
        );
    }

    #[test]
    fn test_text_beyond_line_is_empty() {
        let decoder = FieldDecoder::new("ATOM      1");
        assert_eq!(decoder.text(CHAIN), "");
    }

    #[test]
    fn test_invalid_number() {
        let decoder = FieldDecoder::new("ATOM    1x3");
        let error = decoder.integer::<u32>(SERIAL).unwrap_err();
        assert_eq!(
            error,
            FormatError::InvalidNumber {
                field: SERIAL,
                content: String::from("1x3"),
            }
        );
    }

    #[test]
    fn test_negative_value_for_unsigned_field() {
        let decoder = FieldDecoder::new("ATOM     -1");
        assert!(decoder.integer::<u32>(SERIAL).is_err());
        assert_eq!(decoder.integer::<i32>(SERIAL), Ok(Some(-1)));
    }

    #[test]
    fn test_missing_required_float() {
        let decoder = FieldDecoder::new("ATOM      1  N   MET A   1");
        assert_eq!(
            decoder.required_float(X),
            Err(FormatError::MissingField(X))
        );
    }

    #[test]
    fn test_non_ascii_boundary_is_absent() {
        // "é" is two bytes wide and straddles the end of the serial field.
        let decoder = FieldDecoder::new("ATOM      é");
        assert_eq!(decoder.raw(SERIAL), None);
        assert_eq!(decoder.text(SERIAL), "");
    }
}
