//! Statement tokenizer
//!
//! Splits a normalised line into words: one uppercase letter immediately
//! followed by a signed decimal number (`X-1.5`, `F6E2`). The tokenizer knows
//! nothing about what the letters mean.
//!
//! Scanning is restartable: every call to [`words`] starts a fresh cursor at
//! the beginning of the line, so each resolution pass reads the same
//! immutable text independently.

use motionkit_core::{GcodeError, Result};

/// A letter/value pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Word {
    pub letter: char,
    pub value: f64,
}

/// Iterator over the words of a line
///
/// Yields `Err` once for the first malformed word and then stops.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    line: &'a str,
    cursor: usize,
    failed: bool,
}

/// Scan `line` from its first character
pub fn words(line: &str) -> Words<'_> {
    Words::starting_at(line, 0)
}

impl<'a> Words<'a> {
    /// Scan `line` from byte offset `cursor`
    pub fn starting_at(line: &'a str, cursor: usize) -> Self {
        Self {
            line,
            cursor,
            failed: false,
        }
    }

    /// Byte offset of the next unread character
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Words<'_> {
    type Item = Result<Word>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match next_word(self.line, self.cursor) {
            Ok(Some((word, end))) => {
                tracing::trace!("Word {}{} at column {}", word.letter, word.value, self.cursor);
                self.cursor = end;
                Some(Ok(word))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Read the word starting at `cursor`
///
/// Returns the word and the offset just past its number, or `None` at end of
/// line.
pub fn next_word(line: &str, cursor: usize) -> Result<Option<(Word, usize)>> {
    let Some(letter) = line.get(cursor..).and_then(|rest| rest.chars().next()) else {
        return Ok(None);
    };
    if !letter.is_ascii_uppercase() {
        return Err(GcodeError::ExpectedCommandLetter {
            column: cursor,
            found: letter,
        });
    }
    let (value, end) = read_number(line, cursor + 1)?;
    Ok(Some((Word { letter, value }, end)))
}

/// Read a signed decimal number starting at `start`
///
/// Accepts an optional sign, digits with an optional fractional part (at
/// least one digit overall) and an optional exponent. An `E` that is not
/// followed by exponent digits is left unread. Returns the value and the
/// offset just past the last consumed character.
pub fn read_number(line: &str, start: usize) -> Result<(f64, usize)> {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let digits_from = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = start;
    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut digit_count = int_end - i;
    i = int_end;
    if i < len && bytes[i] == b'.' {
        let frac_end = digits_from(i + 1);
        digit_count += frac_end - (i + 1);
        i = frac_end;
    }
    if digit_count == 0 {
        return Err(GcodeError::BadNumberFormat { column: start });
    }

    if i < len && (bytes[i] == b'E' || bytes[i] == b'e') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }

    let value = line[start..i]
        .parse::<f64>()
        .map_err(|_| GcodeError::BadNumberFormat { column: start })?;
    Ok((value, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &str) -> Result<Vec<(char, f64)>> {
        words(line)
            .map(|w| w.map(|w| (w.letter, w.value)))
            .collect()
    }

    #[test]
    fn test_simple_line() {
        assert_eq!(
            collect("G1X10.5Y-3F600").unwrap(),
            vec![('G', 1.0), ('X', 10.5), ('Y', -3.0), ('F', 600.0)]
        );
    }

    #[test]
    fn test_empty_line_has_no_words() {
        assert!(collect("").unwrap().is_empty());
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(read_number("+.5", 0).unwrap(), (0.5, 3));
        assert_eq!(read_number("7.", 0).unwrap(), (7.0, 2));
        assert_eq!(read_number("-0.25X", 0).unwrap(), (-0.25, 5));
        assert_eq!(read_number("1E2", 0).unwrap(), (100.0, 3));
        assert_eq!(read_number("2.5e-1", 0).unwrap(), (0.25, 6));
    }

    #[test]
    fn test_dangling_exponent_is_left_unread() {
        assert_eq!(read_number("1E", 0).unwrap(), (1.0, 1));
        assert_eq!(read_number("3EX", 0).unwrap(), (3.0, 1));
    }

    #[test]
    fn test_letter_without_number() {
        let err = collect("G1X").unwrap_err();
        assert_eq!(err, GcodeError::BadNumberFormat { column: 3 });

        assert!(read_number("-", 0).is_err());
        assert!(read_number(".", 0).is_err());
        assert!(read_number("-.Y", 0).is_err());
    }

    #[test]
    fn test_non_letter_start() {
        let err = collect("G1 X2").unwrap_err();
        assert_eq!(
            err,
            GcodeError::ExpectedCommandLetter {
                column: 2,
                found: ' '
            }
        );

        let err = collect("g1").unwrap_err();
        assert!(matches!(err, GcodeError::ExpectedCommandLetter { found: 'g', .. }));
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let mut it = words("X1Y#Z2");
        assert!(it.next().unwrap().is_ok());
        assert!(it.next().unwrap().is_err());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_restart_from_cursor() {
        let mut it = Words::starting_at("/G1X2", 1);
        assert_eq!(it.next().unwrap().unwrap().letter, 'G');
        assert_eq!(it.cursor(), 3);
        assert_eq!(it.next().unwrap().unwrap().value, 2.0);
    }

    #[test]
    fn test_each_scan_is_independent() {
        let line = "M3S1000";
        let first: Vec<_> = words(line).collect();
        let second: Vec<_> = words(line).collect();
        assert_eq!(first, second);
    }
}
