//! Wire text of a stream record.
//!
//! Consumers of the stream read records in the "spaced" JSON form: `", "`
//! between items, `": "` between a key and its value, every character outside
//! printable ASCII escaped as `\uXXXX` and floats in shortest round-trip form
//! (`21.5`, `20.0`, `1e+16`, `1.5e-05`). `serde_json`'s compact output differs
//! on all four points, so records go through [`AsciiJsonFormatter`].
//!
//! Numbers arrive as their source text (`arbitrary_precision`), so integers of
//! any size are written digit for digit.

use crate::utils::error::{RelayError, Result};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Decimal exponents outside `[-4, 16)` switch a float to exponent notation.
const MIN_FIXED_EXPONENT: i32 = -4;
const MAX_FIXED_EXPONENT: i32 = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiJsonFormatter;

impl Formatter for AsciiJsonFormatter {
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

    // Quotes, backslashes and control characters never reach here; serde_json
    // routes them through `write_char_escape`.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_float(value).as_bytes())
    }

    fn write_number_str<W>(&mut self, writer: &mut W, value: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(format_number_text(value).as_bytes())
    }
}

/// Normalizes a JSON number literal.
///
/// Integer literals pass through unchanged apart from `-0`, which becomes `0`.
/// Fractional and exponent literals are rounded to `f64` and go through
/// [`format_float`]; literals that overflow `f64` are kept verbatim.
pub fn format_number_text(text: &str) -> String {
    if !text.contains(['.', 'e', 'E']) {
        if text.trim_start_matches('-').bytes().all(|b| b == b'0') {
            return "0".to_string();
        }
        return text.to_string();
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => format_float(value),
        _ => text.to_string(),
    }
}

/// Formats a finite float with the fewest digits that round-trip.
pub fn format_float(value: f64) -> String {
    // `{:e}` already yields the shortest round-trip digits, e.g. "-1.531227249e1".
    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if !(MIN_FIXED_EXPONENT..MAX_FIXED_EXPONENT).contains(&exponent) {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("e{}{:02}", sign, exponent.unsigned_abs()));
    } else if exponent >= 0 {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            out.push_str(&digits);
            out.push_str(&"0".repeat(int_len - digits.len()));
            out.push_str(".0");
        } else {
            out.push_str(&digits[..int_len]);
            out.push('.');
            out.push_str(&digits[int_len..]);
        }
    } else {
        out.push_str("0.");
        out.push_str(&"0".repeat(exponent.unsigned_abs() as usize - 1));
        out.push_str(&digits);
    }

    out
}

/// Serializes `value` into record text using [`AsciiJsonFormatter`].
pub fn encode_record<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::with_capacity(256);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AsciiJsonFormatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| RelayError::EncodeError {
            message: e.to_string(),
        })?;

    String::from_utf8(buf).map_err(|e| RelayError::EncodeError {
        message: e.to_string(),
    })
}
