//! Bounded text helpers for fixed-size display fields.

use core::{fmt, str};

use heapless::String;

/// `fmt::Write` sink over a caller-provided buffer. Output that does not fit
/// is dropped at a character boundary; nothing is written past the bound.
pub struct SliceWriter<'a> {
    out: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> SliceWriter<'a> {
    pub fn new(out: &'a mut [u8]) -> Self {
        Self {
            out,
            len: 0,
            truncated: false,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_str(self) -> &'a str {
        let out: &'a [u8] = self.out;
        str::from_utf8(&out[..self.len]).unwrap_or("")
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        for ch in s.chars() {
            let mut utf8 = [0u8; 4];
            let encoded = ch.encode_utf8(&mut utf8).as_bytes();
            if self.len + encoded.len() > self.out.len() {
                self.truncated = true;
                break;
            }

            self.out[self.len..self.len + encoded.len()].copy_from_slice(encoded);
            self.len += encoded.len();
        }

        Ok(())
    }
}

/// Copies as much of `text` as fits into an `N`-byte string.
pub fn clipped<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::*;

    #[test]
    fn writer_stops_at_bound() {
        let mut buf = [0u8; 8];
        let mut writer = SliceWriter::new(&mut buf);
        write!(writer, "{} {}", "Tomorrow", "9:00").unwrap();
        assert!(writer.is_truncated());
        assert_eq!(writer.into_str(), "Tomorrow");
    }

    #[test]
    fn writer_never_splits_a_character() {
        let mut buf = [0u8; 3];
        let mut writer = SliceWriter::new(&mut buf);
        writer.write_str("aé!").unwrap();
        assert_eq!(writer.into_str(), "aé");

        let mut buf = [0u8; 2];
        let mut writer = SliceWriter::new(&mut buf);
        writer.write_str("aé").unwrap();
        assert_eq!(writer.into_str(), "a");
    }

    #[test]
    fn empty_buffer_yields_empty_text() {
        let mut buf = [0u8; 0];
        let mut writer = SliceWriter::new(&mut buf);
        writer.write_str("Today").unwrap();
        assert_eq!(writer.into_str(), "");
    }

    #[test]
    fn clipped_respects_capacity() {
        let text: String<5> = clipped("Wednesday");
        assert_eq!(text.as_str(), "Wedne");
    }
}
