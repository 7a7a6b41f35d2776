//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation. Dictionaries are
//! written one entry per line in insertion order:
//!
//! ```text
//! <<
//! /Type /Page
//! /MediaBox [0 0 612 792]
//! >>
//! ```

use crate::object::{Dictionary, Object, ObjectRef};
use log::warn;
use std::io::Write;

/// Serializer for PDF objects.
///
/// Converts PDF Object types to their byte representation following
/// the PDF specification syntax rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_object(&mut buf, obj);
        buf
    }

    /// Serialize an object to a string (for debugging).
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        String::from_utf8_lossy(&self.serialize(obj)).to_string()
    }

    /// Write an indirect object definition without stream data.
    ///
    /// Format: `{id} 0 obj\n{dict}\nendobj\n`
    pub fn write_indirect<W: Write>(
        &self,
        w: &mut W,
        id: u32,
        dict: &Dictionary,
    ) -> std::io::Result<()> {
        writeln!(w, "{} 0 obj", id)?;
        self.write_dictionary(w, dict)?;
        write!(w, "\nendobj\n")
    }

    /// Write an indirect stream object.
    ///
    /// `Length` (and `Filter`, when given) are added to a copy of `dict`;
    /// the stored dictionary is left untouched. Stream bytes are taken from
    /// `chunks` in order.
    ///
    /// Format: `{id} 0 obj\n{dict}\nstream\n{bytes}\nendstream\nendobj\n`
    pub fn write_stream_object<W: Write>(
        &self,
        w: &mut W,
        id: u32,
        dict: &Dictionary,
        filter: Option<&str>,
        chunks: &[&[u8]],
    ) -> std::io::Result<()> {
        let length: usize = chunks.iter().map(|c| c.len()).sum();

        let mut dict_with_length = dict.clone();
        if let Some(filter) = filter {
            dict_with_length.insert("Filter".to_string(), Object::Name(filter.to_string()));
        }
        dict_with_length.insert("Length".to_string(), Object::Integer(length as i64));

        writeln!(w, "{} 0 obj", id)?;
        self.write_dictionary(w, &dict_with_length)?;
        write!(w, "\nstream\n")?;
        for chunk in chunks {
            w.write_all(chunk)?;
        }
        write!(w, "\nendstream\nendobj\n")
    }

    /// Write an object to a buffer.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" }),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => self.write_real(w, *r),
            Object::String(s) => write_text_literal(w, s),
            Object::Literal(s) => w.write_all(s.as_bytes()),
            Object::Name(n) => self.write_name(w, n),
            Object::Array(arr) => self.write_array(w, arr),
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Reference(r) => write!(w, "{}", r),
        }
    }

    /// Write a real number in its shortest form: integral values print
    /// without a fraction, others with up to 5 decimals.
    fn write_real<W: Write>(&self, w: &mut W, value: f64) -> std::io::Result<()> {
        if !value.is_finite() {
            warn!("Non-finite number {} written as 0", value);
            return write!(w, "0");
        }
        if value.fract() == 0.0 {
            write!(w, "{}", value as i64)
        } else {
            let formatted = format!("{:.5}", value);
            let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
            write!(w, "{}", trimmed)
        }
    }

    /// Write a PDF name.
    ///
    /// Names start with `/` and escape special characters with `#xx`.
    fn write_name<W: Write>(&self, w: &mut W, name: &str) -> std::io::Result<()> {
        write!(w, "/")?;
        for byte in name.bytes() {
            match byte {
                b'!'
                | b'"'
                | b'$'..=b'&'
                | b'\''..=b'.'
                | b'0'..=b'9'
                | b';'
                | b'<'
                | b'>'
                | b'?'
                | b'@'
                | b'A'..=b'Z'
                | b'^'..=b'z'
                | b'|'
                | b'~' => {
                    w.write_all(&[byte])?;
                },
                _ => {
                    write!(w, "#{:02X}", byte)?;
                },
            }
        }
        Ok(())
    }

    /// Write a PDF array.
    fn write_array<W: Write>(&self, w: &mut W, arr: &[Object]) -> std::io::Result<()> {
        write!(w, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            self.write_object(w, obj)?;
        }
        write!(w, "]")
    }

    /// Write a PDF dictionary, one entry per line, in insertion order.
    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dictionary) -> std::io::Result<()> {
        writeln!(w, "<<")?;
        for (key, value) in dict {
            self.write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value)?;
            writeln!(w)?;
        }
        write!(w, ">>")
    }
}

/// Escape text for use inside a PDF literal string (without the parentheses).
///
/// Backslash, parentheses, CR and LF are backslash-escaped. Everything else
/// passes through as UTF-8, so non-ASCII text ends up as raw multi-byte
/// sequences.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Write `text` as an escaped literal string `(...)`.
pub fn write_text_literal<W: Write>(w: &mut W, text: &str) -> std::io::Result<()> {
    write!(w, "(")?;
    w.write_all(escape_text(text).as_bytes())?;
    write!(w, ")")
}

/// Helper functions for building PDF objects.
impl ObjectSerializer {
    /// Create a Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// Create a text String object (escaped on output).
    pub fn string(s: &str) -> Object {
        Object::String(s.to_string())
    }

    /// Create an Integer object.
    pub fn integer(i: i64) -> Object {
        Object::Integer(i)
    }

    /// Create a Real object.
    pub fn real(r: f64) -> Object {
        Object::Real(r)
    }

    /// Create an Array object.
    pub fn array(items: Vec<Object>) -> Object {
        Object::Array(items)
    }

    /// Create a Dictionary object.
    pub fn dict(entries: Vec<(&str, Object)>) -> Object {
        Object::Dictionary(Self::dictionary(entries))
    }

    /// Create an ordered dictionary from entries.
    pub fn dictionary(entries: Vec<(&str, Object)>) -> Dictionary {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Create a Reference object.
    pub fn reference(r: ObjectRef) -> Object {
        Object::Reference(r)
    }

    /// Create a rectangle array [x, y, width, height] -> [llx, lly, urx, ury].
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }
}
