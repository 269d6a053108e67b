/// Byte escaping for Go interpreted string literals.
///
/// Within the quotes any character may appear except newline and an
/// unescaped double quote, and backslash escapes are interpreted as in rune
/// literals. NUL and the byte order mark are hex-escaped as well, since a Go
/// compiler may reject either one in source text.
///
/// Valid UTF-8 is copied through one whole code point at a time; anything
/// else is hex-escaped one byte at a time, so arbitrary binary survives the
/// round trip through the compiler unchanged.
use std::fmt;
use std::io::{self, Read, Write};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Longest UTF-8 encoding of a single code point.
const MAX_WIDTH: usize = 4;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// One step of the codec: what a position in the input turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaped<'a> {
    /// Two-character backslash escape standing for one input byte.
    Backslash(&'static str),
    /// `\xHH` standing for one input byte.
    Hex(u8),
    /// A complete code point copied through unchanged.
    Verbatim(&'a str),
}

impl Escaped<'_> {
    /// Number of input bytes this token stands for.
    pub fn consumed(&self) -> usize {
        match self {
            Escaped::Backslash(_) | Escaped::Hex(_) => 1,
            Escaped::Verbatim(s) => s.len(),
        }
    }

    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Escaped::Backslash(s) => out.write_all(s.as_bytes()),
            Escaped::Hex(b) => out.write_all(&hex_escape(*b)),
            Escaped::Verbatim(s) => out.write_all(s.as_bytes()),
        }
    }

    pub fn push_to(&self, out: &mut String) {
        match self {
            Escaped::Backslash(s) => out.push_str(s),
            Escaped::Hex(b) => out.extend(hex_escape(*b).iter().map(|&c| char::from(c))),
            Escaped::Verbatim(s) => out.push_str(s),
        }
    }
}

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Escaped::Backslash(s) => f.write_str(s),
            Escaped::Hex(b) => write!(f, "\\x{b:02x}"),
            Escaped::Verbatim(s) => f.write_str(s),
        }
    }
}

fn hex_escape(b: u8) -> [u8; 4] {
    [
        b'\\',
        b'x',
        HEX_DIGITS[usize::from(b >> 4)],
        HEX_DIGITS[usize::from(b & 0x0f)],
    ]
}

/// Classify the code point starting at `window[0]`.
///
/// Returns `None` when the window is empty, or when it holds only the
/// beginning of a valid multi-byte sequence and `at_eof` is false: the
/// caller has to supply more bytes before a decision can be made. At the end
/// of input a truncated sequence is hex-escaped like any other invalid one.
pub fn classify(window: &[u8], at_eof: bool) -> Option<Escaped<'_>> {
    let &first = window.first()?;
    match first {
        b'\\' => return Some(Escaped::Backslash("\\\\")),
        b'"' => return Some(Escaped::Backslash("\\\"")),
        b'\n' => return Some(Escaped::Backslash("\\n")),
        b'\0' => return Some(Escaped::Hex(0)),
        _ => {}
    }

    let window = &window[..window.len().min(MAX_WIDTH)];
    let valid_len = match std::str::from_utf8(window) {
        Ok(_) => window.len(),
        Err(e) if e.valid_up_to() > 0 => e.valid_up_to(),
        Err(e) if e.error_len().is_none() && !at_eof => return None,
        Err(_) => return Some(Escaped::Hex(first)),
    };
    let Ok(valid) = std::str::from_utf8(&window[..valid_len]) else {
        return Some(Escaped::Hex(first));
    };
    match valid.chars().next() {
        Some(BYTE_ORDER_MARK) | None => Some(Escaped::Hex(first)),
        Some(c) => Some(Escaped::Verbatim(&valid[..c.len_utf8()])),
    }
}

/// Lazy, single-pass escaping of an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct Escape<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Escape<'a> {
    type Item = Escaped<'a>;

    fn next(&mut self) -> Option<Escaped<'a>> {
        let token = classify(self.rest, true)?;
        self.rest = &self.rest[token.consumed()..];
        Some(token)
    }
}

pub fn escape_iter(data: &[u8]) -> Escape<'_> {
    Escape { rest: data }
}

/// Escape a whole payload. The result is always valid UTF-8 since every
/// byte that is not part of a valid code point becomes an ASCII escape.
pub fn escape(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for token in escape_iter(data) {
        token.push_to(&mut out);
    }
    out
}

/// An `io::Write` adapter escaping everything written through it.
///
/// A code point split across two `write` calls is held back until it is
/// complete, so the output never depends on how the input was chunked.
/// Call [`EscapeWriter::finish`] after the last write to flush a trailing
/// incomplete sequence.
pub struct EscapeWriter<W: Write> {
    inner: W,
    pending: [u8; MAX_WIDTH],
    pending_len: usize,
}

impl<W: Write> EscapeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending: [0; MAX_WIDTH],
            pending_len: 0,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Escape any held-back bytes as end of input and return the sink.
    pub fn finish(mut self) -> io::Result<W> {
        let pending = self.pending;
        for token in escape_iter(&pending[..self.pending_len]) {
            token.write_to(&mut self.inner)?;
        }
        self.pending_len = 0;
        Ok(self.inner)
    }
}

impl<W: Write> Write for EscapeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut data = buf;

        if self.pending_len > 0 {
            let held = self.pending_len;
            let take = (MAX_WIDTH - held).min(data.len());
            let mut window = self.pending;
            window[held..held + take].copy_from_slice(&data[..take]);
            let window = &window[..held + take];

            let mut pos = 0;
            while pos < held {
                match classify(&window[pos..], false) {
                    Some(token) => {
                        token.write_to(&mut self.inner)?;
                        pos += token.consumed();
                    }
                    None => {
                        // Still incomplete: everything offered fit in the window.
                        let rest = &window[pos..];
                        self.pending[..rest.len()].copy_from_slice(rest);
                        self.pending_len = rest.len();
                        return Ok(buf.len());
                    }
                }
            }
            self.pending_len = 0;
            data = &data[pos - held..];
        }

        while let Some(token) = classify(data, false) {
            token.write_to(&mut self.inner)?;
            data = &data[token.consumed()..];
        }

        // Whatever is left is the start of a code point cut off by the chunk end.
        self.pending[..data.len()].copy_from_slice(data);
        self.pending_len = data.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Copy `reader` through the codec into `sink`, returning the number of
/// input bytes consumed.
pub fn escape_stream<R: Read + ?Sized, W: Write>(reader: &mut R, sink: W) -> io::Result<u64> {
    let mut writer = EscapeWriter::new(sink);
    let n = io::copy(reader, &mut writer)?;
    writer.finish()?;
    Ok(n)
}
