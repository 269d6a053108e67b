/// Indentation-aware line writer for emitting Go source code into any sink.
/// Uses tab indentation per gofmt.
use std::io::{self, Read, Write};

use crate::escape;

pub struct CodeWriter<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> CodeWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, depth: 0 }
    }

    /// Write a line at the current indentation level. Empty lines carry no
    /// indentation.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        if !text.is_empty() {
            self.write_indent()?;
            self.out.write_all(text.as_bytes())?;
        }
        self.out.write_all(b"\n")
    }

    /// Open a block: write `text` (e.g. `var (`) and increase indent.
    pub fn open(&mut self, text: &str) -> io::Result<()> {
        self.line(text)?;
        self.depth += 1;
        Ok(())
    }

    /// Close a block: decrease indent and write `text` (e.g. `)` or `}`).
    pub fn close(&mut self, text: &str) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// Begin a line that continues with streamed content.
    pub fn start(&mut self, text: &str) -> io::Result<()> {
        self.write_indent()?;
        self.out.write_all(text.as_bytes())
    }

    /// Finish a line begun with [`CodeWriter::start`].
    pub fn end(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\n")
    }

    /// Stream `reader` into the current line as an escaped string literal
    /// body. Returns the number of input bytes embedded.
    pub fn payload<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<u64> {
        escape::escape_stream(reader, &mut self.out)
    }

    /// Current indentation depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Consume and return the sink.
    pub fn finish(self) -> W {
        self.out
    }

    fn write_indent(&mut self) -> io::Result<()> {
        for _ in 0..self.depth {
            self.out.write_all(b"\t")?;
        }
        Ok(())
    }
}

/// Quote bytes as a Go double-quoted literal, the way `strconv.Quote` does:
/// invalid UTF-8 becomes `\xHH`, and characters Go does not consider
/// printable become `\u`/`\U` escapes. Printability follows Go's rules for
/// every category except unassigned code points, which pass through.
pub fn quote_go(s: impl AsRef<[u8]>) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for chunk in s.utf8_chunks() {
        for c in chunk.valid().chars() {
            push_quoted_char(&mut out, c);
        }
        for b in chunk.invalid() {
            out.push_str(&format!("\\x{b:02x}"));
        }
    }
    out.push('"');
    out
}

fn push_quoted_char(out: &mut String, c: char) {
    match c {
        '\x07' => out.push_str("\\a"),
        '\x08' => out.push_str("\\b"),
        '\x0c' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\x0b' => out.push_str("\\v"),
        '\\' => out.push_str("\\\\"),
        '"' => out.push_str("\\\""),
        c if u32::from(c) < 0x20 || c == '\x7f' => {
            out.push_str(&format!("\\x{:02x}", u32::from(c)));
        }
        c if !is_go_printable(c) => {
            if u32::from(c) < 0x10000 {
                out.push_str(&format!("\\u{:04x}", u32::from(c)));
            } else {
                out.push_str(&format!("\\U{:08x}", u32::from(c)));
            }
        }
        _ => out.push(c),
    }
}

/// Code point ranges Go's `unicode.IsPrint` rejects besides `Cc`: format
/// characters (`Cf`), separators other than ASCII space (`Zs`, `Zl`, `Zp`),
/// private use (`Co`) and noncharacters.
const NOT_PRINTABLE: &[(u32, u32)] = &[
    (0x00a0, 0x00a0),
    (0x00ad, 0x00ad),
    (0x0600, 0x0605),
    (0x061c, 0x061c),
    (0x06dd, 0x06dd),
    (0x070f, 0x070f),
    (0x0890, 0x0891),
    (0x08e2, 0x08e2),
    (0x1680, 0x1680),
    (0x180e, 0x180e),
    (0x2000, 0x200f),
    (0x2028, 0x202f),
    (0x205f, 0x2064),
    (0x2066, 0x206f),
    (0x3000, 0x3000),
    (0xe000, 0xf8ff),
    (0xfdd0, 0xfdef),
    (0xfeff, 0xfeff),
    (0xfff9, 0xfffb),
    (0x110bd, 0x110bd),
    (0x110cd, 0x110cd),
    (0x13430, 0x1343f),
    (0x1bca0, 0x1bca3),
    (0x1d173, 0x1d17a),
    (0xe0001, 0xe0001),
    (0xe0020, 0xe007f),
    (0xf0000, 0xffffd),
    (0x100000, 0x10fffd),
];

fn is_go_printable(c: char) -> bool {
    let cp = u32::from(c);
    if c.is_control() || cp & 0xfffe == 0xfffe {
        return false;
    }
    NOT_PRINTABLE
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_err()
}
