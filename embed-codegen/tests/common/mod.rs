//! Helpers shared by the integration tests: a Go string-literal decoder and
//! a reader for the declarations in a generated file.
#![allow(dead_code)]

use rand::prelude::*;
use std::collections::BTreeMap;

/// Bytes that exercise every branch of the codec.
pub const TRICKY: &[u8] = &[
    b'a', b' ', b'\\', b'"', b'\n', b'\r', b'\t', 0x00, 0x7f, 0xef, 0xbb, 0xbf, 0xe2, 0x82, 0xac,
    0xc3, 0xa9, 0xf0, 0x9f, 0x98, 0x80, 0xff, 0xfe, 0x80, 0xbf, 0xc0, 0xed, 0xa0,
];

/// Seeded generator so failures are reproducible.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random bytes, half drawn from [`TRICKY`] and half uniformly.
pub fn random_bytes(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| match TRICKY.choose(rng) {
            Some(&b) if rng.random_bool(0.5) => b,
            _ => rng.random::<u8>(),
        })
        .collect()
}

/// Decode a Go interpreted string literal, quotes included. Panics on
/// anything the Go compiler would reject.
pub fn unquote(literal: &str) -> Vec<u8> {
    let body = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or_else(|| panic!("not a quoted literal: {literal:?}"));
    let bytes = body.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => panic!("bare newline at offset {i}"),
            b'"' => panic!("unescaped quote at offset {i}"),
            b'\\' => {
                let esc = bytes[i + 1];
                i += 2;
                match esc {
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'v' => out.push(0x0b),
                    b'\\' => out.push(b'\\'),
                    b'"' => out.push(b'"'),
                    b'x' => {
                        out.push(digits(&bytes[i..i + 2], 16) as u8);
                        i += 2;
                    }
                    b'0'..=b'7' => {
                        out.push(digits(&bytes[i - 1..i + 2], 8) as u8);
                        i += 2;
                    }
                    b'u' | b'U' => {
                        let n = if esc == b'u' { 4 } else { 8 };
                        let c = char::from_u32(digits(&bytes[i..i + n], 16))
                            .expect("escaped code point must be valid");
                        out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
                        i += n;
                    }
                    other => panic!("unknown escape \\{}", char::from(other)),
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}

fn digits(text: &[u8], radix: u32) -> u32 {
    let text = std::str::from_utf8(text).expect("ascii digits");
    u32::from_str_radix(text, radix).unwrap_or_else(|e| panic!("bad digits {text:?}: {e}"))
}

/// Decode a value expression: a quoted literal, optionally wrapped in
/// `[]byte(...)`.
pub fn decode_value(expr: &str) -> Vec<u8> {
    match expr.strip_prefix("[]byte(") {
        Some(inner) => unquote(inner.strip_suffix(')').expect("closing paren")),
        None => unquote(expr),
    }
}

/// What a generated file declares.
#[derive(Debug, Default)]
pub struct Generated {
    pub package: String,
    /// Map entries in order: decoded key and the variable it points at.
    pub map: Vec<(String, String)>,
    /// Decoded payload of every value variable.
    pub values: BTreeMap<String, Vec<u8>>,
}

impl Generated {
    /// Resolve the map into key -> payload.
    pub fn files(&self) -> BTreeMap<String, Vec<u8>> {
        self.map
            .iter()
            .map(|(key, var)| (key.clone(), self.values[var].clone()))
            .collect()
    }
}

pub fn parse_generated(source: &str) -> Generated {
    let mut generated = Generated::default();
    let mut in_map = false;
    for line in source.lines() {
        if in_map {
            if line == "}" {
                in_map = false;
                continue;
            }
            let entry = line.strip_prefix('\t').expect("indented map entry");
            let (key, var) = entry.rsplit_once(": ").expect("key: value");
            let key = String::from_utf8(unquote(key)).expect("utf-8 key");
            generated
                .map
                .push((key, var.strip_suffix(',').expect("trailing comma").to_string()));
            continue;
        }
        if let Some(package) = line.strip_prefix("package ") {
            generated.package = package.to_string();
            continue;
        }
        let decl = line
            .strip_prefix("var ")
            .or_else(|| line.strip_prefix('\t'));
        let Some((name, expr)) = decl.and_then(|d| d.split_once(" = ")) else {
            continue;
        };
        if expr.starts_with("map[") {
            in_map = true;
            continue;
        }
        generated.values.insert(name.to_string(), decode_value(expr));
    }
    generated
}
