/// Map keys for multi-file embedding, derived from source paths.
///
/// Keys are computed on the raw bytes of the path, so file names that are
/// not valid UTF-8 still get a distinct key; [`quote_go`] renders the
/// invalid bytes as `\xHH` escapes.
use std::borrow::Cow;
use std::path::{Path, MAIN_SEPARATOR};

use crate::writer::quote_go;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDeriver {
    /// `external/<workspace>/`, the prefix of files from another workspace.
    prefix: Vec<u8>,
    flatten: bool,
}

impl KeyDeriver {
    pub fn new(workspace: &str, flatten: bool) -> Self {
        Self {
            prefix: format!("external/{workspace}/").into_bytes(),
            flatten,
        }
    }

    /// The key for `path` as bytes.
    pub fn key_bytes<'p>(&self, path: &'p Path) -> Cow<'p, [u8]> {
        let path = path.as_os_str().as_encoded_bytes();
        if self.flatten {
            return Cow::Borrowed(base_name(path));
        }
        from_slash(path.strip_prefix(self.prefix.as_slice()).unwrap_or(path))
    }

    /// The unquoted key for `path`, lossily decoded for display.
    pub fn derive(&self, path: &Path) -> String {
        String::from_utf8_lossy(&self.key_bytes(path)).into_owned()
    }

    /// The key for `path` as a Go string literal.
    pub fn quoted(&self, path: &Path) -> String {
        quote_go(self.key_bytes(path))
    }
}

/// Last element of a slash-separated path. Trailing slashes are ignored;
/// an empty path yields `.` and a path of only slashes yields `/`.
pub fn base_name(path: &[u8]) -> &[u8] {
    if path.is_empty() {
        return b".";
    }
    let end = path.iter().rposition(|&b| b != b'/').map_or(0, |i| i + 1);
    let trimmed = &path[..end];
    if trimmed.is_empty() {
        return b"/";
    }
    match trimmed.iter().rposition(|&b| b == b'/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}

fn from_slash(path: &[u8]) -> Cow<'_, [u8]> {
    if MAIN_SEPARATOR == '/' || !path.contains(&b'/') {
        return Cow::Borrowed(path);
    }
    let sep = MAIN_SEPARATOR as u8;
    Cow::Owned(
        path.iter()
            .map(|&b| if b == b'/' { sep } else { b })
            .collect(),
    )
}
