use std::fs;
use std::path::Path;

use num_bigint::BigUint;

use crate::rsa::error::RsaError;
use crate::rsa::keys::{Key, KeyKind};

fn read_integer(data: &[u8]) -> Result<(BigUint, &[u8]), RsaError> {
    if data.len() < 4 {
        return Err(RsaError::Malformed("truncated length prefix".to_string()));
    }
    let mut len = [0u8; 4];
    len.copy_from_slice(&data[..4]);
    let len = u32::from_be_bytes(len) as usize;
    let body = &data[4..];
    if body.len() < len {
        return Err(RsaError::Malformed("truncated integer body".to_string()));
    }
    Ok((BigUint::from_bytes_be(&body[..len]), &body[len..]))
}

/// Parse a container back into a key of the expected kind.
///
/// Scans for the BEGIN/END marker lines of that kind, joins the lines
/// strictly between them with their terminators stripped, base64-decodes,
/// then reads `(n, exponent)` in order.
pub fn decode_key(container: &[u8], kind: KeyKind) -> Result<Key, RsaError> {
    let text = std::str::from_utf8(container)
        .map_err(|_| RsaError::KeyNotFound(kind))?;
    let begin = kind.begin_marker();
    let end = kind.end_marker();
    let mut body = String::new();
    let (mut seen_begin, mut seen_end) = (false, false);
    let mut inside = false;
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line == begin {
            seen_begin = true;
            inside = true;
        } else if line == end {
            seen_end = true;
            inside = false;
        } else if inside {
            body.push_str(line);
        }
    }
    if !seen_begin || !seen_end {
        return Err(RsaError::KeyNotFound(kind));
    }
    let payload = base64::decode(&body)?;
    let (n, rest) = read_integer(&payload)?;
    let (exponent, rest) = read_integer(rest)?;
    if !rest.is_empty() {
        return Err(RsaError::Malformed("trailing bytes after exponent".to_string()));
    }
    Ok(match kind {
        KeyKind::Public => Key::Public { n, e: exponent },
        KeyKind::Private => Key::Private { n, d: exponent },
    })
}

impl Key {
    pub fn from_file(path: impl AsRef<Path>, kind: KeyKind) -> Result<Key, RsaError> {
        let container = fs::read(path)?;
        decode_key(&container, kind)
    }
}
