//! Grammar predicates from RFC 3986 (URIs) and RFC 7230 (messages).
//!
//! Every production is a plain function over bytes or strings. Value objects
//! call these at construction and reject anything that does not match.

use crate::error::{Component, HttpError, Result};

/// `ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// `"!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
pub const fn is_sub_delim(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

/// `unreserved / sub-delims / ":" / "@"` (percent escapes handled separately)
pub const fn is_pchar(b: u8) -> bool {
    is_unreserved(b) || is_sub_delim(b) || matches!(b, b':' | b'@')
}

/// `"!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA`
pub const fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// `VCHAR / obs-text`
pub const fn is_field_vchar(b: u8) -> bool {
    matches!(b, 0x21..=0x7e | 0x80..=0xff)
}

/// Whether `s` consists of bytes accepted by `allowed` and well-formed
/// `"%" HEXDIG HEXDIG` escapes.
pub fn is_escaped(s: &str, allowed: impl Fn(u8) -> bool) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes.get(i + 1..i + 3);
                if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                    return false;
                }
                i += 3;
            }
            b if allowed(b) => i += 1,
            _ => return false,
        }
    }
    true
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub fn is_scheme(s: &str) -> bool {
    let mut bytes = s.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_alphabetic())
        && bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}

/// `*( unreserved / pct-encoded / sub-delims / ":" )`
pub fn is_userinfo(s: &str) -> bool {
    is_escaped(s, |b| is_unreserved(b) || is_sub_delim(b) || b == b':')
}

/// `IP-literal / IPv4address / reg-name`
///
/// IPv4 addresses are a subset of reg-name. IP literals are checked loosely:
/// brackets around hex digits, colons and dots, or an `IPvFuture`.
pub fn is_host(s: &str) -> bool {
    match s.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']').is_some_and(is_ip_literal),
        None => is_escaped(s, |b| is_unreserved(b) || is_sub_delim(b)),
    }
}

fn is_ip_literal(s: &str) -> bool {
    if let Some(future) = s.strip_prefix(['v', 'V']) {
        return future.split_once('.').is_some_and(|(version, rest)| {
            !version.is_empty()
                && version.bytes().all(|b| b.is_ascii_hexdigit())
                && !rest.is_empty()
                && rest
                    .bytes()
                    .all(|b| is_unreserved(b) || is_sub_delim(b) || b == b':')
        });
    }
    s.contains(':') && s.bytes().all(|b| b.is_ascii_hexdigit() || b == b':' || b == b'.')
}

/// `*DIGIT`, within the range of a TCP port.
pub fn is_port(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && s.parse::<u16>().is_ok()
}

/// `*( pchar / "/" )`
pub fn is_path(s: &str) -> bool {
    is_escaped(s, |b| is_pchar(b) || b == b'/')
}

/// `*( pchar / "/" / "?" )`
pub fn is_query(s: &str) -> bool {
    is_escaped(s, |b| is_pchar(b) || matches!(b, b'/' | b'?'))
}

/// `*( pchar / "/" / "?" )`
pub fn is_fragment(s: &str) -> bool {
    is_query(s)
}

/// `1*tchar`
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_tchar)
}

/// `field-vchar [ 1*( SP / HTAB ) field-vchar ]`, or empty.
pub fn is_field_value(s: &str) -> bool {
    let bytes = s.as_bytes();
    let inner_ok = bytes
        .iter()
        .all(|&b| is_field_vchar(b) || b == b' ' || b == b'\t');
    let edges_ok = match (bytes.first(), bytes.last()) {
        (Some(&first), Some(&last)) => is_field_vchar(first) && is_field_vchar(last),
        _ => true,
    };
    inner_ok && edges_ok
}

/// `*( HTAB / SP / VCHAR / obs-text )`
pub fn is_reason_phrase(s: &str) -> bool {
    s.bytes()
        .all(|b| is_field_vchar(b) || b == b' ' || b == b'\t')
}

/// `"HTTP/" DIGIT "." DIGIT`
pub fn is_http_version(s: &str) -> bool {
    matches!(
        s.as_bytes(),
        [b'H', b'T', b'T', b'P', b'/', major, b'.', minor]
            if major.is_ascii_digit() && minor.is_ascii_digit()
    )
}

/// `3DIGIT`
pub fn is_status_code(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}

/// RFC 2046 boundary: 1 to 70 `bchars`, not ending with a space.
pub fn is_boundary(s: &str) -> bool {
    (1..=70).contains(&s.len())
        && !s.ends_with(' ')
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'\'' | b'(' | b')' | b'+' | b'_' | b',' | b'-' | b'.' | b'/' | b':' | b'='
                        | b'?' | b' '
                )
        })
}

/// Check `value` against `predicate`, failing as `component`.
pub fn check(component: Component, value: &str, predicate: impl Fn(&str) -> bool) -> Result<()> {
    if predicate(value) {
        Ok(())
    } else {
        Err(HttpError::syntax(component, value))
    }
}
