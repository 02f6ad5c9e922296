//! Integer literal parsing for reverse tables.
//!
//! Accepts the literal forms found in kernel headers and nothing more:
//! an optional sign, then `0x`/`0X` hex, `0b`/`0B` binary, `0o`/`0O` or a
//! bare leading `0` for octal, otherwise decimal. Underscores may separate
//! digits (or follow a base prefix). The result must fit a signed 32-bit
//! value; anything wider is rejected.

/// Parse a C-style integer literal with auto-detected base.
pub fn parse_c_int(literal: &str) -> Option<i64> {
    let (negative, unsigned) = match literal.as_bytes().first().copied()? {
        b'+' => (false, &literal[1..]),
        b'-' => (true, &literal[1..]),
        _ => (false, literal),
    };

    // Never above u32::MAX, so the cast is lossless.
    let magnitude = parse_unsigned(unsigned)? as i64;
    let value = if negative { -magnitude } else { magnitude };

    (i64::from(i32::MIN)..=i64::from(i32::MAX))
        .contains(&value)
        .then_some(value)
}

fn parse_unsigned(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }

    let (radix, digits) = if bytes[0] == b'0' {
        match bytes.get(1).map(u8::to_ascii_lowercase) {
            Some(b'b') if bytes.len() >= 3 => (2, &s[2..]),
            Some(b'o') if bytes.len() >= 3 => (8, &s[2..]),
            Some(b'x') if bytes.len() >= 3 => (16, &s[2..]),
            _ => (8, &s[1..]),
        }
    } else {
        (10, s)
    };

    let mut value: u64 = 0;
    let mut underscores = false;
    for c in digits.chars() {
        if c == '_' {
            underscores = true;
            continue;
        }
        let d = c.to_digit(radix)?;
        value = value.checked_mul(u64::from(radix))?.checked_add(u64::from(d))?;
        // Anything past 2^32 is already out of range.
        if value > u64::from(u32::MAX) {
            return None;
        }
    }

    if underscores && !underscores_ok(s) {
        return None;
    }

    Some(value)
}

/// Underscores must sit between digits, or right after a base prefix.
fn underscores_ok(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut hex = false;
    // '^' start, '0' digit or prefix, '_' underscore, '!' anything else
    let mut saw = b'^';

    if bytes.len() >= 2
        && bytes[0] == b'0'
        && matches!(bytes[1].to_ascii_lowercase(), b'b' | b'o' | b'x')
    {
        i = 2;
        saw = b'0';
        hex = bytes[1].to_ascii_lowercase() == b'x';
    }

    for &c in &bytes[i..] {
        if c.is_ascii_digit() || (hex && c.is_ascii_hexdigit()) {
            saw = b'0';
            continue;
        }
        if c == b'_' {
            if saw != b'0' {
                return false;
            }
            saw = b'_';
            continue;
        }
        if saw == b'_' {
            return false;
        }
        saw = b'!';
    }

    saw != b'_'
}
