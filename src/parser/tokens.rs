//! Tokenizer: free-form input text → (byte, token) pairs
//!
//! Input is split on commas, semicolons, and whitespace.  Each token
//! expands to one or more raw bytes:
//! - quoted strings (`"HELLO"`, `'HI'`) expand to their character bytes
//! - numeric literals (`0x12`, `34H`, bare 1–2 hex digits, plain
//!   decimal) expand to their minimal little-endian byte sequence,
//!   with value 0 producing a single zero byte
//! - anything else expands to its raw character bytes
//!
//! Every produced byte carries its originating token, so a multi-byte
//! token contributes one pair per byte and classification sees the
//! same token for each of them.

/// One input byte together with the token it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputByte {
    pub value: u8,
    pub token: String,
}

/// Expand input text into its byte/token pairs
pub fn parse_input(text: &str) -> Vec<InputByte> {
    let mut out = Vec::new();
    for token in text
        .trim()
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        for value in expand_token(token) {
            out.push(InputByte {
                value,
                token: token.to_string(),
            });
        }
    }
    out
}

/// Expand a single token into its raw bytes
fn expand_token(token: &str) -> Vec<u8> {
    if let Some(inner) = strip_quotes(token) {
        return inner.chars().map(char_byte).collect();
    }
    if let Some(value) = numeric_value(token) {
        return value_bytes(value);
    }
    token.chars().map(char_byte).collect()
}

/// Return the quoted token's contents, if it is quoted
fn strip_quotes(token: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if token.len() >= 2 && token.starts_with(quote) && token.ends_with(quote) {
            return Some(&token[1..token.len() - 1]);
        }
    }
    None
}

/// Parse the numeric literal forms: `0x..`, `..H`, bare 1–2 hex
/// digits, or plain decimal digits
fn numeric_value(token: &str) -> Option<u128> {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return u128::from_str_radix(hex, 16).ok();
        }
        return None;
    }
    if let Some(hex) = token.strip_suffix('H').or_else(|| token.strip_suffix('h')) {
        if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return u128::from_str_radix(hex, 16).ok();
        }
        return None;
    }
    // Bare 1-2 hex digits take precedence over decimal, so "12" is 0x12
    if (1..=2).contains(&token.len()) && token.chars().all(|c| c.is_ascii_hexdigit()) {
        return u128::from_str_radix(token, 16).ok();
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse().ok();
    }
    None
}

/// Minimal little-endian byte sequence for a value (0 → one zero byte)
fn value_bytes(mut value: u128) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }
    let mut bytes = Vec::new();
    while value > 0 {
        bytes.push((value & 0xFF) as u8);
        value >>= 8;
    }
    bytes
}

/// Map a character to one byte, replacing anything outside latin-1
fn char_byte(c: char) -> u8 {
    if (c as u32) <= 0xFF {
        c as u32 as u8
    } else {
        b'?'
    }
}
