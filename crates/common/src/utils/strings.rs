use std::fmt::Write;

/// Encodes a slice of bytes into a lowercase hex string, without a `0x` prefix
///
/// ```
/// use batchcall_common::utils::strings::encode_hex;
///
/// let bytes = vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100];
/// let result = encode_hex(&bytes);
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::new(), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Shortens a string to at most `max` characters by replacing its middle with `...`
///
/// ```
/// use batchcall_common::utils::strings::shorten;
///
/// assert_eq!(shorten("0x0123456789abcdef", 10), "0x01...def");
/// assert_eq!(shorten("0x1234", 10), "0x1234");
/// ```
pub fn shorten(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max || max < 5 {
        return s.to_string();
    }

    let keep = max - 3;
    let head = keep.div_ceil(2);
    let tail = keep - head;

    format!(
        "{}...{}",
        chars[..head].iter().collect::<String>(),
        chars[chars.len() - tail..].iter().collect::<String>()
    )
}
