/// Length of a MAC address written as bare hex digits.
pub const MAC_LEN: usize = 12;

/// Strip everything that is not a hex digit, uppercase the rest and keep at
/// most [`MAC_LEN`] characters. Short input stays short.
pub fn sanitize_mac(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase())
        .take(MAC_LEN)
        .collect()
}

/// True for an already-sanitized, complete MAC.
pub fn is_complete_mac(sanitized: &str) -> bool {
    sanitized.len() == MAC_LEN && sanitized.chars().all(|c| c.is_ascii_hexdigit())
}
