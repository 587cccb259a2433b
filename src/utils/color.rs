use sha2::{Digest, Sha256};

/// Deterministic display colour for a string: `#` followed by the first six
/// hex digits of the SHA-256 digest of its UTF-8 bytes.
pub fn string_to_color(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("#{:02x}{:02x}{:02x}", digest[0], digest[1], digest[2])
}

#[cfg(test)]
mod tests {
    use super::string_to_color;

    #[test]
    fn same_text_same_color() {
        assert_eq!(string_to_color("firefox"), string_to_color("firefox"));
        assert_ne!(string_to_color("firefox"), string_to_color("emacs"));
    }

    #[test]
    fn matches_known_digest_prefix() {
        // sha256("") = e3b0c442...
        assert_eq!(string_to_color(""), "#e3b0c4");
        // sha256("abc") = ba7816bf...
        assert_eq!(string_to_color("abc"), "#ba7816");
    }
}
