//! WhatsApp phone-number helpers.
//!
//! The gateway addresses numbers as `whatsapp:+<digits>`. Input may contain spaces, dashes and
//! parentheses, which are stripped.

const WHATSAPP_PREFIX: &str = "whatsapp:";

fn strip_separators(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// `"+34 600-111 (222)"` → `"whatsapp:+34600111222"`. A missing `+` is added.
pub fn format_whatsapp_number(phone: &str) -> String {
    let cleaned = strip_separators(phone);
    if cleaned.starts_with('+') {
        format!("{}{}", WHATSAPP_PREFIX, cleaned)
    } else {
        format!("{}+{}", WHATSAPP_PREFIX, cleaned)
    }
}

/// Removes the `whatsapp:` prefix, if present.
pub fn extract_phone_number(whatsapp_number: &str) -> String {
    whatsapp_number.replacen(WHATSAPP_PREFIX, "", 1)
}

/// True if, after stripping separators, the number is an optional `+` followed by 8 to 15 digits.
pub fn validate_phone_number(phone: &str) -> bool {
    let cleaned = strip_separators(phone);
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    (8..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whatsapp_number() {
        assert_eq!(
            format_whatsapp_number("+34 600-111 (222)"),
            "whatsapp:+34600111222"
        );
        assert_eq!(format_whatsapp_number("5215512345678"), "whatsapp:+5215512345678");
    }

    #[test]
    fn test_extract_phone_number() {
        assert_eq!(extract_phone_number("whatsapp:+34600111222"), "+34600111222");
        assert_eq!(extract_phone_number("+34600111222"), "+34600111222");
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("+34 600 111 222"));
        assert!(validate_phone_number("(55) 1234-5678"));
        assert!(!validate_phone_number("+1234567"));
        assert!(!validate_phone_number("+1234567890123456"));
        assert!(!validate_phone_number("+34 600 ABC 222"));
        assert!(!validate_phone_number(""));
    }
}
