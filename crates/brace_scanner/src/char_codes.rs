//! Character classes used by the scanner.

/// Check if a character is a line terminator.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

/// Check if a character is whitespace (not line break).
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{FEFF}' // BOM
    )
}

#[inline]
pub fn is_white_space_like(ch: char) -> bool {
    is_line_break(ch) || is_white_space_single_line(ch)
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// Check if a character can start an identifier.
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_'
        || ch.is_ascii_alphabetic()
        || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can be part of an identifier.
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphanumeric()
        || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_continue(ch))
}

/// Punctuation that counts as whitespace on the left of an operator.
#[inline]
pub fn is_left_delimiter(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{' | ',' | ';' | ':')
}

/// Punctuation that counts as whitespace on the right of an operator.
#[inline]
pub fn is_right_delimiter(ch: char) -> bool {
    matches!(ch, ')' | ']' | '}' | ',' | ';' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_chars() {
        assert!(is_identifier_start('f'));
        assert!(is_identifier_start('_'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(!is_identifier_start('$'));
        assert!(is_identifier_part('$'));
        assert!(is_identifier_part('9'));
    }

    #[test]
    fn test_delimiters() {
        assert!(is_left_delimiter('('));
        assert!(!is_left_delimiter(')'));
        assert!(is_right_delimiter(')'));
        assert!(is_right_delimiter(':'));
        assert!(!is_right_delimiter('.'));
    }
}
