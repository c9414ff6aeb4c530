/// Email shape check used by the contact form.
///
/// This is purely syntactic: `local@domain.tld`, where every part is one or
/// more characters that are neither whitespace nor `@`. It says nothing
/// about whether the address can receive mail.

/// Inline message shown next to the email field while the check fails
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";

/// Returns true if `text` looks like `local@domain.tld`
pub fn is_valid_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && local.chars().all(is_address_char)
        && domain.chars().all(is_address_char)
        && has_inner_dot(domain)
}

fn is_address_char(c: char) -> bool {
    !is_form_whitespace(c) && c != '@'
}

/// Whitespace as browsers see it in form input: the ECMAScript `\s` class.
/// Differs from `char::is_whitespace`: U+FEFF counts, U+0085 does not.
pub fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// True if `text` is empty once form whitespace is trimmed from both ends
pub fn is_blank_field(text: &str) -> bool {
    text.trim_matches(is_form_whitespace).is_empty()
}

/// A dot with at least one character on each side
fn has_inner_dot(domain: &str) -> bool {
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
