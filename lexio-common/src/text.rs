//! Text utilities shared by the Lexio content tools

/// Generate a URL slug from a title.
///
/// Lowercases, replaces every run of non-alphanumeric ASCII with a single
/// hyphen, and trims leading/trailing hyphens. Non-ASCII characters
/// (accented letters included) are stripped with the surrounding run, so
/// `"Lesson: Au Café!"` becomes `"lesson-au-caf"`.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Count whitespace-delimited words in a text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// First decimal integer embedded in a string, if any.
///
/// `"Module 12: Greetings"` yields `Some(12)`.
pub fn first_integer(text: &str) -> Option<i64> {
    let mut digits = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !digits.is_empty() {
            break;
        }
    }
    digits.parse().ok()
}

/// Syntactic plausibility check for an email address.
///
/// Accepts `local@domain.tld` shapes only; this gates account creation, it
/// is not an RFC validator.
pub fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2 && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_punctuation_and_accents() {
        assert_eq!(generate_slug("Lesson: Au Café!"), "lesson-au-caf");
    }

    #[test]
    fn slug_is_deterministic() {
        let a = generate_slug("Spanish Stories 1");
        let b = generate_slug("Spanish Stories 1");
        assert_eq!(a, b);
        assert_eq!(a, "spanish-stories-1");
    }

    #[test]
    fn slug_has_no_edge_hyphens() {
        assert_eq!(generate_slug("  ¡Hola! "), "hola");
        assert_eq!(generate_slug("---"), "");
    }

    #[test]
    fn first_integer_finds_leading_run() {
        assert_eq!(first_integer("Course 3: Numbers 1-10"), Some(3));
        assert_eq!(first_integer("No numbers here"), None);
    }

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("marie@example.com"));
        assert!(!is_plausible_email("marie"));
        assert!(!is_plausible_email("marie@localhost"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("marie@.fr"));
    }
}
