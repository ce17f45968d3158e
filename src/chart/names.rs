//! Type-name normalization shared by the parser and the calculator.

/// Title-case a type name: within every whitespace-separated token, the first word
/// character is uppercased and everything after it is lowercased.
/// `"FIRE"` -> `"Fire"`, `"hot BUNS"` -> `"Hot Buns"`, `"(ghost"` -> `"(Ghost"`.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            in_word = false;
            out.push(c);
        } else if in_word {
            out.extend(c.to_lowercase());
        } else if is_word_char(c) {
            in_word = true;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Text that stands for an empty defending slot rather than a type: `""`, `-` or `none`.
pub fn is_no_type_spelling(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("none")
}

/// Key used for case-insensitive uniqueness checks.
pub fn fold_key(name: &str) -> String {
    name.to_lowercase()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_shouting_and_mixed_case() {
        assert_eq!(title_case("FIRE"), "Fire");
        assert_eq!(title_case("aPpLe"), "Apple");
        assert_eq!(title_case("HOT BUNS"), "Hot Buns");
        assert_eq!(title_case("  sPaCe  age "), "  Space  Age ");
    }

    #[test]
    fn title_case_skips_leading_punctuation() {
        assert_eq!(title_case("(ghost"), "(Ghost");
        assert_eq!(title_case("???"), "???");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_is_idempotent() {
        for name in ["FIRE", "water", "Hot BUNS", "(ghost) TYPE", "ÉLECTRIQUE", "x_RAY"] {
            let once = title_case(name);
            assert_eq!(title_case(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn no_type_spellings() {
        for raw in ["", "  ", "-", "none", "NONE", " None "] {
            assert!(is_no_type_spelling(raw), "{raw:?}");
        }
        for raw in ["Fire", "Nones", "--"] {
            assert!(!is_no_type_spelling(raw), "{raw:?}");
        }
    }

    #[test]
    fn fold_key_ignores_case() {
        assert_eq!(fold_key("Fire"), fold_key("fIRE"));
    }
}
