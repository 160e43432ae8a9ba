//! URL slugs for clinic pages.
//!
//! A slug is lowercase ASCII letters, digits, `_` and single interior hyphens, e.g.
//! `smile-dental-berlin`.

use std::collections::HashSet;

/// Derives a slug from a display name.
///
/// Characters other than ASCII word characters, whitespace and `-` are dropped; runs of
/// whitespace and hyphens become one hyphen; hyphens never lead or trail.
///
/// ```rust
/// use clinic_directory::slug::generate_slug;
///
/// assert_eq!(generate_slug("  Smile & Care -- Dental! "), "smile-care-dental");
/// assert_eq!(generate_slug("Zahnarzt Müller"), "zahnarzt-mller");
/// ```
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derives a slug that is absent from `existing`.
///
/// Tries the plain slug first, then `<slug>-1`, `<slug>-2`, ... When the name yields no slug
/// characters at all the candidates are the bare counters `1`, `2`, ... so the result is
/// never empty.
pub fn generate_unique_slug(name: &str, existing: &HashSet<String>) -> String {
    let base = generate_slug(name);
    if !base.is_empty() && !existing.contains(&base) {
        return base;
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = if base.is_empty() {
            counter.to_string()
        } else {
            format!("{base}-{counter}")
        };
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Return `true` when `value` has the shape [`generate_slug`] produces.
pub fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value) && has_clean_hyphens(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-')
}

fn has_clean_hyphens(value: &str) -> bool {
    !value.starts_with('-') && !value.ends_with('-') && !value.contains("--")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn taken(slugs: &[&str]) -> HashSet<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case::plain("Smile Dental", "smile-dental")]
    #[case::padded("   Smile   Dental   ", "smile-dental")]
    #[case::punctuation("Dr. Smith's Clinic!", "dr-smiths-clinic")]
    #[case::hyphen_runs("North -- South", "north-south")]
    #[case::edge_hyphens("-Dental-", "dental")]
    #[case::underscore("clinic_one", "clinic_one")]
    #[case::non_ascii("Clínica Dental Ñandú", "clnica-dental-and")]
    #[case::only_symbols("!!!", "")]
    #[case::empty("", "")]
    fn test_generate_slug(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(generate_slug(name), expected);
    }

    #[test]
    fn test_unique_slug_appends_counter() {
        assert_eq!(generate_unique_slug("Smile Dental", &taken(&[])), "smile-dental");
        assert_eq!(
            generate_unique_slug("Smile Dental", &taken(&["smile-dental"])),
            "smile-dental-1"
        );
        assert_eq!(
            generate_unique_slug(
                "Smile Dental",
                &taken(&["smile-dental", "smile-dental-1", "smile-dental-2"])
            ),
            "smile-dental-3"
        );
    }

    #[test]
    fn test_unique_slug_for_empty_base() {
        assert_eq!(generate_unique_slug("???", &taken(&[])), "1");
        assert_eq!(generate_unique_slug("???", &taken(&["1", "2"])), "3");
    }

    #[rstest]
    #[case("smile-dental", true)]
    #[case("clinic_42", true)]
    #[case("", false)]
    #[case(" smile", false)]
    #[case("Smile", false)]
    #[case("-smile", false)]
    #[case("smile-", false)]
    #[case("smile--dental", false)]
    #[case("smile dental", false)]
    fn test_is_valid_slug(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }

    proptest! {
        #[test]
        fn prop_slug_shape(name in "\\PC{0,40}") {
            let slug = generate_slug(&name);
            prop_assert!(slug.is_empty() || is_valid_slug(&slug), "bad slug {:?}", slug);
        }

        #[test]
        fn prop_unique_slug_is_fresh(
            name in "[A-Za-z !-]{0,20}",
            existing in proptest::collection::hash_set("[a-z-]{0,12}(-[0-9])?", 0..20),
        ) {
            let slug = generate_unique_slug(&name, &existing);
            prop_assert!(!existing.contains(&slug));
            prop_assert!(!slug.is_empty());
        }

        #[test]
        fn prop_unique_slug_with_own_collisions(name in "[A-Za-z ]{1,20}", taken in 0usize..10) {
            let base = generate_slug(&name);
            let mut existing: HashSet<String> = HashSet::new();
            if !base.is_empty() {
                existing.insert(base.clone());
                for n in 1..=taken {
                    existing.insert(format!("{base}-{n}"));
                }
            }
            let slug = generate_unique_slug(&name, &existing);
            prop_assert!(!existing.contains(&slug));
        }
    }
}
