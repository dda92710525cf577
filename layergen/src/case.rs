//! Identifier canonicalization, case conversion and pluralization
//!
//! Every case style is derived from one canonical form: the ordered list of
//! lowercase words returned by [`split_words`]. Because of that, the snake,
//! kebab, camel and Pascal spellings of the same logical name all convert into
//! each other losslessly.
//!
//! Pluralization is a small suffix heuristic, not a linguistic inflector.
//! Irregular nouns are deliberately left alone (`person` becomes `persons`).

/// Split an identifier into lowercase words
///
/// `_`, `-` and space always end the current word. A transition from a
/// non-uppercase character to an uppercase one also ends it, so runs of
/// capitals stay together until the next lowercase-to-uppercase boundary.
///
/// # Examples
///
/// ```
/// use layergen::case::split_words;
/// assert_eq!(split_words("UserProfile"), vec!["user", "profile"]);
/// assert_eq!(split_words("user_profile"), vec!["user", "profile"]);
/// assert_eq!(split_words("userID"), vec!["user", "id"]);
/// assert_eq!(split_words("HTTPServer"), vec!["httpserver"]);
/// assert!(split_words("   ").is_empty());
/// ```
#[must_use]
pub fn split_words(input: &str) -> Vec<String> {
    let input = input.trim();
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for ch in input.chars() {
        if matches!(ch, '_' | '-' | ' ') {
            flush_word(&mut current, &mut words);
            previous = Some(ch);
            continue;
        }

        if ch.is_uppercase() && previous.is_some_and(|p| !p.is_uppercase()) {
            flush_word(&mut current, &mut words);
        }

        current.push(ch);
        previous = Some(ch);
    }
    flush_word(&mut current, &mut words);

    words
}

fn flush_word(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(current.to_lowercase());
        current.clear();
    }
}

/// Uppercase the first character of an already-lowercase word
fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Convert string to camelCase
///
/// ```
/// # use layergen::case::to_camel_case;
/// assert_eq!(to_camel_case("user_profile"), "userProfile");
/// assert_eq!(to_camel_case("UserProfile"), "userProfile");
/// ```
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    let words = split_words(input);
    let mut iter = words.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut result = first.clone();
    for word in iter {
        result.push_str(&title_word(word));
    }
    result
}

/// Convert string to `PascalCase`
///
/// ```
/// # use layergen::case::to_pascal_case;
/// assert_eq!(to_pascal_case("user_profile"), "UserProfile");
/// assert_eq!(to_pascal_case("created-date"), "CreatedDate");
/// ```
#[must_use]
pub fn to_pascal_case(input: &str) -> String {
    split_words(input).iter().map(|w| title_word(w)).collect()
}

/// Convert string to `snake_case`
///
/// ```
/// # use layergen::case::to_snake_case;
/// assert_eq!(to_snake_case("UserProfile"), "user_profile");
/// assert_eq!(to_snake_case("createdDate"), "created_date");
/// ```
#[must_use]
pub fn to_snake_case(input: &str) -> String {
    split_words(input).join("_")
}

/// Convert string to kebab-case
///
/// ```
/// # use layergen::case::to_kebab_case;
/// assert_eq!(to_kebab_case("UserProfile"), "user-profile");
/// ```
#[must_use]
pub fn to_kebab_case(input: &str) -> String {
    split_words(input).join("-")
}

/// Human-readable title: every word capitalised, separated by spaces
///
/// ```
/// # use layergen::case::to_title_case;
/// assert_eq!(to_title_case("UserProfile"), "User Profile");
/// ```
#[must_use]
pub fn to_title_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| title_word(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pluralize a word
///
/// `y` becomes `ies`; words ending in `s`, `x`, `ch` or `sh` take `es`;
/// everything else takes `s`.
///
/// ```
/// # use layergen::case::pluralize;
/// assert_eq!(pluralize("user"), "users");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("box"), "boxes");
/// assert_eq!(pluralize("person"), "persons");
/// ```
#[must_use]
pub fn pluralize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    if let Some(stem) = input.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if ["s", "x", "ch", "sh"].iter().any(|suffix| input.ends_with(suffix)) {
        return format!("{input}es");
    }
    format!("{input}s")
}

/// Singularize a word (inverse of [`pluralize`]'s rule table)
///
/// ```
/// # use layergen::case::singularize;
/// assert_eq!(singularize("users"), "user");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("boxes"), "box");
/// assert_eq!(singularize("class"), "class");
/// ```
#[must_use]
pub fn singularize(input: &str) -> String {
    if let Some(stem) = input.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = input.strip_suffix("es") {
        return stem.to_string();
    }
    if !input.ends_with("ss") {
        if let Some(stem) = input.strip_suffix('s') {
            return stem.to_string();
        }
    }
    input.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_separators() {
        assert_eq!(split_words("user_profile"), vec!["user", "profile"]);
        assert_eq!(split_words("user-profile"), vec!["user", "profile"]);
        assert_eq!(split_words("user profile"), vec!["user", "profile"]);
        assert_eq!(split_words("__user__profile__"), vec!["user", "profile"]);
    }

    #[test]
    fn test_split_case_transitions() {
        assert_eq!(split_words("userProfile"), vec!["user", "profile"]);
        assert_eq!(split_words("UserProfile"), vec!["user", "profile"]);
        assert_eq!(split_words("UserID"), vec!["user", "id"]);
        assert_eq!(split_words("userID"), vec!["user", "id"]);
        assert_eq!(split_words("user2Name"), vec!["user2", "name"]);
    }

    #[test]
    fn test_split_uppercase_runs_are_not_acronym_aware() {
        // A capital run only breaks on a lowercase-to-uppercase boundary.
        assert_eq!(split_words("HTTPRequest"), vec!["httprequest"]);
        assert_eq!(split_words("ID"), vec!["id"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_words("").is_empty());
        assert!(split_words("  \t ").is_empty());
        assert!(split_words("___").is_empty());
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("user_profile"), "userProfile");
        assert_eq!(to_camel_case("User"), "user");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("user_profile"), "UserProfile");
        assert_eq!(to_pascal_case("userID"), "UserId");
        assert_eq!(to_pascal_case("simple"), "Simple");
    }

    #[test]
    fn test_snake_and_kebab_case() {
        assert_eq!(to_snake_case("UserProfile"), "user_profile");
        assert_eq!(to_snake_case("created_date"), "created_date");
        assert_eq!(to_kebab_case("UserProfile"), "user-profile");
        assert_eq!(to_kebab_case("simple"), "simple");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(to_title_case("Post"), "Post");
        assert_eq!(to_title_case("order_line_item"), "Order Line Item");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("post"), "posts");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_pluralize_irregular_nouns_follow_the_heuristic() {
        assert_eq!(pluralize("person"), "persons");
        assert_eq!(pluralize("child"), "childs");
        // `y` after a vowel is not special-cased either
        assert_eq!(pluralize("day"), "daies");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("posts"), "post");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("sheep"), "sheep");
    }

    #[test]
    fn test_plural_round_trip_for_regular_words() {
        for (singular, plural) in [
            ("user", "users"),
            ("category", "categories"),
            ("box", "boxes"),
            ("order", "orders"),
            ("brush", "brushes"),
        ] {
            assert_eq!(pluralize(singular), plural);
            assert_eq!(singularize(plural), singular);
            assert_eq!(pluralize(&singularize(plural)), plural);
            assert_eq!(singularize(&pluralize(singular)), singular);
        }
    }
}
