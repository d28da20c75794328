use regex::Regex;

/// Convert an identifier into a space-separated human title.
///
/// A space is inserted at each upper-run → word boundary (`HTMLParser` →
/// `HTML Parser`), each non-upper → upper boundary (`someName` →
/// `some Name`) and each letter → non-letter boundary (`name2` → `name 2`),
/// then the first character is capitalized. Pure and deterministic.
pub fn title_from_identifier(name: &str) -> String {
    let spaced = Regex::new(r"([A-Z])([A-Z][a-z])")
        .unwrap()
        .replace_all(name, "$1 $2");
    let spaced = Regex::new(r"([^A-Z\s])([A-Z])")
        .unwrap()
        .replace_all(&spaced, "$1 $2");
    let spaced = Regex::new(r"([A-Za-z])([^A-Za-z\s])")
        .unwrap()
        .replace_all(&spaced, "$1 $2");
    capitalize(&spaced)
}

/// Capitalize first letter
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
