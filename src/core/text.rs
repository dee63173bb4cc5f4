/// Words too generic to count as a shared clinical category
const GENERIC_WORDS: &[&str] = &[
    "disorder", "disorders", "therapy", "treatment", "related", "issues", "and", "with",
];

/// Shortest word that counts toward a category overlap
const MIN_SIGNIFICANT_LEN: usize = 4;

/// Trim, collapse inner whitespace and lowercase
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `Some` only when the value has visible content
#[inline]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Case-insensitive containment in either direction
pub fn contains_either(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// True when both strings share a word that names a clinical category
pub fn shares_significant_word(a: &str, b: &str) -> bool {
    let b_words: Vec<String> = significant_words(b).collect();
    significant_words(a).any(|w| b_words.contains(&w))
}

fn significant_words(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= MIN_SIGNIFICANT_LEN && !GENERIC_WORDS.contains(&w.as_str()))
}
