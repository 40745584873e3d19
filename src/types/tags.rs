use std::collections::BTreeSet;

/// Sentinel tag: a row carrying it survives every non-empty filter.
pub const ALWAYS_TAG: &str = "always";

/// Separator between tokens in a raw tag column, e.g. `"ai|ml|python"`.
pub const TAG_SEPARATOR: char = '|';

/// Parse a pipe-separated tag string into a set of lowercase tags.
///
/// Tokens are trimmed and lowercased; empty tokens are dropped. An empty
/// input yields an empty set.
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Lowercase a caller-supplied list of wanted tags into a set.
pub fn normalize_wanted<S: AsRef<str>>(wanted: &[S]) -> BTreeSet<String> {
    wanted.iter().map(|t| t.as_ref().to_lowercase()).collect()
}

/// Split CLI-style tag arguments, each of which may itself be comma-separated.
///
/// `["ai,ml", " rust "]` becomes `["ai", "ml", "rust"]`.
pub fn split_tag_args<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
