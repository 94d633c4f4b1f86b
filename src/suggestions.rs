//! # Error Suggestions
//!
//! Helpers that build CLI error messages with hints. An error should say
//! what went wrong and how to fix it.
//!
//! ```
//! use std::path::Path;
//!
//! let error = devfile::suggestions::devfile_not_found(Path::new("devfile.yaml"));
//! assert!(error.to_string().contains("hint:"));
//! ```

use std::path::Path;

/// The devfile to operate on does not exist.
pub fn devfile_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Devfile not found: {path}\n\n\
         hint: Run the command from the directory containing devfile.yaml\n\
         hint: Use -f/--file to specify a different path\n\
         hint: Set the DEVFILE_PATH environment variable",
        path = path.display()
    )
}

/// Generate an error for an invalid glob pattern.
pub fn invalid_glob(pattern: &str, error: &glob::PatternError) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid glob pattern '{pattern}': {error}\n\n\
         hint: Use * to match any run of characters and ? for a single character\n\
         hint: Use [abc] for character classes, [!abc] to negate"
    )
}

/// A `KEY=VALUE` argument without `=` or with an empty key.
pub fn invalid_assignment(arg: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid assignment '{arg}': expected KEY=VALUE\n\n\
         hint: Quote values that contain spaces, e.g. 'greeting=hello world'"
    )
}

/// An unknown `--kind` value for a listing.
///
/// `valid` holds the accepted kinds for the listed collection.
pub fn unknown_kind(kind: &str, target: &str, valid: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(&kind.to_lowercase(), valid)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown kind '{kind}' for {target}{did_you_mean}\n\n\
         Valid kinds are: {kinds}",
        kinds = valid.join(", ")
    )
}

/// Top-level variables requested on a schema that does not have them.
pub fn variables_unsupported(version: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Top-level variables are not supported in schema version {version}\n\n\
         hint: Set schemaVersion to 2.1.0 or later to use variables"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (a_len, b_len) = (a_chars.len(), b_chars.len());

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut previous: Vec<usize> = (0..=b_len).collect();
    let mut current = vec![0usize; b_len + 1];

    for i in 1..=a_len {
        current[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            current[j] = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_len]
}
