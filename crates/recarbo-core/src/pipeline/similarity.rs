//! Approximate string similarity scoring.

/// Scores textual closeness between a candidate line and a catalog name.
///
/// Implementations must be deterministic: the same pair of strings always
/// produces the same score, so repeated pipeline runs yield identical
/// reports.
pub trait SimilarityScorer: Send + Sync {
    /// Similarity between `a` and `b` on a 0-100 scale.
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Token-set ratio scorer.
///
/// Both strings are lowercased and split into alphanumeric tokens. The
/// shared tokens, shared-plus-left and shared-plus-right token strings are
/// compared pairwise with a normalized Levenshtein ratio and the best of
/// the three comparisons wins. Word order and repeated tokens do not affect
/// the score, so "Milk 2L" scores 100 against "Milk".
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetScorer;

impl SimilarityScorer for TokenSetScorer {
    fn score(&self, a: &str, b: &str) -> u8 {
        token_set_ratio(a, b)
    }
}

/// Sorted, deduplicated lowercase tokens of a string.
fn tokens(s: &str) -> Vec<String> {
    let mut tokens: Vec<String> = s
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    tokens.sort();
    tokens.dedup();
    tokens
}

fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a = tokens(a);
    let tokens_b = tokens(b);

    // Strings with no alphanumeric content fall back to exact comparison.
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return if !a.trim().is_empty() && a.trim() == b.trim() {
            100
        } else {
            0
        };
    }

    let shared: Vec<&str> = tokens_a
        .iter()
        .filter(|t| tokens_b.contains(*t))
        .map(String::as_str)
        .collect();
    let only_a: Vec<&str> = tokens_a
        .iter()
        .filter(|t| !tokens_b.contains(*t))
        .map(String::as_str)
        .collect();
    let only_b: Vec<&str> = tokens_b
        .iter()
        .filter(|t| !tokens_a.contains(*t))
        .map(String::as_str)
        .collect();

    let base = shared.join(" ");
    let combined_a = join_nonempty(&base, &only_a.join(" "));
    let combined_b = join_nonempty(&base, &only_b.join(" "));

    ratio(&base, &combined_a)
        .max(ratio(&base, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{} {}", a, b),
    }
}

/// Normalized Levenshtein ratio on a 0-100 scale.
fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return if a.is_empty() { 0 } else { 100 };
    }
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0;
    }

    let distance = levenshtein(a, b);
    let max_len = len_a.max(len_b);
    (100.0 * (1.0 - distance as f64 / max_len as f64)).round() as u8
}

/// Character-level edit distance, single rolling row.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
