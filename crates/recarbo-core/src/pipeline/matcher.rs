//! Similarity-based resolution of candidate lines against the catalog.

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::report::{CatalogEntry, ResolvedItem};

use super::similarity::{SimilarityScorer, TokenSetScorer};

/// Default minimum score a match must exceed.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 70;

/// Outcome of resolving one candidate line.
#[derive(Debug, Clone)]
pub struct LineMatch {
    /// The resolved item: a catalog copy or the unknown placeholder.
    pub item: ResolvedItem,

    /// Best similarity score observed (0-100).
    pub score: u8,

    /// Whether the best score cleared the threshold.
    pub matched: bool,
}

/// Resolves candidate lines to catalog entries by similarity score.
///
/// Resolution never fails: a line that clears the threshold becomes a copy
/// of the winning catalog entry, anything else becomes the zero-emission
/// unknown placeholder.
pub struct ItemMatcher<S = TokenSetScorer> {
    scorer: S,
    threshold: u8,
}

impl ItemMatcher<TokenSetScorer> {
    /// Create a matcher with the default scorer and threshold.
    pub fn new() -> Self {
        Self::with_scorer(TokenSetScorer)
    }
}

impl Default for ItemMatcher<TokenSetScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SimilarityScorer> ItemMatcher<S> {
    /// Create a matcher with a custom scorer.
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    /// Set the match threshold. A candidate resolves to a catalog entry
    /// only when its score is strictly greater than this value.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// The active threshold.
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Find the best-scoring catalog entry for a line.
    ///
    /// Ties resolve to the first entry in catalog load order: a later entry
    /// replaces the current best only on a strictly greater score.
    pub fn best_match<'a>(
        &self,
        line: &str,
        catalog: &'a Catalog,
    ) -> Option<(&'a CatalogEntry, u8)> {
        let mut best: Option<(&CatalogEntry, u8)> = None;
        for entry in catalog.entries() {
            let score = self.scorer.score(line, &entry.item);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((entry, score)),
            }
        }
        best
    }

    /// Resolve a candidate line to a catalog entry or the unknown
    /// placeholder.
    pub fn resolve(&self, line: &str, catalog: &Catalog) -> LineMatch {
        match self.best_match(line, catalog) {
            Some((entry, score)) if score > self.threshold => {
                debug!("Matched '{}' to '{}' (score {})", line, entry.item, score);
                LineMatch {
                    item: ResolvedItem::from_entry(entry),
                    score,
                    matched: true,
                }
            }
            best => {
                let score = best.map(|(_, s)| s).unwrap_or(0);
                debug!("No match for '{}' (best score {})", line, score);
                LineMatch {
                    item: ResolvedItem::unknown(line),
                    score,
                    matched: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog() -> Catalog {
        let source = "\
item,category,co2_per_unit,unit
Milk,Dairy,1.2,liter
Beef,Meat,27.0,kg
Cheese,Dairy,9.8,kg
";
        Catalog::from_reader(source.as_bytes()).unwrap()
    }

    #[test]
    fn test_exact_name_matches() {
        let matcher = ItemMatcher::new();
        let result = matcher.resolve("Milk", &catalog());
        assert!(result.matched);
        assert_eq!(result.score, 100);
        assert_eq!(result.item.item, "Milk");
        assert_eq!(result.item.total_co2, 1.2);
    }

    #[test]
    fn test_fuzzy_line_matches() {
        let matcher = ItemMatcher::new();
        let result = matcher.resolve("Milk 2L", &catalog());
        assert!(result.matched);
        assert_eq!(result.item.item, "Milk");
        assert_eq!(result.item.category, "Dairy");
    }

    #[test]
    fn test_unrelated_line_falls_back_to_unknown() {
        let matcher = ItemMatcher::new();
        let result = matcher.resolve("Garden Hose", &catalog());
        assert!(!result.matched);
        assert_eq!(result.item.item, "Garden Hose");
        assert_eq!(result.item.category, "Unknown");
        assert_eq!(result.item.total_co2, 0.0);
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        struct FixedScorer(u8);
        impl SimilarityScorer for FixedScorer {
            fn score(&self, _: &str, _: &str) -> u8 {
                self.0
            }
        }

        let at_threshold = ItemMatcher::with_scorer(FixedScorer(70)).resolve("x", &catalog());
        assert!(!at_threshold.matched);
        assert_eq!(at_threshold.score, 70);

        let above = ItemMatcher::with_scorer(FixedScorer(71)).resolve("x", &catalog());
        assert!(above.matched);
    }

    #[test]
    fn test_tie_breaks_to_first_catalog_entry() {
        struct FixedScorer(u8);
        impl SimilarityScorer for FixedScorer {
            fn score(&self, _: &str, _: &str) -> u8 {
                self.0
            }
        }

        // Every entry ties; the first in load order must win.
        let matcher = ItemMatcher::with_scorer(FixedScorer(90));
        let result = matcher.resolve("anything", &catalog());
        assert_eq!(result.item.item, "Milk");
    }

    #[test]
    fn test_custom_threshold() {
        let matcher = ItemMatcher::new().with_threshold(99);
        let result = matcher.resolve("Milk 2L", &catalog());
        assert!(result.matched, "score 100 must clear threshold 99");

        let matcher = ItemMatcher::new().with_threshold(100);
        let result = matcher.resolve("Milk 2L", &catalog());
        assert!(!result.matched, "score 100 must not clear threshold 100");
    }
}
