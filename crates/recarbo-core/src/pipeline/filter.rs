//! Candidate-line filtering for raw OCR text.

/// Substrings that mark a line as receipt noise rather than an item.
const DEFAULT_NOISE_MARKERS: [&str; 3] = ["total", "subtotal", "tax"];

/// Splits raw OCR text into candidate item lines, discarding noise.
///
/// This is a heuristic classifier, not a parser: a genuine item whose name
/// contains a noise marker is dropped, and an OCR artifact that resembles
/// an item is kept. Both are accepted limitations.
#[derive(Debug, Clone)]
pub struct LineFilter {
    noise_markers: Vec<String>,
}

impl LineFilter {
    /// Create a filter with the default noise markers.
    pub fn new() -> Self {
        Self::with_markers(DEFAULT_NOISE_MARKERS)
    }

    /// Create a filter with custom noise markers. Matching is
    /// case-insensitive; markers are stored lowercase.
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            noise_markers: markers
                .into_iter()
                .map(|m| m.into().to_lowercase())
                .collect(),
        }
    }

    /// Extract candidate item lines from raw text, preserving order.
    ///
    /// A line survives when it is non-empty after trimming and its
    /// lowercase form contains none of the noise markers. No merging, no
    /// deduplication.
    pub fn filter<'a>(&self, raw_text: &'a str) -> Vec<&'a str> {
        raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !self.is_noise(line))
            .collect()
    }

    fn is_noise(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.noise_markers
            .iter()
            .any(|marker| lower.contains(marker.as_str()))
    }
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_drops_noise_and_blank_lines() {
        let filter = LineFilter::new();
        let raw = "Milk 2L\n\n  Bread  \nSUBTOTAL 5.00\nTAX 0.40\nTOTAL 5.40\n";
        assert_eq!(filter.filter(raw), vec!["Milk 2L", "Bread"]);
    }

    #[test]
    fn test_marker_match_is_case_insensitive_substring() {
        let filter = LineFilter::new();
        // "Totally Nuts" is a genuine item, but "total" appears as a
        // substring. Dropping it is the documented false negative.
        assert!(filter.filter("Totally Nuts").is_empty());
        assert!(filter.filter("tax free water").is_empty());
        assert_eq!(filter.filter("Taco Shells"), vec!["Taco Shells"]);
    }

    #[test]
    fn test_preserves_order_without_dedup() {
        let filter = LineFilter::new();
        let raw = "Eggs\nMilk\nEggs";
        assert_eq!(filter.filter(raw), vec!["Eggs", "Milk", "Eggs"]);
    }

    #[test]
    fn test_empty_input() {
        let filter = LineFilter::new();
        assert!(filter.filter("").is_empty());
        assert!(filter.filter("\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_custom_markers() {
        let filter = LineFilter::with_markers(["VOID"]);
        let raw = "Milk\nvoid item\nTOTAL 3.00";
        assert_eq!(filter.filter(raw), vec!["Milk", "TOTAL 3.00"]);
    }
}
