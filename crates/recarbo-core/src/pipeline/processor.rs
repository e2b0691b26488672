//! Receipt processing orchestrator.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::report::{ProcessResult, Report};
use crate::ocr::TextExtractor;

use super::filter::LineFilter;
use super::matcher::ItemMatcher;
use super::similarity::{SimilarityScorer, TokenSetScorer};

/// End-to-end receipt pipeline: extract, filter, match, aggregate.
///
/// The catalog is shared read-only, so one processor serves any number of
/// sequential or concurrent invocations. All per-invocation state lives on
/// the stack of [`ReceiptProcessor::process`].
pub struct ReceiptProcessor<E, S = TokenSetScorer> {
    extractor: E,
    catalog: Arc<Catalog>,
    filter: LineFilter,
    matcher: ItemMatcher<S>,
}

impl<E: TextExtractor> ReceiptProcessor<E, TokenSetScorer> {
    /// Create a processor with the default filter and matcher.
    pub fn new(extractor: E, catalog: Arc<Catalog>) -> Self {
        Self {
            extractor,
            catalog,
            filter: LineFilter::new(),
            matcher: ItemMatcher::new(),
        }
    }
}

impl<E: TextExtractor, S: SimilarityScorer> ReceiptProcessor<E, S> {
    /// Replace the line filter.
    pub fn with_filter(mut self, filter: LineFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the matcher.
    pub fn with_matcher<S2: SimilarityScorer>(
        self,
        matcher: ItemMatcher<S2>,
    ) -> ReceiptProcessor<E, S2> {
        ReceiptProcessor {
            extractor: self.extractor,
            catalog: self.catalog,
            filter: self.filter,
            matcher,
        }
    }

    /// The shared reference catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Process receipt image bytes into an emission report.
    ///
    /// The only failure surface is text extraction; filtering and matching
    /// always produce a result, falling back to the unknown placeholder per
    /// line.
    pub fn process(&self, image: &[u8]) -> Result<ProcessResult> {
        let start = Instant::now();

        let raw_text = self.extractor.extract_text(image)?;
        debug!("Extracted {} characters of text", raw_text.len());

        let (report, candidate_count, unmatched_count) = self.run(&raw_text);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Processed receipt: {} candidates, {} unmatched, {:.3} kg CO2 in {}ms",
            candidate_count, unmatched_count, report.total_co2, processing_time_ms
        );

        Ok(ProcessResult {
            report,
            raw_text,
            candidate_count,
            unmatched_count,
            processing_time_ms,
        })
    }

    /// Run the text stages only, skipping extraction.
    ///
    /// Never fails; this is the deterministic seam for callers that already
    /// hold the raw text.
    pub fn process_text(&self, raw_text: &str) -> Report {
        self.run(raw_text).0
    }

    fn run(&self, raw_text: &str) -> (Report, usize, usize) {
        let candidates = self.filter.filter(raw_text);
        let candidate_count = candidates.len();

        let mut unmatched_count = 0;
        let mut items = Vec::with_capacity(candidate_count);
        for line in candidates {
            let resolved = self.matcher.resolve(line, &self.catalog);
            if !resolved.matched {
                unmatched_count += 1;
            }
            items.push(resolved.item);
        }

        (Report::from_items(items), candidate_count, unmatched_count)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::{ExtractionError, RecarboError};

    use super::*;

    /// Extractor returning a fixed text, or failing when none is set.
    struct FixedExtractor(Option<&'static str>);

    impl TextExtractor for FixedExtractor {
        fn extract_text(&self, _image: &[u8]) -> std::result::Result<String, ExtractionError> {
            match self.0 {
                Some(text) => Ok(text.to_string()),
                None => Err(ExtractionError::Recognition("engine fault".to_string())),
            }
        }
    }

    fn catalog() -> Arc<Catalog> {
        let source = "\
item,category,co2_per_unit,unit
Milk,Dairy,1.2,liter
Beef,Meat,27.0,kg
";
        Arc::new(Catalog::from_reader(source.as_bytes()).unwrap())
    }

    #[test]
    fn test_full_pipeline_scenario() {
        let raw = "Milk 2L\nBread\nSUBTOTAL 5.00\nTAX 0.40\nTOTAL 5.40";
        let processor = ReceiptProcessor::new(FixedExtractor(Some(raw)), catalog());

        let result = processor.process(b"fake image").unwrap();
        let report = &result.report;

        assert_eq!(result.candidate_count, 2);
        assert_eq!(result.unmatched_count, 1);
        assert_eq!(report.items.len(), 2);

        assert_eq!(report.items[0].item, "Milk");
        assert_eq!(report.items[0].co2_per_unit, 1.2);
        assert_eq!(report.items[0].total_co2, 1.2);
        assert_eq!(report.items[0].quantity, 1);

        assert_eq!(report.items[1].item, "Bread");
        assert_eq!(report.items[1].category, "Unknown");
        assert_eq!(report.items[1].total_co2, 0.0);

        assert_eq!(report.total_co2, 1.2);
    }

    #[test]
    fn test_extraction_failure_propagates() {
        let processor = ReceiptProcessor::new(FixedExtractor(None), catalog());
        let err = processor.process(b"fake image").unwrap_err();
        assert!(matches!(
            err,
            RecarboError::Extraction(ExtractionError::Recognition(_))
        ));
    }

    #[test]
    fn test_empty_text_yields_empty_report() {
        let processor = ReceiptProcessor::new(FixedExtractor(Some("")), catalog());
        let result = processor.process(b"fake image").unwrap();
        assert!(result.report.items.is_empty());
        assert_eq!(result.report.total_co2, 0.0);
        assert_eq!(result.candidate_count, 0);
    }

    #[test]
    fn test_noise_lines_never_reach_report() {
        let raw = "TOTAL 12.00\nSubtotal 11.00\ntax 1.00";
        let processor = ReceiptProcessor::new(FixedExtractor(Some(raw)), catalog());
        let report = processor.process_text(raw);
        assert!(report.items.is_empty());
    }

    #[test]
    fn test_process_is_idempotent() {
        let raw = "Milk\nBeef steak\nMystery item";
        let processor = ReceiptProcessor::new(FixedExtractor(Some(raw)), catalog());

        let first = processor.process(b"img").unwrap().report;
        let second = processor.process(b"img").unwrap().report;
        assert_eq!(first, second);
        assert_eq!(first, processor.process_text(raw));
    }

    #[test]
    fn test_items_preserve_receipt_order() {
        let raw = "Beef\nMilk\nBeef";
        let processor = ReceiptProcessor::new(FixedExtractor(Some(raw)), catalog());
        let report = processor.process_text(raw);

        let names: Vec<&str> = report.items.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(names, vec!["Beef", "Milk", "Beef"]);
        assert_eq!(report.total_co2, 27.0 + 1.2 + 27.0);
    }
}
