//! Receipt processing pipeline: filtering, matching, and aggregation.

mod filter;
mod matcher;
mod processor;
mod similarity;

pub use filter::LineFilter;
pub use matcher::{ItemMatcher, LineMatch, DEFAULT_MATCH_THRESHOLD};
pub use processor::ReceiptProcessor;
pub use similarity::{SimilarityScorer, TokenSetScorer};
