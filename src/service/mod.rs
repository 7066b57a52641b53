pub mod extractor;
pub mod reclassify;
pub mod synonyms;

pub use extractor::ExtractorService;
