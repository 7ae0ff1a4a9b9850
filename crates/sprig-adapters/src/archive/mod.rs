//! Archive adapters.

mod extractor;

pub use extractor::ZipExtractor;
