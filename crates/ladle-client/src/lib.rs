//! HTTP fetcher and HTML recipe extraction strategies for Ladle.

pub mod fetcher;
pub mod jsonld;
pub mod microdata;

mod duration;
mod page;

pub use fetcher::ReqwestFetcher;
pub use jsonld::JsonLdExtractor;
pub use microdata::MicrodataExtractor;

use ladle_core::ExtractorRegistry;

/// Registry with the stock strategies: JSON-LD first (the richest and
/// most widely published markup), schema.org microdata as the fallback.
pub fn default_registry() -> ExtractorRegistry {
    ExtractorRegistry::new()
        .register(JsonLdExtractor)
        .register(MicrodataExtractor)
}
