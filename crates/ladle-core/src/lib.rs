pub mod error;
pub mod model;
pub mod scrape;
pub mod testutil;
pub mod traits;

pub use error::{AppError, ExtractError};
pub use model::Recipe;
pub use scrape::ScrapeService;
pub use traits::{ExtractorRegistry, ExtractorStrategy, Fetcher, RecipeExtractor};
