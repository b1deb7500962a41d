use ladle_client::ReqwestFetcher;
use ladle_core::ScrapeService;

/// Shared application state, available to all route handlers via
/// `State<Arc<AppState>>`. Immutable across requests: every request is
/// independent and stateless.
pub struct AppState {
    pub service: ScrapeService<ReqwestFetcher>,
}
