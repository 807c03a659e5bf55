pub mod aggregator;
pub mod classifier;
pub mod display;
pub mod fetcher;
pub mod formatter;
pub mod normalizer;
pub mod payload;
pub mod report_renderer;
pub mod results_service;

pub use aggregator::summarize_final_tests;
pub use classifier::{classify_type, refine_display_type};
pub use display::{display_icon, score_class};
pub use fetcher::{HttpFetcher, ResourceFetcher};
pub use formatter::format_answer;
pub use normalizer::{normalize, normalize_all};
pub use results_service::ResultsService;
