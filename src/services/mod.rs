pub mod analytics;
pub mod recommender;

pub use recommender::RecommendationService;
