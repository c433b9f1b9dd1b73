// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ExperienceLevel, ExperienceRequirement, MatchQuery, NewProfession, ProfessionRecord,
    ScoredResult, ScoringWeights, UnknownExperienceLabel, ANY_EXPERIENCE,
};
pub use requests::{AdviceRequest, EvaluateFitRequest, RecommendationRequest};
pub use responses::{
    AdviceResponse, CategoriesResponse, ErrorResponse, HealthResponse, InsertProfessionResponse,
    RecommendationsResponse,
};
