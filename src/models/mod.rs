pub mod response;
pub mod study;

pub use response::{ErrorBody, HealthResponse, StudyResponse, AI_GENERATED_SOURCE};
pub use study::{
    ContentPayload, Mode, QuizItem, SolutionSteps, StudyArtifact, StudyQuery, StudyRequest,
};
