pub mod study_flow;

pub use study_flow::StudyFlow;
