pub mod answer;
pub mod question;
pub mod reporting;
pub mod submission;

pub use answer::NormalizedResponse;
pub use question::QuestionType;
pub use reporting::{CandidateResults, FinalTestReport, FinalTestSummary, ScoreClass};
pub use submission::RawSubmission;
