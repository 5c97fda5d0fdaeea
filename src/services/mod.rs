pub mod allocation;
pub mod assignments;
pub mod recommendations;
pub mod scoring;
pub mod semesters;

pub use allocation::{AllocationService, AssignedCandidates};
pub use assignments::AssignmentService;
pub use recommendations::RecommendationService;
pub use scoring::ScoringWeights;
pub use semesters::SemesterService;
