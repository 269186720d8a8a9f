//! Command-line value parsing and plan loading.

pub mod assignment;
pub mod plan;

pub use assignment::{
    parse_frequency_assignment, parse_source_assignment, FrequencyAssignment, SourceAssignment,
};
pub use plan::{load_plan, plan_from_assignments};
