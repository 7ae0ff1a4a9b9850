//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a new application".

pub mod scaffold_service;

pub use scaffold_service::{
    PIPELINE, ScaffoldContext, ScaffoldReport, ScaffoldRequest, ScaffoldService, Step,
};
