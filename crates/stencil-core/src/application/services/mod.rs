//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! generation run: validate answers, render, write, transform.

pub mod generate_service;
pub mod transformer;

pub use generate_service::{GenerateOptions, GeneratePlan, GenerateReport, GenerateService};
pub use transformer::{
    AppliedAction, TransformPreview, TransformReport, TransformWarning, Transformer,
};
