//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! generation hooks: pre-generation answer validation and post-generation
//! tree transformation, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (GenerateService, Transformer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: Filesystem, Renderer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (LocalFilesystem, StrictRenderer, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (TemplateSchema, ActionPlan, Template)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::path::Path;
//! use stencil_core::prelude::*;
//!
//! let template = Template::builder()
//!     .metadata(TemplateMetadata::new("demo"))
//!     .variable(VariableDecl::string("namespace").default_value(REMOVE_ME))
//!     .action(ActionRule::remove("src/__namespace__").when(Condition::equals("namespace", REMOVE_ME)))
//!     .build()
//!     .unwrap();
//!
//! let config = template
//!     .validate_answers(&RawAnswers::new(), ValidationMode::Strict)
//!     .unwrap();
//! let plan = template.plan(&config).unwrap();
//! assert_eq!(plan.decide(Path::new("src/__namespace__")), FileAction::Delete);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GenerateReport, GenerateService, TransformReport, Transformer,
        ports::{Filesystem, TemplateRenderer, WalkEntry},
    };
    pub use crate::domain::{
        ActionPlan, ActionRule, Condition, Configuration, FileAction, Pattern, REMOVE_ME,
        RawAnswers, Rule, Template, TemplateMetadata, TemplateSchema, ValidationMode, Value,
        VariableDecl,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
