//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations and tree walking
//!   - `TemplateRenderer`: Template rendering
//!
//! - **Driving (Input) Ports**: the services themselves, called by the CLI

pub mod output;

pub use output::{Filesystem, TemplateRenderer, WalkEntry};

#[cfg(test)]
pub use output::{MockFilesystem, MockTemplateRenderer};
