//! Template renderers.

mod strict;

pub use strict::StrictRenderer;
