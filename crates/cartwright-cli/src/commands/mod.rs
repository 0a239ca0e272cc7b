//! Command implementations.
//!
//! - [`build`]: one build cycle
//! - [`run`]: build, launch the runtime and rebuild on change
//!
//! Both start from [`Project::load`].

pub mod build;
pub mod project;
pub mod run;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use project::Project;
pub use run::execute as run_execute;
