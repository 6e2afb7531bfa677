//! Slick data models.

mod project;
mod result;
mod system;
mod system_configuration;
mod testcase;
mod testrun;

pub use project::*;
pub use result::*;
pub use system::*;
pub use system_configuration::*;
pub use testcase::*;
pub use testrun::*;
