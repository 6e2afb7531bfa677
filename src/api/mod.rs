//! API parts: typed nodes of slick's REST URL tree.

mod files;
mod part;
mod projects;
mod system_configurations;
mod testrun_groups;

pub use files::DEFAULT_CHUNK_SIZE;
pub use part::{ApiPart, FindOneMode};
pub use system_configurations::SystemConfigurationPart;
