pub mod git;
pub mod release;

pub use git::collect_history;
pub use release::{classify_versions, release_tiers, Version};
