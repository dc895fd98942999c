pub mod cache;
pub mod store;
pub mod utils;
pub mod vars;

pub use cache::InventoryCache;
pub use store::{Group, HostParams, InventoryStore, ALL, META, UNGROUPED};
pub use vars::{merge_vars, Variables};
