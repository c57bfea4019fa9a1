pub mod binary_search_tree;
pub mod config;
pub mod driver;
pub mod error;

pub use binary_search_tree::{BinarySearchTree, NodeId, TreeNode};
pub use config::RunConfig;
pub use error::{BstError, Result};

pub type Key = i64;
