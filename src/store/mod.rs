//! In-memory stores for tasks, versions and test cases
//!
//! The stores are plain owned values. They never reference each other;
//! cross-store rules such as cascading deletes live in
//! [`crate::workbench::Workbench`].

pub mod cases;
pub mod tasks;
pub mod versions;

pub use cases::CaseStore;
pub use tasks::TaskStore;
pub use versions::VersionStore;
