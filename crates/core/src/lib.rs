//! Domain types shared by the repository and API layers.
//!
//! Nothing in this crate performs I/O: it holds identifiers, the error
//! taxonomy, paging/sorting value types and field validators.

pub mod error;
pub mod paging;
pub mod restaurant;
pub mod types;
