//! External collaborators of the table cleaning core: link resolution
//! against the data library page and raw file retrieval over HTTP.
//!
//! Both sit behind traits so the core can be exercised with stub
//! collaborators and synthetic blobs.

pub mod fetch;
pub mod links;
