//! Content metadata extraction, done exactly once at scan time.
//!
//! The rest of the engine works on typed node metadata; no free-text
//! parsing happens after the snapshot is built.

pub mod frontmatter;
pub mod links;
