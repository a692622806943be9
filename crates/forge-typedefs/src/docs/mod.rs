//! External documentation
//!
//! - `member_id`: documentation identifiers for types and members
//! - `index`: summary lookup, loaded from XML documentation files

pub mod index;
pub mod member_id;

pub use index::DocumentationIndex;
pub use member_id::MemberId;
