pub mod classify;
pub mod resolver;

pub use classify::{classify, ClassifiedInput, ResourceKind, SearchMode};
pub use resolver::{resolve, ResolvedImageRef};
