//! Pipeline components: file probe, tree walk, run summary.

pub mod context;
pub mod error_handler;
pub mod metadata;
pub mod walk;

pub use context::WalkContext;
pub use error_handler::summarize_run;
pub use metadata::{FileKind, FileProbe, probe};
pub use walk::{TreeWalk, WalkOutcome, to_outcome_walkdir, walk_tree};
