//! Version rewriting for info files and Sonar properties

pub mod format;
pub mod next;
pub mod rewriter;
pub mod sonar;

pub use rewriter::{RewriteOptions, RewriteOutcome, RewriteTarget, rewrite, write_outcome};
