//! # langpack-engine
//!
//! The algorithmic core of langpack: string pools with rotation policies,
//! recursive `{{placeholder}}` expansion with conditional directives, and
//! `[@operator: args]` rich-text segmentation.

mod condition;
pub mod pool;
pub mod resolve;
pub mod segment;
pub mod source;

pub use pool::{PoolPolicy, StringPool};
pub use resolve::expand;
pub use segment::{segment, Segment, SegmentAction};
pub use source::TemplateSource;
