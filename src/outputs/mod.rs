//! Run outputs.
//!
//! The pipeline's only externally visible state is the artifact directory
//! (gazette PDF and page images) plus the JSON run report written here;
//! the presentation layer lists and serves those files.

pub mod json;
