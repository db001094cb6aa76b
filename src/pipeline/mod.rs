//! Pipeline entry points.
//!
//! - `collect`: count a listing over HTTP and write the report
//! - `run_collect`: the same run with caller-supplied fetcher and storage

pub mod collect;

pub use collect::{
    CollectSummary, FailurePolicy, collect, collect_blocking, collect_scoped, run_collect,
};
