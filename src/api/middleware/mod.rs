//! API middleware.

mod timing;

pub use timing::timing_middleware;
