//! API controllers, one module per endpoint.

pub mod charts;
pub mod verticals;
pub mod version;
