//! Endpoint accessors.
//!
//! One function per backend operation, grouped by resource. They only place
//! parameters into a [`RequestDescriptor`](crate::request::RequestDescriptor):
//! path segments are interpolated verbatim and nothing is validated.

pub mod dish;
pub mod dynamic;
pub mod task;
