//! HTTP handlers, one module per resource.

pub mod ask;
pub mod records;
pub mod upload;
