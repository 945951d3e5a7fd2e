//! Compile-time tables shared by the photometry core and the cookie baker.

pub mod cubemap;
pub mod texture;
pub mod units;
