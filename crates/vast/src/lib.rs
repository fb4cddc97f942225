//! VAST 4.2 tag generation with OMID measurement vendor wrapping.

pub mod generator;
pub mod vendors;
mod xml;

pub use generator::{InlineParams, VastGenerator, WrapperParams};
pub use vendors::{VendorConfig, VendorRegistry};
