//! Supply-path economics — fee stack calculation, SSP registry, and
//! simulated exchange routing between DSPs and SSPs.

pub mod exchange;
pub mod fee_stack;
pub mod openrtb;
pub mod ssp;

pub use exchange::{ExchangeRouter, RouteResult, TGroup};
pub use fee_stack::{DspComparison, FeeBreakdown, FeeStackCalculator};
pub use ssp::{SspConfig, SspRegistry};
