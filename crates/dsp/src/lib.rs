//! DSP integration layer — uploads creatives to demand-side platforms
//! and records trafficking state.
//!
//! Adapters simulate platform API responses; production integrations
//! would call the Amazon Advertising API, TTD, and DV360 endpoints with
//! the same request shapes.

pub mod adapters;
pub mod trafficking;

pub use adapters::{
    adapter_for, AmazonDspAdapter, ChallengerAdapter, DspAdapter, Dv360Adapter, TradeDeskAdapter,
    UploadRequest, UploadResult,
};
pub use trafficking::TraffickingManager;
