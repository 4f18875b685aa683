//! Item icon acquisition
//!
//! Icons come from a session cache, a remote image service, or a local
//! deterministic renderer, resolved asynchronously by a single worker task.

pub mod cache;
pub mod client;
pub mod glyphs;
pub mod icon;
pub mod local;
pub mod worker;

pub use cache::IconCache;
pub use client::{OpenAiImageClient, RemoteImageService};
pub use icon::{Icon, IconKey, IconRequest, Provenance};
pub use local::render_local_icon;
pub use worker::{
    channel, spawn_pipeline, IconQueue, IconWorker, PipelineCommand, PipelineEvent, StatusLine,
};
