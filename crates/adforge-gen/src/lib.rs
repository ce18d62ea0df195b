//! adforge ad-copy generation
//!
//! An async [`AdCopyProducer`] seam with an HTTP client for the generation
//! service and a deterministic local template fallback. Generation runs
//! sequentially, one ad group and ad kind at a time.

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod generate;
pub mod producer;

pub use client::HttpAdCopyClient;
pub use config::GenerationConfig;
pub use error::{GenError, Result};
pub use fallback::{FallbackProducer, LocalTemplateProducer};
pub use generate::{generate_for_draft, generate_for_groups, GenerationContext};
pub use producer::{AdCopyProducer, AdCopyRequest};
