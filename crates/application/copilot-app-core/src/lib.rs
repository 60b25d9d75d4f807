pub mod app_core;
mod async_runtime;
pub mod domain;
pub mod identity;
pub mod kernel;
pub mod loader;
pub mod ports;
pub mod probe;
pub mod service;
pub mod viewmodel;

pub use app_core::*;
pub use domain::{AppState, BootFailure, GenerationId, Lookup, ReadinessState};
pub use identity::{AuthMode, StaticIdentity};
pub use kernel::{AppKernel, KernelConfig};
pub use ports::*;
pub use service::HttpBackend;
pub use viewmodel::*;
