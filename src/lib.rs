// src/lib.rs

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::Args;
pub use config::ScanConfig;
pub use crate::core::knowledge_base::FingerprintDatabase;
pub use crate::core::models::{DomainReport, Fingerprint, ProbeResult, ScanVerdict, Signal};
pub use crate::core::resolvers::ResolverRotator;
pub use crate::core::scanner::probe::{NetworkProber, Prober};
pub use crate::core::scanner::Scanner;
