// src/core/mod.rs

// The `core` module holds the detection engine and the loaders that feed it.

/// Data structures shared across the engine: fingerprints, probe results,
/// verdicts and per-domain reports.
pub mod models;

/// The probe stages, the fingerprint matcher and the scan orchestrator.
pub mod scanner;

/// The fingerprint database and its loader.
pub mod knowledge_base;

/// Round-robin resolver rotation and resolver list loading.
pub mod resolvers;

pub mod sources;

/// Domain list loading and name validation.
pub mod targets;
