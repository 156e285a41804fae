// src/storage/mod.rs

//! Storage backends for conversion inputs, outputs, and audit records.

mod local;

pub use local::{ConversionRecord, LocalStorage};
