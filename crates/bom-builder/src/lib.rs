#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`BomBuilderError`, `ErrorCategory`)
//! - [`config`]: Builder configuration (`BomConfig`, builder, env overrides)
//! - [`types`]: Domain types (`Coordinate`, `BomIdentity`, `Destination`)
//! - [`xml`]: Minimal XML tree on top of quick-xml (`parse`, `XmlElement`)
//! - [`descriptor`]: Descriptor detection and field lookup (`DescriptorDetector`, `FieldLookup`)
//! - [`discover`]: Recursive descriptor discovery (`Discoverer`)
//! - [`aggregate`]: BOM document assembly (`aggregate`, `BomDocument`)
//! - [`emit`]: Serialization to file or stdout (`emit`, `EmitOutcome`)
//! - [`builder`]: Main orchestrator (`BomBuilder`, `BuildReport`)
//!
//! # Architecture
//!
//! ```text
//! roots --> Discoverer --> parse_descriptor --> Vec<Coordinate>
//!                                                     |
//!                                                 aggregate
//!                                                     |
//!                                                BomDocument
//!                                                     |
//!                                             emit (file | stdout)
//! ```

pub mod aggregate;
pub mod builder;
pub mod config;
pub mod descriptor;
pub mod discover;
pub mod emit;
pub mod error;
pub mod types;
pub mod xml;

// --- Public API Re-exports ---

// Builder (main orchestrator)
pub use builder::{BomBuilder, BuildReport};

// Configuration
pub use config::{BomConfig, BomConfigBuilder};

// Error
pub use error::{BomBuilderError, ErrorCategory};

// Types
pub use types::{BomIdentity, Coordinate, Destination};

// Pipeline stages
pub use aggregate::{BomDocument, aggregate};
pub use descriptor::{DescriptorDetector, FieldLookup, parse_descriptor, parse_descriptor_bytes};
pub use discover::Discoverer;
pub use emit::{EmitOutcome, emit, render};
