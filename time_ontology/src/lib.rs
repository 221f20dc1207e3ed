//! # Time Ontology
//!
//! The fact layer for temporal knowledge: instants, intervals, the features they
//! describe, and the knowledge base that stores them. This crate holds data only;
//! relation checking and validation live in `interval_engine`.
//!
//! ## Core Components
//!
//! - **resources**: Identifiers, instants and intervals
//! - **knowledge_base**: Instant and interval stores behind the `TemporalStore` lookups
//! - **vocabulary**: Names of the interval relations
//! - **policy**: Validator configuration and enforcement policy

pub mod knowledge_base;
pub mod policy;
pub mod resources;
pub mod vocabulary;

pub use knowledge_base::*;
pub use policy::*;
pub use resources::*;
pub use vocabulary::*;
