//! # Interval Engine
//!
//! Decides which qualitative relations hold between two declared time intervals,
//! even when some endpoints have no known timestamp, and validates a time
//! knowledge base with rules built on those checks.
//!
//! ## Core Components
//!
//! - **relation**: Interval fact resolution and the relation formulas (Allen's
//!   thirteen relations, the `In` alias and disjointness)
//! - **validator**: Rule fan-out over a knowledge base and the evidence report
//! - **reasoner**: Pairwise relation inference written back into the knowledge base
//! - **error**: The single error raised for a missing interval identifier
//!
//! ## Design Philosophy
//!
//! - **Conservative**: Unknown information never makes a relation hold
//! - **Total**: Every check returns a definite answer for any stored data
//! - **Stateless**: Checks only read the store and may run concurrently

pub mod error;
pub mod reasoner;
pub mod relation;
pub mod validator;

pub use error::*;
pub use reasoner::*;
pub use relation::*;
pub use validator::*;
