//! Core data structures for typed snapshot records.
//!
//! This module provides the types that flow through `snap-transfer`:
//!
//! - [`types`] – Column dtypes and the post-processing mode enums.
//! - [`record`] – Record shapes (flat particle / nested two-member systems)
//!   and their flattened column layouts.
//! - [`snapshot`] – The in-memory snapshot table a load produces and a save
//!   consumes.
//!
//! The model deliberately separates the *description* of a record
//! ([`RecordShape`] plus [`ParticleConfig`]) from loaded *data*
//! ([`Snapshot`]), so the format codecs in [`crate::io`] only ever see a
//! column layout and a table of values.
//!
//! [`RecordShape`]: record::RecordShape
//! [`ParticleConfig`]: record::ParticleConfig
//! [`Snapshot`]: snapshot::Snapshot

pub mod record;
pub mod snapshot;
pub mod types;
