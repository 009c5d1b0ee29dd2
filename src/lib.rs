//! A batch converter library for post-processed N-body simulation snapshots.
//! It moves star-system record files between whitespace text, packed binary,
//! and self-describing npy representations, resolving the column layout of
//! each data type from the post-processing options the snapshots were made
//! with.
//!
//! # Features
//!
//! - **Typed records** — Column layouts for single stars and binary, triple,
//!   and quadruple systems, including stellar-evolution and external-potential
//!   extensions
//! - **Three formats** — Whitespace text, packed little-endian binary, and
//!   self-describing npy structured arrays
//! - **Batch planning** — Resolve every file a conversion run touches before
//!   any I/O happens
//!
//! # Quick Start
//!
//! Build a snapshot in memory, write it in one format, and read it back in
//! another via the [`io`] module:
//!
//! ```
//! use snap_transfer::{ParticleConfig, Snapshot, SystemKind};
//! use snap_transfer::io::{self, Format};
//!
//! let schema = SystemKind::Single.shape().columns(&ParticleConfig::default());
//! let mut snapshot = Snapshot::new(schema.clone());
//! snapshot.push_row_f64(&[1.0, 0.5, 0.0, 0.0, 0.0, 0.1, 0.2, 0.3]);
//! snapshot.push_row_f64(&[2.0, 0.25, 1.0, 0.0, 0.0, -0.1, -0.2, -0.3]);
//!
//! let mut npy = Vec::new();
//! io::write_snapshot(&mut npy, Format::Npy, &snapshot)?;
//!
//! let reloaded = io::read_snapshot(&npy[..], Format::Npy, &schema)?;
//! assert_eq!(reloaded, snapshot);
//! # Ok::<(), snap_transfer::io::Error>(())
//! ```
//!
//! Whole-run conversion goes through [`plan_jobs`] and [`run_job`]:
//! a [`TransferConfig`] plus one base path yields the jobs for every
//! selected data type.
//!
//! # Data Types
//!
//! - [`SystemKind`] — Which star-system record a file holds
//! - [`ParticleConfig`] — Post-processing options that shape the layout
//! - [`Column`], [`Dtype`] — One named, typed snapshot column
//! - [`Snapshot`], [`ColumnData`] — Loaded column-major row data
//! - [`TransferConfig`], [`Job`] — A batch run and its planned conversions

mod model;
mod transfer;

pub mod io;

pub use model::record::{Column, ParticleConfig, RecordShape, SystemKind};
pub use model::snapshot::{ColumnData, Snapshot};
pub use model::types::{
    Dtype, ExternalMode, InterruptMode, ParseExternalModeError, ParseInterruptModeError,
};

pub use transfer::{Job, TransferConfig, parse_manifest, plan_jobs, read_manifest, run_job};
