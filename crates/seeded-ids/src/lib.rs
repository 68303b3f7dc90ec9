//! Seed-reproducible identifiers, bounded sampling and check digits.
//!
//! Everything in this crate is driven by an explicit [`Mulberry32`] engine
//! passed by mutable reference. There is no global state: two engines built
//! from the same seed and driven through the same calls produce the same
//! identifiers on every platform.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - A 32-bit mixing PRNG and an unbiased bounded integer sampler
//! - UUIDv4, ULID, nanoid, ObjectId, base58 short UUID and CUID encoders
//! - SQL-style numeric ids and serials
//! - UPC-A and EAN-13 check digits
//! - Named, reproducible batches loaded from a JSON registry
//!
//! # Example
//!
//! ```
//! use seeded_ids::{Mulberry32, checksum, ids, sampler};
//!
//! let mut rng = Mulberry32::new(42);
//!
//! let die = sampler::int_inclusive(&mut rng, 1, 6).expect("valid range");
//! assert!((1..=6).contains(&die));
//!
//! let id = ids::uuid_v4(&mut rng);
//! assert_eq!(id.len(), 36);
//!
//! let code = checksum::upc_a(&mut rng);
//! assert!(checksum::is_valid_upc_a(&code));
//! ```

mod atomic_io;
pub mod batch_cli;
pub mod checksum;
mod error;
mod generator;
pub mod ids;
mod registry;
mod rng;
pub mod sampler;

pub use error::{GenerationError, IdError, ParseIdKindError, RegistryError, SamplerError};
pub use generator::{GeneratedBatch, generate_batch, generate_many};
pub use registry::{BatchDefinition, BatchRegistry, IdKind};
pub use rng::{DEFAULT_SEED, EntropySource, Mulberry32};
