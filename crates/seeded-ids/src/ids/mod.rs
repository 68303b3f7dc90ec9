//! Identifier encoders built on the bounded sampler.
//!
//! Every encoder is a pure function of the entropy it draws: the same engine
//! state always yields the same identifier, and the engine is advanced by a
//! fixed number of draws per identifier (plus any rejected draws).

mod base58;
mod crockford;
mod hex_ids;
mod nanoid;
pub mod numeric;
mod rfc4122;

pub use base58::{BASE58_ALPHABET, encode_base58};
pub use crockford::{CROCKFORD_ALPHABET, ULID_LEN, encode_crockford, ulid};
pub use hex_ids::{object_id, transaction_id};
pub use nanoid::{Alphabet, NanoidOptions, cuid, nanoid};
pub use rfc4122::{short_uuid, uuid_v4, uuid_v4_bytes};
