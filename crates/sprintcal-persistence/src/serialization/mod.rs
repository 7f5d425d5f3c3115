//! Text encodings of the sprint collection.
//!
//! Two wire formats exist side by side: the keyed store keeps an envelope
//! `{ "sprints": [...], "colorIndex": n }`, while export files hold the bare
//! sprint array. Dates become timestamps only here.

pub mod codec;
pub mod records;
pub mod timestamp;

pub use codec::{Decoded, RecordPolicy, RejectedRecord, SprintCodec};
pub use timestamp::{decode_date, encode_date};
