//! Per-key value serializers for fragstate.
//!
//! Every key in a store shape is paired with a [`Serializer`] that turns a
//! typed value into the string stored in the URL fragment and back. The
//! store itself works with type-erased [`KeyCodec`] handles, which every
//! serializer over a serde-compatible value type implements automatically.
//!
//! # Policies
//!
//! - [`StringSerializer`] — identity
//! - [`JsonSerializer`] — `serde_json`; malformed input reads as "no value"
//! - [`DateSerializer`] — `DateTime<Utc>` as decimal epoch milliseconds
//! - [`TimeWindowSerializer`] — a [`TimeWindow`] as `{startMillis}-{endMillis}`

pub mod date;
pub mod error;
pub mod json;
pub mod string;
pub mod traits;

pub use date::{DateSerializer, TimeWindow, TimeWindowSerializer};
pub use error::{SerialError, SerialResult};
pub use json::JsonSerializer;
pub use string::StringSerializer;
pub use traits::{KeyCodec, Serializer};
