//! Domain layer: intents, templates and the tolerant parsing/coercion rules
//! that turn loosely shaped model output into schema-complete structures.

pub mod fields;
pub mod intent;
pub mod payload;
pub mod templates;

pub use fields::Slot;
pub use intent::Intent;
pub use payload::{scan_json, ExtractionPayload};
pub use templates::{Booking, Cancellation, Discount, Person, Review, ShowInfo};
