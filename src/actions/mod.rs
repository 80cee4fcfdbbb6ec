//! Controller layer: one `Action` per user-triggered lookup.
//!
//! Each action is split into pure halves so it can be tested without a
//! network or a display:
//! - `Action::prepare` turns raw inputs into a `Request` (or skips/rejects)
//! - `Action::plan` turns the parsed response into a `RenderPlan`
//!
//! `handle` strings them together around the dispatcher and the results area.

pub mod action;
pub mod handler;
pub mod plan;

pub use action::{Action, Prepared};
pub use handler::handle;
pub use plan::RenderPlan;

/// `limit` sent with free-text and autocomplete queries.
pub const QUERY_LIMIT: u32 = 20;
/// `limit` sent with nearest and reverse lookups.
pub const NEAREST_LIMIT: u32 = 10;
/// Search radius in metres for reverse geocoding to postcodes.
pub const REVERSE_RADIUS_M: u32 = 200;
/// Search radius in metres for reverse geocoding to outcodes.
pub const OUTCODE_RADIUS_M: u32 = 5000;
/// Client-side cap on bulk postcode lookups.
pub const BULK_LIMIT: usize = 100;
