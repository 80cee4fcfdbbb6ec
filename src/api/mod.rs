//! API layer: request shape, HTTP dispatch, and the response envelope.
//!
//! Nothing here touches the results area. Failures come back as
//! `DispatchError` and the controller decides how to show them.

pub mod client;
pub mod envelope;
pub mod request;

pub use client::{HttpTransport, Transport, dispatch};
pub use envelope::Envelope;
pub use request::{Method, Request, segment};

pub const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";
