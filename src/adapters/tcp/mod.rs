//! TCP adapter: wire envelopes, per-connection sessions, accept loop.

pub mod envelope;
pub mod server;
pub mod session;

pub use envelope::{parse_frame, Request, RequestEnvelope, ResponseEnvelope};
pub use server::TheaterServer;
