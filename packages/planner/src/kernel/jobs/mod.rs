//! Event-triggered job infrastructure.
//!
//! The queue/broker transport is an external collaborator; this module only
//! covers the envelope it delivers ([`JobEvent`]) and the dispatch table
//! ([`EventRegistry`]) that routes each event name to its handler.

pub mod events;
pub mod registry;

pub use events::JobEvent;
pub use registry::{EventRegistry, SharedEventRegistry};
