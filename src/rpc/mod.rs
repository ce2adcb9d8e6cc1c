//! # rpc
//!
//! Client-side plumbing shared by service proxies that talk over an asynchronous message bus.
//!
//! A proxy turns a remote procedure intent into a [`Message`], stamps it with the minimum
//! [`ApiVersion`] the server must implement and hands the resulting [`Envelope`] to an
//! [`RpcTransport`] using one of three dispatch shapes:
//!
//! - **call**: request/reply to one consumer of a topic, waits for the result.
//! - **cast**: fire-and-forget to one consumer of a topic.
//! - **fanout_cast**: fire-and-forget to every consumer of a topic.
//!
//! ## Topics
//!
//! Every service has a base topic (e.g. `network`). Messages that must be handled by a
//! particular node go to a host topic, which the transport derives from the base topic and the
//! host name. The default derivation is `{topic}.{host}`:
//!
//! - Base topic: `network`
//! - Host topic for `compute-1`: `network.compute-1`
//!
//! ## Wire shape
//!
//! The transport decides how envelopes are encoded. Their serde form is:
//!
//! ```json
//! { "method": "update_dns", "args": { "network_ids": [1, 2] }, "version": "1.3" }
//! ```

mod error;
mod message;
mod proxy;
mod transport;
mod version;

pub use error::RpcError;
pub use message::{Args, Envelope, Message};
pub use proxy::RpcProxy;
pub use transport::{RpcTransport, host_topic};
pub use version::{ApiVersion, InvalidApiVersion};
