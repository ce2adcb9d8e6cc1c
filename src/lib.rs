//! # network-rpcapi
//!
//! Client for invoking the network manager over an asynchronous message bus.
//!
//! The crate builds typed messages for every remote procedure of the network service, picks the
//! destination topic (the service topic, or a single host's topic) and stamps the minimum API
//! version the server must implement. Delivery is left to an [`RpcTransport`] supplied by the
//! caller, which provides three primitives:
//!
//! - `call`: request/reply, waits for the result.
//! - `cast`: fire-and-forget to one consumer.
//! - `fanout_cast`: fire-and-forget to every consumer of a topic.
//!
//! ```ignore
//! use network_rpcapi::{NetworkApi, NetworkApiConfig, RequestContext};
//!
//! let api = NetworkApi::new(transport, NetworkApiConfig::from_env());
//! let ctx = RequestContext::admin();
//!
//! // Request/reply on the `network` topic
//! let network = api.get_network(&ctx, "3c3f5a4e-...").await?;
//!
//! // Fire-and-forget on `network.net-host-1`
//! api.release_fixed_ip(&ctx, "10.0.0.3", "net-host-1").await?;
//!
//! // Broadcast to every network manager, stamped with version 1.3
//! api.update_dns(&ctx, &[1, 2]).await?;
//! ```

pub mod context;
pub mod network;
pub mod rpc;

pub use context::{ReadDeleted, RequestContext, RequestId};
pub use network::{NetworkApi, NetworkApiConfig, Operation};
pub use rpc::{ApiVersion, Envelope, Message, RpcError, RpcTransport};
