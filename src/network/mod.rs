//! Client side of the network RPC API.
//!
//! [`NetworkApi`] exposes one method per remote procedure of the network manager. The
//! [`Operation`] table records, for each procedure, its wire name, how it is dispatched and the
//! minimum server version it needs.

mod api;
mod config;
mod operation;
mod types;

pub use api::NetworkApi;
pub use config::{DEFAULT_NETWORK_TOPIC, NETWORK_TOPIC_ENV, NetworkApiConfig};
pub use operation::{BASE_RPC_API_VERSION, Dispatch, Operation, Routing, UnknownOperation};
pub use types::{
    Association, CreateNetworksRequest, InstanceAllocation, InstanceMigration,
    NetworkAssociations, RequestedNetwork,
};
