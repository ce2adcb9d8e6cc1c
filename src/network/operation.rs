use std::fmt;
use std::str::FromStr;

use crate::rpc::ApiVersion;

/// The version every network manager implements.
///
/// Operations that need a later server capability declare their own version in
/// [`Operation::version`].
pub const BASE_RPC_API_VERSION: ApiVersion = ApiVersion::new(1, 0);

/// How a message is handed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// Request/reply to one consumer.
    Call,
    /// Fire-and-forget to one consumer.
    Cast,
    /// Fire-and-forget to every consumer of the topic.
    Fanout,
}

/// Where a message is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Routing {
    /// The service's base topic.
    Service,
    /// The host topic of the node named by the caller.
    Host,
    /// The host topic when the caller names a node, the base topic otherwise.
    OptionalHost,
}

/// Indicates that a method name is not part of the network RPC API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network operation '{0}'")]
pub struct UnknownOperation(pub String);

macro_rules! operations {
    ($( $variant:ident => $name:literal, $dispatch:ident, $routing:ident, ($major:literal, $minor:literal); )*) => {
        /// Every remote procedure exposed by the network manager.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $( $variant, )*
        }

        impl Operation {
            /// All operations, in API declaration order.
            pub const ALL: &'static [Operation] = &[ $( Operation::$variant, )* ];

            /// The method name sent on the wire.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Operation::$variant => $name, )*
                }
            }

            pub const fn dispatch(self) -> Dispatch {
                match self {
                    $( Operation::$variant => Dispatch::$dispatch, )*
                }
            }

            pub const fn routing(self) -> Routing {
                match self {
                    $( Operation::$variant => Routing::$routing, )*
                }
            }

            /// The minimum server API version this operation requires.
            pub const fn version(self) -> ApiVersion {
                match self {
                    $( Operation::$variant => ApiVersion::new($major, $minor), )*
                }
            }
        }

        impl FromStr for Operation {
            type Err = UnknownOperation;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(Operation::$variant), )*
                    other => Err(UnknownOperation(other.to_string())),
                }
            }
        }
    };
}

// API version history:
//
//   1.0 - Initial version.
//   1.1 - Adds migrate_instance_[start|finish]
//   1.2 - Make migrate_instance_[start|finish] a little more flexible
//   1.3 - Adds fanout cast update_dns for multi_host networks
//   1.4 - Add get_backdoor_port()
//   1.5 - Adds associate
//   1.6 - Adds instance_uuid to _{dis,}associate_floating_ip
//
// The three underscore-prefixed names are part of the 1.x wire contract and must not change
// before a 2.0 API.
operations! {
    GetAllNetworks => "get_all_networks", Call, Service, (1, 0);
    GetNetwork => "get_network", Call, Service, (1, 0);
    CreateNetworks => "create_networks", Call, Service, (1, 0);
    DeleteNetwork => "delete_network", Call, Service, (1, 0);
    DisassociateNetwork => "disassociate_network", Call, Service, (1, 0);
    GetFixedIp => "get_fixed_ip", Call, Service, (1, 0);
    GetFixedIpByAddress => "get_fixed_ip_by_address", Call, Service, (1, 0);
    GetFloatingIp => "get_floating_ip", Call, Service, (1, 0);
    GetFloatingPools => "get_floating_pools", Call, Service, (1, 0);
    GetFloatingIpByAddress => "get_floating_ip_by_address", Call, Service, (1, 0);
    GetFloatingIpsByProject => "get_floating_ips_by_project", Call, Service, (1, 0);
    GetFloatingIpsByFixedAddress => "get_floating_ips_by_fixed_address", Call, Service, (1, 0);
    GetInstanceIdByFloatingAddress => "get_instance_id_by_floating_address", Call, Service, (1, 0);
    GetBackdoorPort => "get_backdoor_port", Call, Host, (1, 4);
    GetVifsByInstance => "get_vifs_by_instance", Call, Service, (1, 0);
    GetVifByMacAddress => "get_vif_by_mac_address", Call, Service, (1, 0);
    AllocateFloatingIp => "allocate_floating_ip", Call, Service, (1, 0);
    DeallocateFloatingIp => "deallocate_floating_ip", Call, Service, (1, 0);
    AssociateFloatingIp => "associate_floating_ip", Call, Service, (1, 0);
    DisassociateFloatingIp => "disassociate_floating_ip", Call, Service, (1, 0);
    AllocateForInstance => "allocate_for_instance", Call, Service, (1, 0);
    DeallocateForInstance => "deallocate_for_instance", Call, Service, (1, 0);
    AddFixedIpToInstance => "add_fixed_ip_to_instance", Call, Service, (1, 0);
    RemoveFixedIpFromInstance => "remove_fixed_ip_from_instance", Call, Service, (1, 0);
    AddNetworkToProject => "add_network_to_project", Call, Service, (1, 0);
    Associate => "associate", Call, Service, (1, 5);
    GetInstanceNwInfo => "get_instance_nw_info", Call, Service, (1, 0);
    ValidateNetworks => "validate_networks", Call, Service, (1, 0);
    GetInstanceUuidsByIpFilter => "get_instance_uuids_by_ip_filter", Call, Service, (1, 0);
    GetDnsDomains => "get_dns_domains", Call, Service, (1, 0);
    AddDnsEntry => "add_dns_entry", Call, Service, (1, 0);
    ModifyDnsEntry => "modify_dns_entry", Call, Service, (1, 0);
    DeleteDnsEntry => "delete_dns_entry", Call, Service, (1, 0);
    DeleteDnsDomain => "delete_dns_domain", Call, Service, (1, 0);
    GetDnsEntriesByAddress => "get_dns_entries_by_address", Call, Service, (1, 0);
    GetDnsEntriesByName => "get_dns_entries_by_name", Call, Service, (1, 0);
    CreatePrivateDnsDomain => "create_private_dns_domain", Call, Service, (1, 0);
    CreatePublicDnsDomain => "create_public_dns_domain", Call, Service, (1, 0);
    SetupNetworksOnHost => "setup_networks_on_host", Call, Service, (1, 0);
    SetNetworkHost => "set_network_host", Call, Service, (1, 0);
    RpcSetupNetworkOnHost => "rpc_setup_network_on_host", Call, Host, (1, 0);
    AllocateFixedIpOnHost => "_rpc_allocate_fixed_ip", Call, Host, (1, 0);
    DeallocateFixedIp => "deallocate_fixed_ip", Call, Host, (1, 0);
    UpdateDns => "update_dns", Fanout, Service, (1, 3);
    AssociateFloatingIpOnHost => "_associate_floating_ip", Call, Host, (1, 6);
    DisassociateFloatingIpOnHost => "_disassociate_floating_ip", Call, Host, (1, 6);
    LeaseFixedIp => "lease_fixed_ip", Cast, Host, (1, 0);
    ReleaseFixedIp => "release_fixed_ip", Cast, Host, (1, 0);
    MigrateInstanceStart => "migrate_instance_start", Call, OptionalHost, (1, 2);
    MigrateInstanceFinish => "migrate_instance_finish", Call, OptionalHost, (1, 2);
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
