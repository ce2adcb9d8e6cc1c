use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::context::RequestContext;
use crate::network::config::NetworkApiConfig;
use crate::network::operation::{BASE_RPC_API_VERSION, Dispatch, Operation, Routing};
use crate::network::types::{
    CreateNetworksRequest, InstanceAllocation, InstanceMigration, NetworkAssociations,
    RequestedNetwork, requested_networks_value,
};
use crate::rpc::{Args, Message, RpcError, RpcProxy, RpcTransport};

/// Client side of the network RPC API.
///
/// Every method builds the message for one remote procedure of the network manager and hands
/// it to the transport. Request/reply methods return whatever the manager replied with;
/// fire-and-forget methods return once the transport has accepted the message. Transport
/// failures are returned as-is.
///
/// Most operations go to the configured network topic. Those that must run on a particular
/// node take a `host` and are sent to that host's topic.
///
/// # Example
///
/// ```ignore
/// use network_rpcapi::{NetworkApi, NetworkApiConfig, RequestContext};
///
/// let api = NetworkApi::new(transport, NetworkApiConfig::from_env());
/// let ctx = RequestContext::admin();
///
/// let networks = api.get_all_networks(&ctx).await?;
/// api.lease_fixed_ip(&ctx, "10.0.0.3", "net-host-1").await?;
/// ```
#[derive(Debug, Clone)]
pub struct NetworkApi<T> {
    proxy: RpcProxy<T>,
}

impl<T: RpcTransport> NetworkApi<T> {
    pub fn new(transport: T, config: NetworkApiConfig) -> Self {
        let topic = config.topic().to_string();

        info!(
            topic = %topic,
            version = %BASE_RPC_API_VERSION,
            "Network RPC client ready"
        );

        Self {
            proxy: RpcProxy::new(transport, topic, BASE_RPC_API_VERSION),
        }
    }

    /// The base topic network messages are sent to.
    pub fn topic(&self) -> &str {
        self.proxy.topic()
    }

    pub fn proxy(&self) -> &RpcProxy<T> {
        &self.proxy
    }

    pub async fn get_all_networks(&self, ctx: &RequestContext) -> Result<Value, RpcError> {
        self.call(ctx, Operation::GetAllNetworks, Args::new(), None)
            .await
    }

    pub async fn get_network(
        &self,
        ctx: &RequestContext,
        network_uuid: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("network_uuid", network_uuid);
        self.call(ctx, Operation::GetNetwork, args, None).await
    }

    /// Create one or more networks. Only the options set on `request` are sent.
    pub async fn create_networks(
        &self,
        ctx: &RequestContext,
        request: &CreateNetworksRequest,
    ) -> Result<Value, RpcError> {
        let args = Args::from_serializable(request)?;
        self.call(ctx, Operation::CreateNetworks, args, None).await
    }

    pub async fn delete_network(
        &self,
        ctx: &RequestContext,
        uuid: &str,
        fixed_range: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("uuid", uuid)
            .with("fixed_range", fixed_range);
        self.call(ctx, Operation::DeleteNetwork, args, None).await
    }

    pub async fn disassociate_network(
        &self,
        ctx: &RequestContext,
        network_uuid: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("network_uuid", network_uuid);
        self.call(ctx, Operation::DisassociateNetwork, args, None)
            .await
    }

    pub async fn get_fixed_ip(&self, ctx: &RequestContext, id: i64) -> Result<Value, RpcError> {
        let args = Args::new().with("id", id);
        self.call(ctx, Operation::GetFixedIp, args, None).await
    }

    pub async fn get_fixed_ip_by_address(
        &self,
        ctx: &RequestContext,
        address: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("address", address);
        self.call(ctx, Operation::GetFixedIpByAddress, args, None)
            .await
    }

    pub async fn get_floating_ip(&self, ctx: &RequestContext, id: i64) -> Result<Value, RpcError> {
        let args = Args::new().with("id", id);
        self.call(ctx, Operation::GetFloatingIp, args, None).await
    }

    pub async fn get_floating_pools(&self, ctx: &RequestContext) -> Result<Value, RpcError> {
        self.call(ctx, Operation::GetFloatingPools, Args::new(), None)
            .await
    }

    pub async fn get_floating_ip_by_address(
        &self,
        ctx: &RequestContext,
        address: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("address", address);
        self.call(ctx, Operation::GetFloatingIpByAddress, args, None)
            .await
    }

    /// Floating IPs of the project in `ctx`.
    pub async fn get_floating_ips_by_project(
        &self,
        ctx: &RequestContext,
    ) -> Result<Value, RpcError> {
        self.call(ctx, Operation::GetFloatingIpsByProject, Args::new(), None)
            .await
    }

    pub async fn get_floating_ips_by_fixed_address(
        &self,
        ctx: &RequestContext,
        fixed_address: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("fixed_address", fixed_address);
        self.call(ctx, Operation::GetFloatingIpsByFixedAddress, args, None)
            .await
    }

    pub async fn get_instance_id_by_floating_address(
        &self,
        ctx: &RequestContext,
        address: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("address", address);
        self.call(ctx, Operation::GetInstanceIdByFloatingAddress, args, None)
            .await
    }

    /// Port of the debugging backdoor of the network manager on `host`.
    pub async fn get_backdoor_port(
        &self,
        ctx: &RequestContext,
        host: &str,
    ) -> Result<Value, RpcError> {
        self.call(ctx, Operation::GetBackdoorPort, Args::new(), Some(host))
            .await
    }

    // Keyed by the numeric instance id until network data is stored by instance uuid.
    pub async fn get_vifs_by_instance(
        &self,
        ctx: &RequestContext,
        instance_id: i64,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("instance_id", instance_id);
        self.call(ctx, Operation::GetVifsByInstance, args, None)
            .await
    }

    pub async fn get_vif_by_mac_address(
        &self,
        ctx: &RequestContext,
        mac_address: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("mac_address", mac_address);
        self.call(ctx, Operation::GetVifByMacAddress, args, None)
            .await
    }

    pub async fn allocate_floating_ip(
        &self,
        ctx: &RequestContext,
        project_id: &str,
        pool: Option<&str>,
        auto_assigned: bool,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("project_id", project_id)
            .with("pool", pool)
            .with("auto_assigned", auto_assigned);
        self.call(ctx, Operation::AllocateFloatingIp, args, None)
            .await
    }

    pub async fn deallocate_floating_ip(
        &self,
        ctx: &RequestContext,
        address: &str,
        affect_auto_assigned: bool,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("address", address)
            .with("affect_auto_assigned", affect_auto_assigned);
        self.call(ctx, Operation::DeallocateFloatingIp, args, None)
            .await
    }

    pub async fn associate_floating_ip(
        &self,
        ctx: &RequestContext,
        floating_address: &str,
        fixed_address: &str,
        affect_auto_assigned: bool,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("floating_address", floating_address)
            .with("fixed_address", fixed_address)
            .with("affect_auto_assigned", affect_auto_assigned);
        self.call(ctx, Operation::AssociateFloatingIp, args, None)
            .await
    }

    pub async fn disassociate_floating_ip(
        &self,
        ctx: &RequestContext,
        address: &str,
        affect_auto_assigned: bool,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("address", address)
            .with("affect_auto_assigned", affect_auto_assigned);
        self.call(ctx, Operation::DisassociateFloatingIp, args, None)
            .await
    }

    pub async fn allocate_for_instance(
        &self,
        ctx: &RequestContext,
        allocation: &InstanceAllocation,
    ) -> Result<Value, RpcError> {
        let requested_networks = allocation
            .requested_networks
            .as_deref()
            .map(requested_networks_value);

        let args = Args::new()
            .with("instance_id", allocation.instance_id)
            .with("instance_uuid", allocation.instance_uuid.as_str())
            .with("project_id", allocation.project_id.as_str())
            .with("host", allocation.host.as_str())
            .with("rxtx_factor", allocation.rxtx_factor)
            .with("vpn", allocation.vpn)
            .with("requested_networks", requested_networks);
        self.call(ctx, Operation::AllocateForInstance, args, None)
            .await
    }

    pub async fn deallocate_for_instance(
        &self,
        ctx: &RequestContext,
        instance_id: i64,
        project_id: &str,
        host: Option<&str>,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("instance_id", instance_id)
            .with("project_id", project_id)
            .with("host", host);
        self.call(ctx, Operation::DeallocateForInstance, args, None)
            .await
    }

    pub async fn add_fixed_ip_to_instance(
        &self,
        ctx: &RequestContext,
        instance_id: i64,
        host: &str,
        network_id: i64,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("instance_id", instance_id)
            .with("host", host)
            .with("network_id", network_id);
        self.call(ctx, Operation::AddFixedIpToInstance, args, None)
            .await
    }

    pub async fn remove_fixed_ip_from_instance(
        &self,
        ctx: &RequestContext,
        instance_id: i64,
        host: &str,
        address: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("instance_id", instance_id)
            .with("host", host)
            .with("address", address);
        self.call(ctx, Operation::RemoveFixedIpFromInstance, args, None)
            .await
    }

    pub async fn add_network_to_project(
        &self,
        ctx: &RequestContext,
        project_id: &str,
        network_uuid: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("project_id", project_id)
            .with("network_uuid", network_uuid);
        self.call(ctx, Operation::AddNetworkToProject, args, None)
            .await
    }

    /// Change the host and/or project a network is associated with.
    pub async fn associate(
        &self,
        ctx: &RequestContext,
        network_uuid: &str,
        associations: &NetworkAssociations,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("network_uuid", network_uuid)
            .with("associations", Value::from(associations));
        self.call(ctx, Operation::Associate, args, None).await
    }

    pub async fn get_instance_nw_info(
        &self,
        ctx: &RequestContext,
        instance_id: i64,
        instance_uuid: &str,
        rxtx_factor: f64,
        host: &str,
        project_id: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("instance_id", instance_id)
            .with("instance_uuid", instance_uuid)
            .with("rxtx_factor", rxtx_factor)
            .with("host", host)
            .with("project_id", project_id);
        self.call(ctx, Operation::GetInstanceNwInfo, args, None)
            .await
    }

    pub async fn validate_networks(
        &self,
        ctx: &RequestContext,
        networks: &[RequestedNetwork],
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("networks", requested_networks_value(networks));
        self.call(ctx, Operation::ValidateNetworks, args, None)
            .await
    }

    /// Instances whose addresses match `filters` (e.g. `{"ip": "^10\\.0\\.0\\.", "ip6": ...}`).
    pub async fn get_instance_uuids_by_ip_filter(
        &self,
        ctx: &RequestContext,
        filters: &Map<String, Value>,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("filters", Value::Object(filters.clone()));
        self.call(ctx, Operation::GetInstanceUuidsByIpFilter, args, None)
            .await
    }

    pub async fn get_dns_domains(&self, ctx: &RequestContext) -> Result<Value, RpcError> {
        self.call(ctx, Operation::GetDnsDomains, Args::new(), None)
            .await
    }

    pub async fn add_dns_entry(
        &self,
        ctx: &RequestContext,
        address: &str,
        name: &str,
        dns_type: &str,
        domain: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("address", address)
            .with("name", name)
            .with("dns_type", dns_type)
            .with("domain", domain);
        self.call(ctx, Operation::AddDnsEntry, args, None).await
    }

    pub async fn modify_dns_entry(
        &self,
        ctx: &RequestContext,
        address: &str,
        name: &str,
        domain: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("address", address)
            .with("name", name)
            .with("domain", domain);
        self.call(ctx, Operation::ModifyDnsEntry, args, None).await
    }

    pub async fn delete_dns_entry(
        &self,
        ctx: &RequestContext,
        name: &str,
        domain: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("name", name).with("domain", domain);
        self.call(ctx, Operation::DeleteDnsEntry, args, None).await
    }

    pub async fn delete_dns_domain(
        &self,
        ctx: &RequestContext,
        domain: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("domain", domain);
        self.call(ctx, Operation::DeleteDnsDomain, args, None).await
    }

    pub async fn get_dns_entries_by_address(
        &self,
        ctx: &RequestContext,
        address: &str,
        domain: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("address", address).with("domain", domain);
        self.call(ctx, Operation::GetDnsEntriesByAddress, args, None)
            .await
    }

    pub async fn get_dns_entries_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
        domain: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("name", name).with("domain", domain);
        self.call(ctx, Operation::GetDnsEntriesByName, args, None)
            .await
    }

    pub async fn create_private_dns_domain(
        &self,
        ctx: &RequestContext,
        domain: &str,
        av_zone: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("domain", domain).with("av_zone", av_zone);
        self.call(ctx, Operation::CreatePrivateDnsDomain, args, None)
            .await
    }

    pub async fn create_public_dns_domain(
        &self,
        ctx: &RequestContext,
        domain: &str,
        project: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("domain", domain).with("project", project);
        self.call(ctx, Operation::CreatePublicDnsDomain, args, None)
            .await
    }

    // A call rather than a cast so the caller waits for the setup to complete.
    pub async fn setup_networks_on_host(
        &self,
        ctx: &RequestContext,
        instance_id: i64,
        host: Option<&str>,
        teardown: bool,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("instance_id", instance_id)
            .with("host", host)
            .with("teardown", teardown);
        self.call(ctx, Operation::SetupNetworksOnHost, args, None)
            .await
    }

    /// Pick a host for the network described by `network_ref`.
    ///
    /// The reference is reduced to plain JSON primitives before it is sent.
    pub async fn set_network_host<N: Serialize + ?Sized>(
        &self,
        ctx: &RequestContext,
        network_ref: &N,
    ) -> Result<Value, RpcError> {
        let network_ref = serde_json::to_value(network_ref)?;
        let args = Args::new().with("network_ref", network_ref);
        self.call(ctx, Operation::SetNetworkHost, args, None).await
    }

    // A call rather than a cast so the caller waits for the setup to complete.
    pub async fn rpc_setup_network_on_host(
        &self,
        ctx: &RequestContext,
        network_id: i64,
        teardown: bool,
        host: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("network_id", network_id)
            .with("teardown", teardown);
        self.call(ctx, Operation::RpcSetupNetworkOnHost, args, Some(host))
            .await
    }

    /// Allocate a fixed IP on the network host `host`. Sent as `_rpc_allocate_fixed_ip`.
    pub async fn allocate_fixed_ip_on_host(
        &self,
        ctx: &RequestContext,
        instance_id: i64,
        network_id: i64,
        address: Option<&str>,
        vpn: bool,
        host: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("instance_id", instance_id)
            .with("network_id", network_id)
            .with("address", address)
            .with("vpn", vpn);
        self.call(ctx, Operation::AllocateFixedIpOnHost, args, Some(host))
            .await
    }

    pub async fn deallocate_fixed_ip(
        &self,
        ctx: &RequestContext,
        address: &str,
        host: &str,
    ) -> Result<Value, RpcError> {
        let args = Args::new().with("address", address).with("host", host);
        self.call(ctx, Operation::DeallocateFixedIp, args, Some(host))
            .await
    }

    /// Ask every network manager to refresh DNS for `network_ids` (multi-host networks).
    pub async fn update_dns(
        &self,
        ctx: &RequestContext,
        network_ids: &[i64],
    ) -> Result<(), RpcError> {
        let args = Args::new().with("network_ids", network_ids.to_vec());
        self.fanout_cast(ctx, Operation::UpdateDns, args).await
    }

    /// Associate a floating IP on the network host `host`. Sent as `_associate_floating_ip`.
    pub async fn associate_floating_ip_on_host(
        &self,
        ctx: &RequestContext,
        floating_address: &str,
        fixed_address: &str,
        interface: &str,
        host: &str,
        instance_uuid: Option<&str>,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("floating_address", floating_address)
            .with("fixed_address", fixed_address)
            .with("interface", interface)
            .with("instance_uuid", instance_uuid);
        self.call(ctx, Operation::AssociateFloatingIpOnHost, args, Some(host))
            .await
    }

    /// Disassociate a floating IP on the network host `host`. Sent as `_disassociate_floating_ip`.
    pub async fn disassociate_floating_ip_on_host(
        &self,
        ctx: &RequestContext,
        address: &str,
        interface: &str,
        host: &str,
        instance_uuid: Option<&str>,
    ) -> Result<Value, RpcError> {
        let args = Args::new()
            .with("address", address)
            .with("interface", interface)
            .with("instance_uuid", instance_uuid);
        self.call(
            ctx,
            Operation::DisassociateFloatingIpOnHost,
            args,
            Some(host),
        )
        .await
    }

    pub async fn lease_fixed_ip(
        &self,
        ctx: &RequestContext,
        address: &str,
        host: &str,
    ) -> Result<(), RpcError> {
        let args = Args::new().with("address", address);
        self.cast(ctx, Operation::LeaseFixedIp, args, host).await
    }

    pub async fn release_fixed_ip(
        &self,
        ctx: &RequestContext,
        address: &str,
        host: &str,
    ) -> Result<(), RpcError> {
        let args = Args::new().with("address", address);
        self.cast(ctx, Operation::ReleaseFixedIp, args, host).await
    }

    pub async fn migrate_instance_start(
        &self,
        ctx: &RequestContext,
        migration: &InstanceMigration,
    ) -> Result<Value, RpcError> {
        self.call(
            ctx,
            Operation::MigrateInstanceStart,
            migration_args(migration),
            migration.host.as_deref(),
        )
        .await
    }

    pub async fn migrate_instance_finish(
        &self,
        ctx: &RequestContext,
        migration: &InstanceMigration,
    ) -> Result<Value, RpcError> {
        self.call(
            ctx,
            Operation::MigrateInstanceFinish,
            migration_args(migration),
            migration.host.as_deref(),
        )
        .await
    }

    async fn call(
        &self,
        ctx: &RequestContext,
        op: Operation,
        args: Args,
        host: Option<&str>,
    ) -> Result<Value, RpcError> {
        debug_assert_eq!(op.dispatch(), Dispatch::Call, "{op} is not a call");
        debug_assert!(
            host.is_some() || op.routing() != Routing::Host,
            "{op} needs a host"
        );

        let topic = host.map(|host| self.proxy.host_topic(ctx, Some(host)));
        self.proxy
            .call(
                ctx,
                Message::new(op.name(), args),
                topic.as_deref(),
                Some(op.version()),
            )
            .await
    }

    async fn cast(
        &self,
        ctx: &RequestContext,
        op: Operation,
        args: Args,
        host: &str,
    ) -> Result<(), RpcError> {
        debug_assert_eq!(op.dispatch(), Dispatch::Cast, "{op} is not a cast");

        let topic = self.proxy.host_topic(ctx, Some(host));
        self.proxy
            .cast(
                ctx,
                Message::new(op.name(), args),
                Some(&topic),
                Some(op.version()),
            )
            .await
    }

    async fn fanout_cast(
        &self,
        ctx: &RequestContext,
        op: Operation,
        args: Args,
    ) -> Result<(), RpcError> {
        debug_assert_eq!(op.dispatch(), Dispatch::Fanout, "{op} is not a fanout");

        self.proxy
            .fanout_cast(ctx, Message::new(op.name(), args), Some(op.version()))
            .await
    }
}

// The manager calls the compute hosts `source` and `dest`.
fn migration_args(migration: &InstanceMigration) -> Args {
    Args::new()
        .with("instance_uuid", migration.instance_uuid.as_str())
        .with("rxtx_factor", migration.rxtx_factor)
        .with("project_id", migration.project_id.as_str())
        .with("source", migration.source_compute.as_str())
        .with("dest", migration.dest_compute.as_str())
        .with("floating_addresses", migration.floating_addresses.clone())
}
