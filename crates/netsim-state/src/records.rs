//! Typed device records and the read-modify-write helpers handlers use.
//!
//! Each helper touches exactly one store key. Multi-field changes are made
//! by calling several helpers, so they are not atomic.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use netsim_types::{NetsimError, Result, StateError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::StateStore;

/// Store keys for each record family.
pub mod keys {
    pub const HOSTNAME: &str = "hostname";
    pub const INTERFACES: &str = "interfaces";
    pub const VLANS: &str = "vlans";
    pub const ROUTING_TABLE: &str = "routing_table";
    pub const ACCESS_LISTS: &str = "access_lists";
    pub const DHCP_POOLS: &str = "dhcp_pools";
    pub const ROUTING_PROTOCOLS: &str = "routing_protocols";
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// Administrative state of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterfaceStatus {
    #[serde(rename = "up")]
    Up,
    #[default]
    #[serde(rename = "administratively down")]
    AdminDown,
}

impl fmt::Display for InterfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceStatus::Up => f.write_str("up"),
            InterfaceStatus::AdminDown => f.write_str("administratively down"),
        }
    }
}

/// Configuration of one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub status: InterfaceStatus,
    pub ip_address: Option<String>,
    pub subnet_mask: Option<String>,
    pub description: Option<String>,
    pub access_vlan: Option<u16>,
}

/// A single-field change to an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceUpdate {
    Status(InterfaceStatus),
    IpAddress(String),
    SubnetMask(String),
    Description(String),
    AccessVlan(u16),
    ClearAccessVlan,
}

impl InterfaceUpdate {
    fn apply(self, iface: &mut Interface) {
        match self {
            InterfaceUpdate::Status(s) => iface.status = s,
            InterfaceUpdate::IpAddress(ip) => iface.ip_address = Some(ip),
            InterfaceUpdate::SubnetMask(mask) => iface.subnet_mask = Some(mask),
            InterfaceUpdate::Description(d) => iface.description = Some(d),
            InterfaceUpdate::AccessVlan(id) => iface.access_vlan = Some(id),
            InterfaceUpdate::ClearAccessVlan => iface.access_vlan = None,
        }
    }
}

/// A VLAN and its member interfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vlan {
    pub name: String,
    pub members: Vec<String>,
}

/// One routing table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// `network/mask` in dotted-quad form.
    pub destination: String,
    pub next_hop: String,
    /// Administrative distance.
    pub distance: u8,
    /// When the entry was configured.
    pub created: DateTime<Utc>,
}

/// A DHCP address pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DhcpPool {
    pub network: String,
    pub mask: String,
    pub default_router: Option<String>,
    pub dns_server: Option<String>,
}

/// Dynamic routing protocols the emulator can store (never run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProtocol {
    Ospf,
    Eigrp,
    Rip,
}

impl RoutingProtocol {
    pub fn code(self) -> &'static str {
        match self {
            RoutingProtocol::Ospf => "ospf",
            RoutingProtocol::Eigrp => "eigrp",
            RoutingProtocol::Rip => "rip",
        }
    }

    /// Whether `router <protocol>` takes a process / AS number.
    pub fn needs_process_id(self) -> bool {
        !matches!(self, RoutingProtocol::Rip)
    }
}

impl fmt::Display for RoutingProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RoutingProtocol {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ospf" => Ok(RoutingProtocol::Ospf),
            "eigrp" => Ok(RoutingProtocol::Eigrp),
            "rip" => Ok(RoutingProtocol::Rip),
            _ => Err(format!("unsupported routing protocol: {s}")),
        }
    }
}

/// A configured routing process and its `network` statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingProcess {
    pub protocol: RoutingProtocol,
    pub process_id: Option<u32>,
    #[serde(default)]
    pub networks: Vec<String>,
}

impl RoutingProcess {
    /// Key under which the process is stored (`ospf 1`, `rip`).
    pub fn key(&self) -> String {
        process_key(self.protocol, self.process_id)
    }
}

/// Key for a routing process.
pub fn process_key(protocol: RoutingProtocol, process_id: Option<u32>) -> String {
    match process_id {
        Some(id) => format!("{protocol} {id}"),
        None => protocol.to_string(),
    }
}

/// Snapshot of the whole device, used for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub hostname: String,
    pub interfaces: BTreeMap<String, Interface>,
    pub vlans: BTreeMap<u16, Vlan>,
    pub routing_table: Vec<Route>,
    pub access_lists: BTreeMap<String, Vec<String>>,
    pub dhcp_pools: BTreeMap<String, DhcpPool>,
    pub routing_protocols: BTreeMap<String, RoutingProcess>,
}

impl DeviceState {
    /// Read every record family from the store.
    pub fn load(store: &dyn StateStore) -> Result<Self> {
        Ok(Self {
            hostname: hostname(store)?.unwrap_or_default(),
            interfaces: read(store, keys::INTERFACES)?,
            vlans: read(store, keys::VLANS)?,
            routing_table: read(store, keys::ROUTING_TABLE)?,
            access_lists: read(store, keys::ACCESS_LISTS)?,
            dhcp_pools: read(store, keys::DHCP_POOLS)?,
            routing_protocols: read(store, keys::ROUTING_PROTOCOLS)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Generic access
// ---------------------------------------------------------------------------

/// Read and decode a record, falling back to its default when absent.
pub fn read<T: DeserializeOwned + Default>(store: &dyn StateStore, key: &str) -> Result<T> {
    match store.get(key)? {
        Some(value) => serde_json::from_value(value).map_err(|e| {
            NetsimError::from(StateError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
        }),
        None => Ok(T::default()),
    }
}

/// Encode and store a record.
pub fn write<T: Serialize>(store: &mut dyn StateStore, key: &str, value: &T) -> Result<()> {
    let value = serde_json::to_value(value)?;
    store.set(key, value)
}

// ---------------------------------------------------------------------------
// Hostname
// ---------------------------------------------------------------------------

pub fn hostname(store: &dyn StateStore) -> Result<Option<String>> {
    read(store, keys::HOSTNAME)
}

pub fn set_hostname(store: &mut dyn StateStore, name: &str) -> Result<()> {
    write(store, keys::HOSTNAME, &name)
}

// ---------------------------------------------------------------------------
// Interfaces
// ---------------------------------------------------------------------------

pub fn interfaces(store: &dyn StateStore) -> Result<BTreeMap<String, Interface>> {
    read(store, keys::INTERFACES)
}

/// Create an interface with default settings. Returns `false` if it already
/// existed (its configuration is left alone).
pub fn add_interface(store: &mut dyn StateStore, name: &str) -> Result<bool> {
    let mut all = interfaces(store)?;
    if all.contains_key(name) {
        return Ok(false);
    }
    all.insert(name.to_string(), Interface::default());
    write(store, keys::INTERFACES, &all)?;
    Ok(true)
}

/// Apply one field change to an interface, creating it if needed.
pub fn update_interface(
    store: &mut dyn StateStore,
    name: &str,
    update: InterfaceUpdate,
) -> Result<()> {
    let mut all = interfaces(store)?;
    update.apply(all.entry(name.to_string()).or_default());
    write(store, keys::INTERFACES, &all)
}

// ---------------------------------------------------------------------------
// VLANs
// ---------------------------------------------------------------------------

pub fn vlans(store: &dyn StateStore) -> Result<BTreeMap<u16, Vlan>> {
    read(store, keys::VLANS)
}

/// Create or overwrite a VLAN. Returns the VLAN it replaced, if any.
pub fn put_vlan(store: &mut dyn StateStore, id: u16, vlan: Vlan) -> Result<Option<Vlan>> {
    let mut all = vlans(store)?;
    let previous = all.insert(id, vlan);
    write(store, keys::VLANS, &all)?;
    Ok(previous)
}

/// Rename a VLAN. Returns `false` when it does not exist.
pub fn rename_vlan(store: &mut dyn StateStore, id: u16, name: &str) -> Result<bool> {
    let mut all = vlans(store)?;
    let Some(vlan) = all.get_mut(&id) else {
        return Ok(false);
    };
    vlan.name = name.to_string();
    write(store, keys::VLANS, &all)?;
    Ok(true)
}

/// Make `interface` an access member of VLAN `id`, removing it from any other
/// VLAN. Returns `false` when the VLAN does not exist.
pub fn add_vlan_member(store: &mut dyn StateStore, id: u16, interface: &str) -> Result<bool> {
    let mut all = vlans(store)?;
    if !all.contains_key(&id) {
        return Ok(false);
    }
    for vlan in all.values_mut() {
        vlan.members.retain(|m| m != interface);
    }
    if let Some(vlan) = all.get_mut(&id) {
        vlan.members.push(interface.to_string());
    }
    write(store, keys::VLANS, &all)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Static routes
// ---------------------------------------------------------------------------

pub fn routes(store: &dyn StateStore) -> Result<Vec<Route>> {
    read(store, keys::ROUTING_TABLE)
}

/// Append a route to the end of the routing table.
pub fn add_route(store: &mut dyn StateStore, route: Route) -> Result<()> {
    let mut table = routes(store)?;
    table.push(route);
    write(store, keys::ROUTING_TABLE, &table)
}

/// Remove routes to `destination`, optionally only those via `next_hop`.
/// Returns the number of entries removed.
pub fn remove_routes(
    store: &mut dyn StateStore,
    destination: &str,
    next_hop: Option<&str>,
) -> Result<usize> {
    let mut table = routes(store)?;
    let before = table.len();
    table.retain(|r| {
        r.destination != destination || next_hop.is_some_and(|nh| r.next_hop != nh)
    });
    let removed = before - table.len();
    if removed > 0 {
        write(store, keys::ROUTING_TABLE, &table)?;
    }
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Access lists
// ---------------------------------------------------------------------------

pub fn access_lists(store: &dyn StateStore) -> Result<BTreeMap<String, Vec<String>>> {
    read(store, keys::ACCESS_LISTS)
}

/// Append a rule to an access list, creating the list if needed.
pub fn append_acl_rule(store: &mut dyn StateStore, id: &str, rule: &str) -> Result<()> {
    let mut all = access_lists(store)?;
    all.entry(id.to_string()).or_default().push(rule.to_string());
    write(store, keys::ACCESS_LISTS, &all)
}

/// Delete an access list. Returns `false` when it does not exist.
pub fn remove_acl(store: &mut dyn StateStore, id: &str) -> Result<bool> {
    let mut all = access_lists(store)?;
    if all.remove(id).is_none() {
        return Ok(false);
    }
    write(store, keys::ACCESS_LISTS, &all)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// DHCP pools
// ---------------------------------------------------------------------------

pub fn dhcp_pools(store: &dyn StateStore) -> Result<BTreeMap<String, DhcpPool>> {
    read(store, keys::DHCP_POOLS)
}

/// Create or overwrite a DHCP pool.
pub fn put_dhcp_pool(store: &mut dyn StateStore, name: &str, pool: DhcpPool) -> Result<()> {
    let mut all = dhcp_pools(store)?;
    all.insert(name.to_string(), pool);
    write(store, keys::DHCP_POOLS, &all)
}

/// Delete a DHCP pool. Returns `false` when it does not exist.
pub fn remove_dhcp_pool(store: &mut dyn StateStore, name: &str) -> Result<bool> {
    let mut all = dhcp_pools(store)?;
    if all.remove(name).is_none() {
        return Ok(false);
    }
    write(store, keys::DHCP_POOLS, &all)?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Routing processes
// ---------------------------------------------------------------------------

pub fn routing_processes(store: &dyn StateStore) -> Result<BTreeMap<String, RoutingProcess>> {
    read(store, keys::ROUTING_PROTOCOLS)
}

/// Create a routing process unless it already exists. Returns its key.
pub fn ensure_routing_process(
    store: &mut dyn StateStore,
    protocol: RoutingProtocol,
    process_id: Option<u32>,
) -> Result<String> {
    let mut all = routing_processes(store)?;
    let key = process_key(protocol, process_id);
    if !all.contains_key(&key) {
        all.insert(
            key.clone(),
            RoutingProcess {
                protocol,
                process_id,
                networks: Vec::new(),
            },
        );
        write(store, keys::ROUTING_PROTOCOLS, &all)?;
    }
    Ok(key)
}

/// Add a `network` statement to a routing process. Duplicate statements are
/// ignored. Returns `false` when the process does not exist.
pub fn add_process_network(store: &mut dyn StateStore, key: &str, network: &str) -> Result<bool> {
    let mut all = routing_processes(store)?;
    let Some(process) = all.get_mut(key) else {
        return Ok(false);
    };
    if !process.networks.iter().any(|n| n == network) {
        process.networks.push(network.to_string());
        write(store, keys::ROUTING_PROTOCOLS, &all)?;
    }
    Ok(true)
}
