//! Read-only `show` commands.
//!
//! Every listing renders from a [`DeviceState`] snapshot whose maps are
//! ordered, so the same state always prints the same text.

use std::net::Ipv4Addr;

use netsim_state::{DeviceState, InterfaceStatus, Route};
use netsim_types::{DeviceType, Result};

use super::{ActionReply, Environment, validate};

fn snapshot(env: &Environment<'_>) -> Result<DeviceState> {
    let mut state = DeviceState::load(&*env.store)?;
    if state.hostname.is_empty() {
        state.hostname = env.device.display_name().to_string();
    }
    Ok(state)
}

/// `a.b.c.d/m.m.m.m` to `a.b.c.d/len`. Unparseable masks are shown verbatim.
fn cidr(destination: &str) -> String {
    match destination.split_once('/') {
        Some((net, mask)) => match mask.parse::<Ipv4Addr>() {
            Ok(mask) => format!("{net}/{}", validate::prefix_len(mask)),
            Err(_) => destination.to_string(),
        },
        None => destination.to_string(),
    }
}

fn route_statement(route: &Route) -> String {
    let (net, mask) = route
        .destination
        .split_once('/')
        .unwrap_or((route.destination.as_str(), ""));
    let mut line = format!("ip route {net} {mask} {}", route.next_hop);
    if route.distance != 1 {
        line.push_str(&format!(" {}", route.distance));
    }
    line
}

// ---------------------------------------------------------------------------
// show running-config
// ---------------------------------------------------------------------------

pub fn running_config(env: &Environment<'_>) -> Result<ActionReply> {
    let state = snapshot(env)?;
    let mut lines = vec![
        "Building configuration...".to_string(),
        String::new(),
        "Current configuration:".to_string(),
        "!".to_string(),
        format!("hostname {}", state.hostname),
        "!".to_string(),
    ];

    for (id, vlan) in &state.vlans {
        lines.push(format!("vlan {id}"));
        lines.push(format!(" name {}", vlan.name));
        lines.push("!".to_string());
    }

    for (name, iface) in &state.interfaces {
        lines.push(format!("interface {name}"));
        if let Some(desc) = &iface.description {
            lines.push(format!(" description {desc}"));
        }
        match (&iface.ip_address, &iface.subnet_mask) {
            (Some(ip), Some(mask)) => lines.push(format!(" ip address {ip} {mask}")),
            (Some(ip), None) => lines.push(format!(" ip address {ip}")),
            _ => lines.push(" no ip address".to_string()),
        }
        if let Some(vlan) = iface.access_vlan {
            lines.push(" switchport mode access".to_string());
            lines.push(format!(" switchport access vlan {vlan}"));
        }
        if iface.status == InterfaceStatus::AdminDown {
            lines.push(" shutdown".to_string());
        }
        lines.push("!".to_string());
    }

    for (key, process) in &state.routing_protocols {
        lines.push(format!("router {key}"));
        for network in &process.networks {
            lines.push(format!(" network {network}"));
        }
        lines.push("!".to_string());
    }

    for route in &state.routing_table {
        lines.push(route_statement(route));
    }
    if !state.routing_table.is_empty() {
        lines.push("!".to_string());
    }

    for (id, rules) in &state.access_lists {
        for rule in rules {
            lines.push(format!("access-list {id} {rule}"));
        }
    }
    if !state.access_lists.is_empty() {
        lines.push("!".to_string());
    }

    for (name, pool) in &state.dhcp_pools {
        lines.push(format!("ip dhcp pool {name}"));
        lines.push(format!(" network {} {}", pool.network, pool.mask));
        if let Some(router) = &pool.default_router {
            lines.push(format!(" default-router {router}"));
        }
        if let Some(dns) = &pool.dns_server {
            lines.push(format!(" dns-server {dns}"));
        }
        lines.push("!".to_string());
    }

    lines.push("end".to_string());
    Ok(ActionReply::text(lines.join("\n")))
}

// ---------------------------------------------------------------------------
// show interfaces
// ---------------------------------------------------------------------------

pub fn interfaces(env: &Environment<'_>) -> Result<ActionReply> {
    let state = snapshot(env)?;
    if state.interfaces.is_empty() {
        return Ok(ActionReply::text("No interfaces configured"));
    }
    let mut lines = Vec::new();
    for (name, iface) in &state.interfaces {
        let protocol = match iface.status {
            InterfaceStatus::Up => "up",
            InterfaceStatus::AdminDown => "down",
        };
        lines.push(format!(
            "{name} is {}, line protocol is {protocol}",
            iface.status
        ));
        if let Some(desc) = &iface.description {
            lines.push(format!("  Description: {desc}"));
        }
        let address = match (&iface.ip_address, &iface.subnet_mask) {
            (Some(ip), Some(mask)) => match mask.parse::<Ipv4Addr>() {
                Ok(m) => format!("{ip}/{}", validate::prefix_len(m)),
                Err(_) => format!("{ip} {mask}"),
            },
            (Some(ip), None) => format!("{ip} (no mask)"),
            _ => "unassigned".to_string(),
        };
        lines.push(format!("  Internet address is {address}"));
        if let Some(vlan) = iface.access_vlan {
            lines.push(format!("  Access VLAN: {vlan}"));
        }
    }
    Ok(ActionReply::text(lines.join("\n")))
}

// ---------------------------------------------------------------------------
// show ip route
// ---------------------------------------------------------------------------

pub fn ip_route(env: &Environment<'_>) -> Result<ActionReply> {
    let state = snapshot(env)?;
    let mut lines = vec![
        "Codes: C - connected, S - static".to_string(),
        String::new(),
    ];
    match state
        .routing_table
        .iter()
        .find(|r| r.destination == "0.0.0.0/0.0.0.0")
    {
        Some(default) => lines.push(format!(
            "Gateway of last resort is {} to network 0.0.0.0",
            default.next_hop
        )),
        None => lines.push("Gateway of last resort is not set".to_string()),
    }
    lines.push(String::new());

    for (name, iface) in &state.interfaces {
        if iface.status != InterfaceStatus::Up {
            continue;
        }
        let (Some(ip), Some(mask)) = (&iface.ip_address, &iface.subnet_mask) else {
            continue;
        };
        let (Ok(ip), Ok(mask)) = (ip.parse::<Ipv4Addr>(), mask.parse::<Ipv4Addr>()) else {
            continue;
        };
        let network = Ipv4Addr::from(u32::from(ip) & u32::from(mask));
        lines.push(format!(
            "C    {network}/{} is directly connected, {name}",
            validate::prefix_len(mask)
        ));
    }
    for route in &state.routing_table {
        lines.push(format!(
            "S    {} [{}/0] via {}",
            cidr(&route.destination),
            route.distance,
            route.next_hop
        ));
    }
    Ok(ActionReply::text(lines.join("\n")))
}

// ---------------------------------------------------------------------------
// show vlan
// ---------------------------------------------------------------------------

pub fn vlan(env: &Environment<'_>) -> Result<ActionReply> {
    let state = snapshot(env)?;
    let mut lines = vec![
        format!("{:<5} {:<32} {:<9} {}", "VLAN", "Name", "Status", "Ports"),
        format!("{} {} {} {}", "-".repeat(4), "-".repeat(32), "-".repeat(9), "-".repeat(30)),
    ];
    for (id, vlan) in &state.vlans {
        lines.push(format!(
            "{:<5} {:<32} {:<9} {}",
            id,
            vlan.name,
            "active",
            vlan.members.join(", ")
        ));
    }
    Ok(ActionReply::text(lines.join("\n")))
}

// ---------------------------------------------------------------------------
// show access-lists
// ---------------------------------------------------------------------------

pub fn access_lists(env: &Environment<'_>) -> Result<ActionReply> {
    let state = snapshot(env)?;
    if state.access_lists.is_empty() {
        return Ok(ActionReply::text("No access lists configured"));
    }
    let mut lines = Vec::new();
    for (id, rules) in &state.access_lists {
        let kind = match id.parse::<u16>() {
            Ok(n) if (100..=199).contains(&n) || (2000..=2699).contains(&n) => "Extended",
            _ => "Standard",
        };
        lines.push(format!("{kind} IP access list {id}"));
        for (seq, rule) in rules.iter().enumerate() {
            lines.push(format!("    {} {rule}", (seq + 1) * 10));
        }
    }
    Ok(ActionReply::text(lines.join("\n")))
}

// ---------------------------------------------------------------------------
// show ip dhcp pool
// ---------------------------------------------------------------------------

pub fn dhcp_pools(env: &Environment<'_>) -> Result<ActionReply> {
    let state = snapshot(env)?;
    if state.dhcp_pools.is_empty() {
        return Ok(ActionReply::text("No DHCP pools configured"));
    }
    let mut lines = Vec::new();
    for (name, pool) in &state.dhcp_pools {
        lines.push(format!("Pool {name} :"));
        lines.push(format!(" Network                : {} {}", pool.network, pool.mask));
        lines.push(format!(
            " Default router         : {}",
            pool.default_router.as_deref().unwrap_or("-")
        ));
        lines.push(format!(
            " DNS server             : {}",
            pool.dns_server.as_deref().unwrap_or("-")
        ));
    }
    Ok(ActionReply::text(lines.join("\n")))
}

// ---------------------------------------------------------------------------
// show ip protocols
// ---------------------------------------------------------------------------

pub fn ip_protocols(env: &Environment<'_>) -> Result<ActionReply> {
    let state = snapshot(env)?;
    if state.routing_protocols.is_empty() {
        return Ok(ActionReply::text("No routing protocols configured"));
    }
    let mut lines = Vec::new();
    for (key, process) in &state.routing_protocols {
        lines.push(format!("Routing Protocol is \"{key}\""));
        lines.push("  Routing for Networks:".to_string());
        for network in &process.networks {
            lines.push(format!("    {network}"));
        }
    }
    Ok(ActionReply::text(lines.join("\n")))
}

// ---------------------------------------------------------------------------
// show version / show history
// ---------------------------------------------------------------------------

pub fn version(env: &Environment<'_>) -> Result<ActionReply> {
    let state = snapshot(env)?;
    let (software, ports) = match env.device {
        DeviceType::Router => (
            "ISR Software (X86_64_LINUX_IOSD-UNIVERSALK9-M)",
            "4 Gigabit Ethernet interfaces",
        ),
        DeviceType::Switch => (
            "C2960X Software (C2960X-UNIVERSALK9-M)",
            "24 FastEthernet interfaces",
        ),
    };
    let lines = [
        format!("Cisco IOS Software, {software}, Version 15.2(7)E"),
        format!("netsim {} training emulator", env!("CARGO_PKG_VERSION")),
        String::new(),
        format!("{} uptime is 0 minutes", state.hostname),
        format!(
            "cisco {} ({}) processor with 4096K bytes of memory.",
            env.device.model(),
            env.device.display_name()
        ),
        ports.to_string(),
        format!("{} interface(s) configured", state.interfaces.len()),
    ];
    Ok(ActionReply::text(lines.join("\n")))
}

pub fn history(env: &Environment<'_>) -> ActionReply {
    let lines: Vec<String> = env.history.iter().map(|line| format!("  {line}")).collect();
    ActionReply::text(lines.join("\n"))
}
