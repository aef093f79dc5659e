//! Static routes and dynamic routing process configuration.

use chrono::Utc;
use netsim_state::{Route, RoutingProtocol, records};
use netsim_types::{Result, UserError};

use super::{ActionReply, Environment, required, router_target, validate};
use crate::state_machine::{ConfigTarget, ModeEvent};

// ---------------------------------------------------------------------------
// Static routes
// ---------------------------------------------------------------------------

/// `ip route <dest> <mask> <next-hop> [distance]`.
pub fn add_static(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let (dest, mask) = validate::network(
        required(args, 0, "network")?,
        required(args, 1, "mask")?,
    )?;
    let next_hop = validate::ipv4("next-hop", required(args, 2, "next-hop")?)?;
    let distance = match args.get(3) {
        Some(text) => validate::number("distance", text, 1u8..=255)?,
        None => 1,
    };
    let destination = format!("{dest}/{mask}");
    records::add_route(env.store, Route {
        destination: destination.clone(),
        next_hop: next_hop.to_string(),
        distance,
        created: Utc::now(),
    })?;
    Ok(ActionReply::text(format!(
        "Static route to {destination} via {next_hop} added"
    )))
}

/// `no ip route <dest> <mask> [next-hop]`.
pub fn remove_static(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let (dest, mask) = validate::network(
        required(args, 0, "network")?,
        required(args, 1, "mask")?,
    )?;
    let next_hop = match args.get(2) {
        Some(text) => Some(validate::ipv4("next-hop", text)?.to_string()),
        None => None,
    };
    let destination = format!("{dest}/{mask}");
    let removed = records::remove_routes(env.store, &destination, next_hop.as_deref())?;
    if removed == 0 {
        return Err(UserError::invalid(
            "ip route",
            format!("no static route to {destination}"),
        )
        .into());
    }
    Ok(ActionReply::silent())
}

// ---------------------------------------------------------------------------
// Routing processes
// ---------------------------------------------------------------------------

/// `router <ospf|eigrp|rip> [id]`.
pub fn enter_router(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let protocol: RoutingProtocol = required(args, 0, "protocol")?
        .parse()
        .map_err(|reason: String| UserError::invalid("protocol", reason))?;
    let process_id = match (protocol.needs_process_id(), args.get(1)) {
        (true, Some(text)) => Some(validate::number("process-id", text, 1u32..=65535)?),
        (true, None) => {
            return Err(UserError::invalid(
                "process-id",
                format!("router {protocol} requires a process id"),
            )
            .into());
        },
        (false, Some(_)) => {
            return Err(UserError::invalid(
                "process-id",
                format!("router {protocol} takes no process id"),
            )
            .into());
        },
        (false, None) => None,
    };
    let key = records::ensure_routing_process(env.store, protocol, process_id)?;
    Ok(ActionReply::transition(ModeEvent::EnterRouterConfig(key)))
}

/// `network <address> [wildcard] [area <n>]`. OSPF requires an area.
pub fn add_network(
    args: &[&str],
    target: Option<&ConfigTarget>,
    env: &mut Environment<'_>,
) -> Result<ActionReply> {
    let key = router_target(target)?;
    let address = validate::ipv4("network", required(args, 0, "network")?)?;
    let mut statement = address.to_string();
    if let Some(wildcard) = args.get(1) {
        let wildcard = validate::ipv4("wildcard", wildcard)?;
        statement.push_str(&format!(" {wildcard}"));
    }
    match args.get(2..) {
        Some([keyword, area]) if keyword.eq_ignore_ascii_case("area") => {
            let area = validate::number("area", area, 0u32..=u32::MAX)?;
            statement.push_str(&format!(" area {area}"));
        },
        Some([]) | None => {
            if key.starts_with(RoutingProtocol::Ospf.code()) {
                return Err(
                    UserError::invalid("area", "OSPF network statements need an area").into(),
                );
            }
        },
        Some(_) => {
            return Err(
                UserError::invalid("network", "expected 'area <id>' after the wildcard").into(),
            );
        },
    }
    if !records::add_process_network(env.store, key, &statement)? {
        return Err(UserError::invalid("router", format!("{key} is not configured")).into());
    }
    Ok(ActionReply::silent())
}
