//! Access lists and DHCP pools.

use netsim_state::{DhcpPool, records};
use netsim_types::{Result, UserError};

use super::{ActionReply, Environment, required, validate};

/// Numbered IP access-list ranges (standard and extended, including the
/// expanded ranges).
fn valid_acl_id(id: u16) -> bool {
    matches!(id, 1..=199 | 1300..=2699)
}

/// `access-list <id> <permit|deny> <source...>`.
pub fn add_acl_rule(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let id_text = required(args, 0, "access-list")?;
    let id = id_text.parse::<u16>().ok().filter(|id| valid_acl_id(*id)).ok_or_else(|| {
        UserError::invalid(
            "access-list",
            format!("'{id_text}' is not a numbered access list (1-199, 1300-2699)"),
        )
    })?;
    let verdict = required(args, 1, "action")?.to_ascii_lowercase();
    if verdict != "permit" && verdict != "deny" {
        return Err(UserError::invalid(
            "action",
            format!("expected permit or deny, got '{verdict}'"),
        )
        .into());
    }
    let rest = args.get(2..).unwrap_or_default();
    if rest.is_empty() {
        return Err(UserError::invalid("source", "value is missing").into());
    }
    let rule = format!("{verdict} {}", rest.join(" "));
    records::append_acl_rule(env.store, &id.to_string(), &rule)?;
    Ok(ActionReply::silent())
}

pub fn remove_acl(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let id = required(args, 0, "access-list")?;
    if !records::remove_acl(env.store, id)? {
        return Err(UserError::invalid(
            "access-list",
            format!("access list {id} is not configured"),
        )
        .into());
    }
    Ok(ActionReply::silent())
}

/// `ip dhcp pool <name> <network> <mask> [default-router] [dns-server]`.
pub fn configure_dhcp_pool(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let name = required(args, 0, "pool")?;
    let (network, mask) = validate::network(
        required(args, 1, "network")?,
        required(args, 2, "mask")?,
    )?;
    let default_router = match args.get(3) {
        Some(text) => Some(validate::ipv4("default-router", text)?.to_string()),
        None => None,
    };
    let dns_server = match args.get(4) {
        Some(text) => Some(validate::ipv4("dns-server", text)?.to_string()),
        None => None,
    };
    records::put_dhcp_pool(env.store, name, DhcpPool {
        network: network.to_string(),
        mask: mask.to_string(),
        default_router,
        dns_server,
    })?;
    Ok(ActionReply::text(format!(
        "DHCP pool {name} serving {network}/{}",
        validate::prefix_len(mask)
    )))
}

pub fn remove_dhcp_pool(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let name = required(args, 0, "pool")?;
    if !records::remove_dhcp_pool(env.store, name)? {
        return Err(UserError::invalid("pool", format!("DHCP pool {name} does not exist")).into());
    }
    Ok(ActionReply::silent())
}
