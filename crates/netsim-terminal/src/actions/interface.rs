//! `interface` and the interface configuration sub-mode.

use netsim_state::{InterfaceStatus, InterfaceUpdate, records};
use netsim_types::{Result, UserError};

use super::{ActionReply, Environment, interface_target, required, validate};
use crate::state_machine::{ConfigTarget, ModeEvent};

pub fn enter(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let name = required(args, 0, "interface")?;
    if records::add_interface(env.store, name)? {
        log::debug!("Created interface {name}");
    }
    Ok(ActionReply::transition(ModeEvent::EnterInterfaceConfig(
        name.to_string(),
    )))
}

/// `ip address [interface] <ip> <mask>`. The address and the mask are written
/// as two separate updates.
pub fn set_ip_address(
    args: &[&str],
    target: Option<&ConfigTarget>,
    env: &mut Environment<'_>,
) -> Result<ActionReply> {
    let (interface, ip, mask) = match args {
        [interface, ip, mask] => (*interface, *ip, *mask),
        [ip, mask] => (interface_target(target)?, *ip, *mask),
        _ => {
            return Err(UserError::ArgumentCount {
                min: Some(2),
                max: Some(3),
                actual: args.len(),
            }
            .into());
        },
    };
    let ip = validate::ipv4("ip address", ip)?;
    let mask = validate::mask("subnet mask", mask)?;

    records::update_interface(env.store, interface, InterfaceUpdate::IpAddress(ip.to_string()))?;
    records::update_interface(env.store, interface, InterfaceUpdate::SubnetMask(mask.to_string()))?;
    Ok(ActionReply::text(format!(
        "Interface {interface} address set to {ip} {mask}"
    )))
}

pub fn shutdown(target: Option<&ConfigTarget>, env: &mut Environment<'_>) -> Result<ActionReply> {
    set_status(target, env, InterfaceStatus::AdminDown)
}

pub fn no_shutdown(
    target: Option<&ConfigTarget>,
    env: &mut Environment<'_>,
) -> Result<ActionReply> {
    set_status(target, env, InterfaceStatus::Up)
}

fn set_status(
    target: Option<&ConfigTarget>,
    env: &mut Environment<'_>,
    status: InterfaceStatus,
) -> Result<ActionReply> {
    let interface = interface_target(target)?;
    records::update_interface(env.store, interface, InterfaceUpdate::Status(status))?;
    Ok(ActionReply::text(format!(
        "%LINK-5-CHANGED: Interface {interface}, changed state to {status}"
    )))
}

pub fn set_description(
    args: &[&str],
    target: Option<&ConfigTarget>,
    env: &mut Environment<'_>,
) -> Result<ActionReply> {
    let interface = interface_target(target)?;
    let text = args.join(" ");
    if text.is_empty() {
        return Err(UserError::invalid("description", "value is missing").into());
    }
    records::update_interface(env.store, interface, InterfaceUpdate::Description(text))?;
    Ok(ActionReply::silent())
}

/// `switchport access vlan <id>`. The VLAN must already exist.
pub fn assign_vlan(
    args: &[&str],
    target: Option<&ConfigTarget>,
    env: &mut Environment<'_>,
) -> Result<ActionReply> {
    let interface = interface_target(target)?;
    let id = validate::vlan_id(required(args, 0, "vlan-id")?)?;
    if !records::add_vlan_member(env.store, id, interface)? {
        return Err(UserError::invalid("vlan-id", format!("VLAN {id} does not exist")).into());
    }
    records::update_interface(env.store, interface, InterfaceUpdate::AccessVlan(id))?;
    Ok(ActionReply::silent())
}
