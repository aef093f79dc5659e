//! Action handlers.
//!
//! Each handler receives the arguments left after the command keywords, the
//! current sub-mode target and the session environment. Handlers mutate
//! device state only through the [`StateStore`] and ask for mode changes by
//! returning a [`ModeEvent`]; they never touch the mode machine directly.

mod exec;
mod interface;
mod routing;
mod services;
mod show;
pub(crate) mod validate;
mod vlan;

use netsim_state::StateStore;
use netsim_types::{Defect, DeviceType, Mode, Result, UserError};

use crate::action::Action;
use crate::state_machine::{ConfigTarget, ModeEvent};

/// Session context handed to every handler.
pub struct Environment<'a> {
    /// Emulated device model.
    pub device: DeviceType,
    /// Device state.
    pub store: &'a mut dyn StateStore,
    /// Lines entered so far this session, oldest first.
    pub history: &'a [String],
}

/// What a handler produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionReply {
    /// Text to show the operator. May be empty.
    pub text: String,
    /// Mode change to apply after the handler succeeded.
    pub event: Option<ModeEvent>,
}

impl ActionReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            event: None,
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn transition(event: ModeEvent) -> Self {
        Self {
            text: String::new(),
            event: Some(event),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Run the handler for `action`.
pub fn invoke(
    action: Action,
    args: &[&str],
    target: Option<&ConfigTarget>,
    env: &mut Environment<'_>,
) -> Result<ActionReply> {
    match action {
        Action::EnterPrivileged => Ok(exec::enter_privileged()),
        Action::EnterConfig => Ok(exec::enter_config()),
        Action::EnterInterfaceConfig => interface::enter(args, env),
        Action::CreateVlan => vlan::create(args, env),
        Action::EnterRouterConfig => routing::enter_router(args, env),
        Action::ExitMode => Ok(exec::exit_mode()),
        Action::End => Ok(exec::end()),
        Action::SetHostname => exec::set_hostname(args, env),
        Action::ConfigureStaticRoute => routing::add_static(args, env),
        Action::RemoveStaticRoute => routing::remove_static(args, env),
        Action::AddAclRule => services::add_acl_rule(args, env),
        Action::RemoveAcl => services::remove_acl(args, env),
        Action::ConfigureDhcpPool => services::configure_dhcp_pool(args, env),
        Action::RemoveDhcpPool => services::remove_dhcp_pool(args, env),
        Action::SetIpAddress => interface::set_ip_address(args, target, env),
        Action::Shutdown => interface::shutdown(target, env),
        Action::NoShutdown => interface::no_shutdown(target, env),
        Action::SetDescription => interface::set_description(args, target, env),
        Action::AssignVlan => interface::assign_vlan(args, target, env),
        Action::SetVlanName => vlan::set_name(args, target, env),
        Action::AddRouterNetwork => routing::add_network(args, target, env),
        Action::SaveConfig => exec::save_config(env),
        Action::ShowRunningConfig => show::running_config(env),
        Action::ShowInterfaces => show::interfaces(env),
        Action::ShowIpRoute => show::ip_route(env),
        Action::ShowVlan => show::vlan(env),
        Action::ShowAccessLists => show::access_lists(env),
        Action::ShowDhcpPools => show::dhcp_pools(env),
        Action::ShowIpProtocols => show::ip_protocols(env),
        Action::ShowVersion => show::version(env),
        Action::ShowHistory => Ok(show::history(env)),
    }
}

// ---------------------------------------------------------------------------
// Argument and target accessors
// ---------------------------------------------------------------------------

/// The argument at `index`. The dispatcher checks counts before a handler
/// runs, so this only fails for handlers invoked directly.
fn required<'a>(args: &[&'a str], index: usize, name: &str) -> Result<&'a str> {
    args.get(index)
        .copied()
        .ok_or_else(|| UserError::invalid(name, "value is missing").into())
}

fn interface_target(target: Option<&ConfigTarget>) -> Result<&str> {
    match target {
        Some(ConfigTarget::Interface(name)) => Ok(name),
        _ => Err(Defect::MissingTarget(Mode::ConfigInterface).into()),
    }
}

fn vlan_target(target: Option<&ConfigTarget>) -> Result<u16> {
    match target {
        Some(ConfigTarget::Vlan(id)) => Ok(*id),
        _ => Err(Defect::MissingTarget(Mode::ConfigVlan).into()),
    }
}

fn router_target(target: Option<&ConfigTarget>) -> Result<&str> {
    match target {
        Some(ConfigTarget::Router(key)) => Ok(key),
        _ => Err(Defect::MissingTarget(Mode::ConfigRouter).into()),
    }
}
