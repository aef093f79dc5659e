//! The closed set of actions a command definition can trigger.

use std::fmt;
use std::str::FromStr;

use netsim_types::Defect;

/// Identifier naming the handler a command runs.
///
/// Catalogs refer to actions by their snake_case id; an id outside this set
/// is rejected when the catalog is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Mode transitions
    EnterPrivileged,
    EnterConfig,
    EnterInterfaceConfig,
    CreateVlan,
    EnterRouterConfig,
    ExitMode,
    End,
    // Global configuration
    SetHostname,
    ConfigureStaticRoute,
    RemoveStaticRoute,
    AddAclRule,
    RemoveAcl,
    ConfigureDhcpPool,
    RemoveDhcpPool,
    // Interface configuration
    SetIpAddress,
    Shutdown,
    NoShutdown,
    SetDescription,
    AssignVlan,
    // VLAN / router configuration
    SetVlanName,
    AddRouterNetwork,
    // Privileged EXEC
    SaveConfig,
    // Read-only
    ShowRunningConfig,
    ShowInterfaces,
    ShowIpRoute,
    ShowVlan,
    ShowAccessLists,
    ShowDhcpPools,
    ShowIpProtocols,
    ShowVersion,
    ShowHistory,
}

impl Action {
    /// Every action, in catalog order.
    pub const ALL: [Action; 31] = [
        Action::EnterPrivileged,
        Action::EnterConfig,
        Action::EnterInterfaceConfig,
        Action::CreateVlan,
        Action::EnterRouterConfig,
        Action::ExitMode,
        Action::End,
        Action::SetHostname,
        Action::ConfigureStaticRoute,
        Action::RemoveStaticRoute,
        Action::AddAclRule,
        Action::RemoveAcl,
        Action::ConfigureDhcpPool,
        Action::RemoveDhcpPool,
        Action::SetIpAddress,
        Action::Shutdown,
        Action::NoShutdown,
        Action::SetDescription,
        Action::AssignVlan,
        Action::SetVlanName,
        Action::AddRouterNetwork,
        Action::SaveConfig,
        Action::ShowRunningConfig,
        Action::ShowInterfaces,
        Action::ShowIpRoute,
        Action::ShowVlan,
        Action::ShowAccessLists,
        Action::ShowDhcpPools,
        Action::ShowIpProtocols,
        Action::ShowVersion,
        Action::ShowHistory,
    ];

    /// Catalog identifier.
    pub fn id(self) -> &'static str {
        match self {
            Action::EnterPrivileged => "enter_privileged",
            Action::EnterConfig => "enter_config",
            Action::EnterInterfaceConfig => "enter_interface_config",
            Action::CreateVlan => "create_vlan",
            Action::EnterRouterConfig => "enter_router_config",
            Action::ExitMode => "exit_mode",
            Action::End => "end",
            Action::SetHostname => "set_hostname",
            Action::ConfigureStaticRoute => "configure_static_route",
            Action::RemoveStaticRoute => "remove_static_route",
            Action::AddAclRule => "add_acl_rule",
            Action::RemoveAcl => "remove_acl",
            Action::ConfigureDhcpPool => "configure_dhcp_pool",
            Action::RemoveDhcpPool => "remove_dhcp_pool",
            Action::SetIpAddress => "set_ip_address",
            Action::Shutdown => "shutdown",
            Action::NoShutdown => "no_shutdown",
            Action::SetDescription => "set_description",
            Action::AssignVlan => "assign_vlan",
            Action::SetVlanName => "set_vlan_name",
            Action::AddRouterNetwork => "add_router_network",
            Action::SaveConfig => "save_config",
            Action::ShowRunningConfig => "show_running_config",
            Action::ShowInterfaces => "show_interfaces",
            Action::ShowIpRoute => "show_ip_route",
            Action::ShowVlan => "show_vlan",
            Action::ShowAccessLists => "show_access_lists",
            Action::ShowDhcpPools => "show_dhcp_pools",
            Action::ShowIpProtocols => "show_ip_protocols",
            Action::ShowVersion => "show_version",
            Action::ShowHistory => "show_history",
        }
    }

    /// True for actions that never mutate device state.
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            Action::ShowRunningConfig
                | Action::ShowInterfaces
                | Action::ShowIpRoute
                | Action::ShowVlan
                | Action::ShowAccessLists
                | Action::ShowDhcpPools
                | Action::ShowIpProtocols
                | Action::ShowVersion
                | Action::ShowHistory
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = Defect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| Defect::ActionNotImplemented(s.to_string()))
    }
}
