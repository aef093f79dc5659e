//! Mode transitions of a CLI session.

use std::fmt;

use netsim_types::{Defect, Mode};

/// What a configuration sub-mode is currently editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigTarget {
    /// Interface name, as typed after `interface`.
    Interface(String),
    /// VLAN id.
    Vlan(u16),
    /// Routing process key (`ospf 1`, `rip`).
    Router(String),
}

impl fmt::Display for ConfigTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigTarget::Interface(name) => write!(f, "interface {name}"),
            ConfigTarget::Vlan(id) => write!(f, "vlan {id}"),
            ConfigTarget::Router(key) => write!(f, "router {key}"),
        }
    }
}

/// Transition request emitted by an action handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeEvent {
    EnterPrivileged,
    EnterConfig,
    EnterInterfaceConfig(String),
    EnterVlanConfig(u16),
    EnterRouterConfig(String),
    /// Go up one level.
    ExitMode,
    /// Leave configuration entirely.
    End,
}

impl ModeEvent {
    /// Event name used in logs and defect reports.
    pub fn name(&self) -> &'static str {
        match self {
            ModeEvent::EnterPrivileged => "enter_privileged",
            ModeEvent::EnterConfig => "enter_config",
            ModeEvent::EnterInterfaceConfig(_) => "enter_interface_config",
            ModeEvent::EnterVlanConfig(_) => "enter_vlan_config",
            ModeEvent::EnterRouterConfig(_) => "enter_router_config",
            ModeEvent::ExitMode => "exit_mode",
            ModeEvent::End => "end",
        }
    }
}

/// Mode reached by applying `event` in `from`, or `None` when the event is
/// not legal there. `exit_mode` in `user` and `end` outside configuration
/// leave the mode unchanged.
pub fn transition(from: Mode, event: &ModeEvent) -> Option<Mode> {
    match (event, from) {
        (ModeEvent::EnterPrivileged, Mode::User) => Some(Mode::Privileged),
        (ModeEvent::EnterConfig, Mode::Privileged) => Some(Mode::Config),
        (ModeEvent::EnterInterfaceConfig(_), Mode::Config) => Some(Mode::ConfigInterface),
        (ModeEvent::EnterVlanConfig(_), Mode::Config) => Some(Mode::ConfigVlan),
        (ModeEvent::EnterRouterConfig(_), Mode::Config) => Some(Mode::ConfigRouter),
        (ModeEvent::ExitMode, mode) => Some(mode.parent().unwrap_or(mode)),
        (ModeEvent::End, mode) if mode.is_configuration() => Some(Mode::Privileged),
        (ModeEvent::End, mode) => Some(mode),
        _ => None,
    }
}

/// Current mode of a session plus the object a sub-mode is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStateMachine {
    mode: Mode,
    target: Option<ConfigTarget>,
}

impl Default for ModeStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeStateMachine {
    /// A machine in `user` mode.
    pub fn new() -> Self {
        Self {
            mode: Mode::User,
            target: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Target of the current sub-mode. `None` outside sub-modes.
    pub fn target(&self) -> Option<&ConfigTarget> {
        self.target.as_ref()
    }

    /// Apply `event`. On an illegal event the mode is left unchanged.
    pub fn enter(&mut self, event: ModeEvent) -> Result<Mode, Defect> {
        let Some(next) = transition(self.mode, &event) else {
            return Err(Defect::IllegalTransition {
                from: self.mode,
                event: event.name().to_string(),
            });
        };
        self.target = match event {
            ModeEvent::EnterInterfaceConfig(name) => Some(ConfigTarget::Interface(name)),
            ModeEvent::EnterVlanConfig(id) => Some(ConfigTarget::Vlan(id)),
            ModeEvent::EnterRouterConfig(key) => Some(ConfigTarget::Router(key)),
            _ => None,
        };
        if next != self.mode {
            log::debug!("Mode {} -> {}", self.mode, next);
        }
        self.mode = next;
        Ok(next)
    }

    /// Prompt for the current mode (`R1(config-if)#`).
    pub fn prompt(&self, hostname: &str) -> String {
        format!("{hostname}{}", self.mode.prompt_suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(events: &[ModeEvent]) -> ModeStateMachine {
        let mut m = ModeStateMachine::new();
        for e in events {
            m.enter(e.clone()).unwrap();
        }
        m
    }

    #[test]
    fn starts_in_user_mode() {
        let m = ModeStateMachine::new();
        assert_eq!(m.mode(), Mode::User);
        assert_eq!(m.prompt("Router"), "Router>");
        assert!(m.target().is_none());
    }

    #[test]
    fn walks_down_to_interface_config() {
        let mut m = ModeStateMachine::new();
        assert_eq!(m.enter(ModeEvent::EnterPrivileged).unwrap(), Mode::Privileged);
        assert_eq!(m.prompt("R1"), "R1#");
        assert_eq!(m.enter(ModeEvent::EnterConfig).unwrap(), Mode::Config);
        assert_eq!(m.prompt("R1"), "R1(config)#");
        let mode = m
            .enter(ModeEvent::EnterInterfaceConfig("GigabitEthernet0/0".into()))
            .unwrap();
        assert_eq!(mode, Mode::ConfigInterface);
        assert_eq!(m.prompt("R1"), "R1(config-if)#");
        assert_eq!(
            m.target(),
            Some(&ConfigTarget::Interface("GigabitEthernet0/0".into()))
        );
    }

    #[test]
    fn exit_pops_one_level_and_clears_target() {
        let mut m = at(&[
            ModeEvent::EnterPrivileged,
            ModeEvent::EnterConfig,
            ModeEvent::EnterVlanConfig(10),
        ]);
        assert_eq!(m.prompt("S1"), "S1(config-vlan)#");
        assert_eq!(m.enter(ModeEvent::ExitMode).unwrap(), Mode::Config);
        assert!(m.target().is_none());
        assert_eq!(m.enter(ModeEvent::ExitMode).unwrap(), Mode::Privileged);
        assert_eq!(m.enter(ModeEvent::ExitMode).unwrap(), Mode::User);
    }

    #[test]
    fn exit_in_user_mode_stays() {
        let mut m = ModeStateMachine::new();
        assert_eq!(m.enter(ModeEvent::ExitMode).unwrap(), Mode::User);
    }

    #[test]
    fn end_returns_to_privileged() {
        let mut m = at(&[
            ModeEvent::EnterPrivileged,
            ModeEvent::EnterConfig,
            ModeEvent::EnterRouterConfig("ospf 1".into()),
        ]);
        assert_eq!(m.prompt("R1"), "R1(config-router)#");
        assert_eq!(m.enter(ModeEvent::End).unwrap(), Mode::Privileged);
        assert!(m.target().is_none());
        assert_eq!(m.enter(ModeEvent::End).unwrap(), Mode::Privileged);
    }

    #[test]
    fn illegal_event_is_a_defect_and_keeps_mode() {
        let mut m = ModeStateMachine::new();
        let err = m.enter(ModeEvent::EnterConfig).unwrap_err();
        assert_eq!(err, Defect::IllegalTransition {
            from: Mode::User,
            event: "enter_config".into(),
        });
        assert_eq!(m.mode(), Mode::User);
    }

    #[test]
    fn sub_modes_are_not_nested() {
        let mut m = at(&[
            ModeEvent::EnterPrivileged,
            ModeEvent::EnterConfig,
            ModeEvent::EnterInterfaceConfig("Gi0/1".into()),
        ]);
        assert!(m.enter(ModeEvent::EnterVlanConfig(20)).is_err());
        assert_eq!(m.mode(), Mode::ConfigInterface);
        assert_eq!(m.target(), Some(&ConfigTarget::Interface("Gi0/1".into())));
    }

    #[test]
    fn target_display() {
        assert_eq!(ConfigTarget::Vlan(10).to_string(), "vlan 10");
        assert_eq!(ConfigTarget::Router("rip".into()).to_string(), "router rip");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn event() -> impl Strategy<Value = ModeEvent> {
            prop_oneof![
                Just(ModeEvent::EnterPrivileged),
                Just(ModeEvent::EnterConfig),
                "[a-z]{1,4}[0-9]".prop_map(ModeEvent::EnterInterfaceConfig),
                (1u16..4095).prop_map(ModeEvent::EnterVlanConfig),
                Just(ModeEvent::EnterRouterConfig("ospf 1".into())),
                Just(ModeEvent::ExitMode),
                Just(ModeEvent::End),
            ]
        }

        proptest! {
            #[test]
            fn machine_stays_consistent(events in prop::collection::vec(event(), 0..40)) {
                let mut m = ModeStateMachine::new();
                for e in events {
                    let before = m.mode();
                    match m.enter(e) {
                        Ok(mode) => prop_assert_eq!(mode, m.mode()),
                        Err(_) => prop_assert_eq!(before, m.mode()),
                    }
                    prop_assert_eq!(m.target().is_some(), m.mode().is_sub_mode());
                    prop_assert!(m.prompt("R").ends_with(m.mode().prompt_suffix()));
                }
            }
        }
    }
}
