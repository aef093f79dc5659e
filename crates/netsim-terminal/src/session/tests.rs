//! End-to-end tests driving a [`Session`] line by line.

use netsim_state::{FileStore, InterfaceStatus, MemoryStore};
use netsim_types::{NetsimError, UserError};

use super::*;
use crate::diagnostics::NullDiagnostics;
use crate::test_utils::CapturingDiagnostics;

fn session_with(config: &SimConfig) -> Session {
    Session::new(
        Catalog::builtin().unwrap(),
        Box::new(MemoryStore::new()),
        config,
        Box::new(NullDiagnostics),
    )
    .unwrap()
}

fn session() -> Session {
    session_with(&SimConfig::default())
}

fn text(outcome: Outcome) -> String {
    match outcome {
        Outcome::Completed { text, .. } => text,
        Outcome::Empty => panic!("expected a completed command"),
    }
}

fn run_all(s: &mut Session, lines: &[&str]) {
    for line in lines {
        s.interpret(line)
            .unwrap_or_else(|e| panic!("{line:?} failed: {e}"));
    }
}

// ---------------------------------------------------------------------------
// Prompts and modes
// ---------------------------------------------------------------------------

#[test]
fn prompts_follow_modes() {
    let mut s = session();
    assert_eq!(s.prompt(), "Router>");
    s.interpret("enable").unwrap();
    assert_eq!(s.prompt(), "Router#");
    s.interpret("conf t").unwrap();
    assert_eq!(s.prompt(), "Router(config)#");
    s.interpret("int Gi0/0").unwrap();
    assert_eq!(s.prompt(), "Router(config-if)#");
    s.interpret("exit").unwrap();
    s.interpret("vlan 10").unwrap();
    assert_eq!(s.prompt(), "Router(config-vlan)#");
    s.interpret("exit").unwrap();
    s.interpret("router ospf 1").unwrap();
    assert_eq!(s.prompt(), "Router(config-router)#");
    s.interpret("end").unwrap();
    assert_eq!(s.prompt(), "Router#");
    s.interpret("disable").unwrap();
    assert_eq!(s.prompt(), "Router>");
}

#[test]
fn hostname_changes_prompt() {
    let mut s = session();
    run_all(&mut s, &["enable", "configure terminal", "hostname Edge1"]);
    assert_eq!(s.prompt(), "Edge1(config)#");
    assert_eq!(s.hostname(), "Edge1");
}

#[test]
fn configured_hostname_seeds_fresh_state() {
    let config = SimConfig {
        hostname: Some("Lab7".into()),
        device: DeviceType::Switch,
        ..SimConfig::default()
    };
    let s = session_with(&config);
    assert_eq!(s.prompt(), "Lab7>");
    assert_eq!(s.device(), DeviceType::Switch);
}

#[test]
fn exit_in_user_mode_is_a_no_op() {
    let mut s = session();
    let outcome = s.interpret("exit").unwrap();
    assert!(matches!(outcome, Outcome::Completed { mode: Mode::User, .. }));
}

#[test]
fn commands_are_mode_gated() {
    let mut s = session();
    let err = s.interpret("hostname R9").unwrap_err();
    assert!(matches!(err, NetsimError::User(UserError::UnknownCommand(_))));
    assert_eq!(s.mode(), Mode::User);
}

// ---------------------------------------------------------------------------
// Configuration scenarios
// ---------------------------------------------------------------------------

#[test]
fn interface_configuration_shows_up_everywhere() {
    let mut s = session();
    run_all(&mut s, &[
        "enable",
        "configure terminal",
        "interface GigabitEthernet0/0",
        "description uplink to ISP",
        "ip address 192.168.1.1 255.255.255.0",
        "no shutdown",
        "end",
    ]);
    let running = text(s.interpret("show running-config").unwrap());
    assert!(running.contains("interface GigabitEthernet0/0"));
    assert!(running.contains(" description uplink to ISP"));
    assert!(running.contains(" ip address 192.168.1.1 255.255.255.0"));
    assert!(!running.contains(" shutdown"));

    let interfaces = text(s.interpret("show interfaces").unwrap());
    assert!(interfaces.contains("GigabitEthernet0/0 is up, line protocol is up"));

    let routes = text(s.interpret("sh ip route").unwrap());
    assert!(routes.contains("C    192.168.1.0/24 is directly connected, GigabitEthernet0/0"));
}

#[test]
fn static_routes_and_removal() {
    let mut s = session();
    run_all(&mut s, &[
        "enable",
        "conf t",
        "ip route 192.168.2.0 255.255.255.0 10.0.0.1",
        "ip route 0.0.0.0 0.0.0.0 10.0.0.254",
        "end",
    ]);
    let table = text(s.interpret("show ip route").unwrap());
    assert!(table.contains("Gateway of last resort is 10.0.0.254 to network 0.0.0.0"));
    assert!(table.contains("S    192.168.2.0/24 [1/0] via 10.0.0.1"));

    run_all(&mut s, &["conf t", "no ip route 192.168.2.0 255.255.255.0", "end"]);
    let table = text(s.interpret("show ip route").unwrap());
    assert!(!table.contains("192.168.2.0"));
}

#[test]
fn switch_vlan_workflow() {
    let mut s = session_with(&SimConfig {
        device: DeviceType::Switch,
        ..SimConfig::default()
    });
    run_all(&mut s, &[
        "enable",
        "conf t",
        "vlan 20",
        "name Engineering",
        "exit",
        "interface Fa0/1",
        "switchport access vlan 20",
        "end",
    ]);
    let vlans = text(s.interpret("show vlan").unwrap());
    let row = vlans.lines().find(|l| l.starts_with("20 ")).unwrap();
    assert!(row.contains("Engineering"));
    assert!(row.trim_end().ends_with("Fa0/1"));

    let running = text(s.interpret("show run").unwrap());
    assert!(running.contains(" switchport access vlan 20"));
}

#[test]
fn recreated_vlan_agrees_across_listings() {
    let mut s = session_with(&SimConfig {
        device: DeviceType::Switch,
        ..SimConfig::default()
    });
    run_all(&mut s, &[
        "enable",
        "conf t",
        "vlan 10 Sales",
        "exit",
        "interface Fa0/1",
        "switchport access vlan 10",
        "exit",
        "vlan 10 Eng",
        "end",
    ]);
    let vlans = text(s.interpret("show vlan").unwrap());
    let row = vlans.lines().find(|l| l.starts_with("10 ")).unwrap();
    assert!(!row.contains("Fa0/1"));
    let running = text(s.interpret("show running-config").unwrap());
    assert!(!running.contains("switchport access vlan 10"));
}

#[test]
fn routing_protocol_workflow() {
    let mut s = session();
    run_all(&mut s, &[
        "enable",
        "conf t",
        "router ospf 1",
        "network 10.0.0.0 0.0.0.255 area 0",
        "end",
    ]);
    let protocols = text(s.interpret("show ip protocols").unwrap());
    assert!(protocols.contains("Routing Protocol is \"ospf 1\""));
    assert!(protocols.contains("10.0.0.0 0.0.0.255 area 0"));
}

#[test]
fn acl_and_dhcp_workflow() {
    let mut s = session();
    run_all(&mut s, &[
        "enable",
        "conf t",
        "access-list 10 permit 192.168.1.0 0.0.0.255",
        "access-list 10 deny any",
        "ip dhcp pool LAN 192.168.1.0 255.255.255.0 192.168.1.1 8.8.8.8",
        "end",
    ]);
    let acls = text(s.interpret("show access-lists").unwrap());
    assert_eq!(
        acls,
        "Standard IP access list 10\n    10 permit 192.168.1.0 0.0.0.255\n    20 deny any"
    );
    let pools = text(s.interpret("show ip dhcp pool").unwrap());
    assert!(pools.contains("Pool LAN :"));
    assert!(pools.contains("192.168.1.1"));
}

#[test]
fn show_commands_are_idempotent() {
    let mut s = session();
    run_all(&mut s, &[
        "enable",
        "conf t",
        "interface Gi0/0",
        "ip address 10.0.0.1 255.255.255.0",
        "exit",
        "vlan 10 Sales",
        "end",
    ]);
    for line in [
        "show running-config",
        "show interfaces",
        "show ip route",
        "show vlan",
        "show access-lists",
        "show ip dhcp pool",
        "show ip protocols",
        "show version",
    ] {
        let first = s.interpret(line).unwrap();
        let second = s.interpret(line).unwrap();
        assert_eq!(first, second, "{line}");
    }
}

// ---------------------------------------------------------------------------
// Help, completion, suggestions, history
// ---------------------------------------------------------------------------

#[test]
fn help_is_localized() {
    let mut s = session();
    let help = s.help();
    let enable = help.iter().find(|h| h.command == "enable").unwrap();
    assert_eq!(enable.description, "Turn on privileged commands");
    assert!(help.iter().all(|h| h.command != "configure terminal"));

    s.set_language(Language::He);
    let enable = s.help().into_iter().find(|h| h.command == "enable").unwrap();
    assert_eq!(enable.description, "מעבר למצב מורשה");
}

#[test]
fn completion_uses_current_mode() {
    let mut s = session();
    assert_eq!(s.complete("show i", "show"), vec!["show interfaces", "show ip route"]);
    s.interpret("enable").unwrap();
    assert_eq!(s.complete("show i", "show"), vec![
        "show interfaces",
        "show ip route",
        "show ip protocols",
        "show ip dhcp pool",
    ]);
}

#[test]
fn suggestions_use_legal_commands() {
    let mut s = session();
    assert_eq!(s.suggest("show intrfaces"), vec!["show interfaces"]);
    assert!(s.suggest("show running-confg").is_empty());
    s.interpret("enable").unwrap();
    assert_eq!(s.suggest("show running-confg"), vec!["show running-config"]);
}

#[test]
fn history_is_capped() {
    let mut s = session_with(&SimConfig {
        history_limit: 3,
        ..SimConfig::default()
    });
    for line in ["enable", "", "bogus", "show version", "disable"] {
        let _ = s.interpret(line);
    }
    assert_eq!(s.history(), ["bogus", "show version", "disable"]);
    s.interpret("show history").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(s.history().len(), 3);
}

#[test]
fn show_history_includes_itself() {
    let mut s = session();
    s.interpret("show version").unwrap();
    let out = text(s.interpret("show history").unwrap());
    assert_eq!(out, "  show version\n  show history");
}

// ---------------------------------------------------------------------------
// Persistence and diagnostics
// ---------------------------------------------------------------------------

#[test]
fn state_survives_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    {
        let store = FileStore::open(&path).unwrap();
        let mut s = Session::new(
            Catalog::builtin().unwrap(),
            Box::new(store),
            &SimConfig::default(),
            Box::new(NullDiagnostics),
        )
        .unwrap();
        run_all(&mut s, &[
            "enable",
            "conf t",
            "hostname Core",
            "interface Gi0/1",
            "shutdown",
            "end",
            "write memory",
        ]);
        s.save().unwrap();
    }
    let store = FileStore::open(&path).unwrap();
    let interfaces = records::interfaces(&store).unwrap();
    assert_eq!(interfaces["Gi0/1"].status, InterfaceStatus::AdminDown);

    let s = Session::new(
        Catalog::builtin().unwrap(),
        Box::new(store),
        &SimConfig::default(),
        Box::new(NullDiagnostics),
    )
    .unwrap();
    assert_eq!(s.prompt(), "Core>");
}

#[test]
fn invalid_catalog_fails_session_start() {
    let mut catalog = Catalog::builtin().unwrap();
    let duplicate = catalog.definitions[0].clone();
    catalog.definitions.push(duplicate);
    let result = Session::new(
        catalog,
        Box::new(MemoryStore::new()),
        &SimConfig::default(),
        Box::new(NullDiagnostics),
    );
    assert!(matches!(result, Err(e) if e.is_defect()));
}

#[test]
fn diagnostics_receive_rejections() {
    let sink = CapturingDiagnostics::default();
    let mut s = Session::new(
        Catalog::builtin().unwrap(),
        Box::new(MemoryStore::new()),
        &SimConfig::default(),
        Box::new(sink.clone()),
    )
    .unwrap();
    let _ = s.interpret("show");
    let _ = s.interpret("enable please");
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| matches!(e, crate::test_utils::Event::Rejected(..))));
}
