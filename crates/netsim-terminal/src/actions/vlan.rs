use netsim_state::{InterfaceUpdate, Vlan, records};
use netsim_types::{Result, UserError};

use super::{ActionReply, Environment, required, validate, vlan_target};
use crate::state_machine::{ConfigTarget, ModeEvent};

/// `vlan <id> [name]`: create or overwrite the VLAN, then edit it.
///
/// Overwriting drops the old members, and their interfaces stop pointing at
/// the VLAN.
pub fn create(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let id = validate::vlan_id(required(args, 0, "vlan-id")?)?;
    let name = match args.get(1) {
        Some(name) => name.to_string(),
        None => format!("VLAN{id:04}"),
    };
    let previous = records::put_vlan(env.store, id, Vlan {
        name,
        members: Vec::new(),
    })?;
    if let Some(old) = previous
        && !old.members.is_empty()
    {
        let interfaces = records::interfaces(&*env.store)?;
        for member in &old.members {
            if interfaces.get(member).is_some_and(|i| i.access_vlan == Some(id)) {
                records::update_interface(env.store, member, InterfaceUpdate::ClearAccessVlan)?;
            }
        }
    }
    Ok(ActionReply::transition(ModeEvent::EnterVlanConfig(id)))
}

pub fn set_name(
    args: &[&str],
    target: Option<&ConfigTarget>,
    env: &mut Environment<'_>,
) -> Result<ActionReply> {
    let id = vlan_target(target)?;
    let name = required(args, 0, "name")?;
    if !records::rename_vlan(env.store, id, name)? {
        return Err(UserError::invalid("vlan-id", format!("VLAN {id} no longer exists")).into());
    }
    Ok(ActionReply::silent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use netsim_state::MemoryStore;
    use netsim_types::DeviceType;

    fn env(store: &mut MemoryStore) -> Environment<'_> {
        Environment {
            device: DeviceType::Switch,
            store,
            history: &[],
        }
    }

    #[test]
    fn create_with_name() {
        let mut store = MemoryStore::new();
        let reply = create(&["10", "Sales"], &mut env(&mut store)).unwrap();
        assert_eq!(reply.event, Some(ModeEvent::EnterVlanConfig(10)));
        let vlans = records::vlans(&store).unwrap();
        assert_eq!(vlans[&10].name, "Sales");
        assert!(vlans[&10].members.is_empty());
    }

    #[test]
    fn create_uses_default_name() {
        let mut store = MemoryStore::new();
        create(&["20"], &mut env(&mut store)).unwrap();
        assert_eq!(records::vlans(&store).unwrap()[&20].name, "VLAN0020");
    }

    #[test]
    fn create_overwrites_members() {
        let mut store = MemoryStore::new();
        records::put_vlan(&mut store, 10, Vlan {
            name: "Old".into(),
            members: vec!["Fa0/1".into()],
        })
        .unwrap();
        create(&["10", "New"], &mut env(&mut store)).unwrap();
        let vlan = &records::vlans(&store).unwrap()[&10];
        assert_eq!(vlan.name, "New");
        assert!(vlan.members.is_empty());
    }

    #[test]
    fn recreate_releases_member_interfaces() {
        let mut store = MemoryStore::new();
        create(&["10", "Sales"], &mut env(&mut store)).unwrap();
        records::add_vlan_member(&mut store, 10, "Fa0/1").unwrap();
        records::update_interface(&mut store, "Fa0/1", InterfaceUpdate::AccessVlan(10)).unwrap();
        records::update_interface(&mut store, "Fa0/2", InterfaceUpdate::AccessVlan(20)).unwrap();

        create(&["10", "Eng"], &mut env(&mut store)).unwrap();
        let interfaces = records::interfaces(&store).unwrap();
        assert_eq!(interfaces["Fa0/1"].access_vlan, None);
        assert_eq!(interfaces["Fa0/2"].access_vlan, Some(20));
        assert!(records::vlans(&store).unwrap()[&10].members.is_empty());
    }

    #[test]
    fn create_rejects_out_of_range_id() {
        let mut store = MemoryStore::new();
        assert!(create(&["4095"], &mut env(&mut store)).unwrap_err().is_user_error());
        assert!(create(&["0"], &mut env(&mut store)).unwrap_err().is_user_error());
    }

    #[test]
    fn rename_targeted_vlan() {
        let mut store = MemoryStore::new();
        create(&["10"], &mut env(&mut store)).unwrap();
        let target = ConfigTarget::Vlan(10);
        set_name(&["Engineering"], Some(&target), &mut env(&mut store)).unwrap();
        assert_eq!(records::vlans(&store).unwrap()[&10].name, "Engineering");

        let gone = ConfigTarget::Vlan(99);
        assert!(set_name(&["X"], Some(&gone), &mut env(&mut store)).is_err());
    }
}
