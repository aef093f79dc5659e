use netsim_state::records;
use netsim_types::{Result, UserError};

use super::{ActionReply, Environment, required};
use crate::state_machine::ModeEvent;

pub fn enter_privileged() -> ActionReply {
    ActionReply::transition(ModeEvent::EnterPrivileged)
}

pub fn enter_config() -> ActionReply {
    ActionReply::transition(ModeEvent::EnterConfig)
        .with_text("Enter configuration commands, one per line.  End with CNTL/Z.")
}

pub fn exit_mode() -> ActionReply {
    ActionReply::transition(ModeEvent::ExitMode)
}

pub fn end() -> ActionReply {
    ActionReply::transition(ModeEvent::End)
}

pub fn set_hostname(args: &[&str], env: &mut Environment<'_>) -> Result<ActionReply> {
    let name = required(args, 0, "hostname")?;
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(UserError::invalid(
            "hostname",
            format!("'{name}' may only contain letters, digits, '-' and '_'"),
        )
        .into());
    }
    records::set_hostname(env.store, name)?;
    Ok(ActionReply::silent())
}

pub fn save_config(env: &mut Environment<'_>) -> Result<ActionReply> {
    env.store.flush()?;
    Ok(ActionReply::text("Building configuration...\n[OK]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use netsim_state::{MemoryStore, StateStore};
    use netsim_types::DeviceType;
    use serde_json::json;

    #[test]
    fn hostname_is_written() {
        let mut store = MemoryStore::new();
        let mut env = Environment {
            device: DeviceType::Router,
            store: &mut store,
            history: &[],
        };
        set_hostname(&["Edge-1"], &mut env).unwrap();
        assert_eq!(store.get("hostname").unwrap(), Some(json!("Edge-1")));
    }

    #[test]
    fn hostname_rejects_punctuation() {
        let mut store = MemoryStore::new();
        let mut env = Environment {
            device: DeviceType::Router,
            store: &mut store,
            history: &[],
        };
        let err = set_hostname(&["R1#"], &mut env).unwrap_err();
        assert!(err.is_user_error());
        assert_eq!(store.get("hostname").unwrap(), None);
    }

    #[test]
    fn configure_terminal_banner() {
        let reply = enter_config();
        assert_eq!(reply.event, Some(ModeEvent::EnterConfig));
        assert!(reply.text.contains("one per line"));
    }
}
