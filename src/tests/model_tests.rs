use super::*;

#[test]
fn channel_parses_bot_spelling_of_restricted_mode() {
    let v = serde_json::json!({
        "id": "1",
        "name": "general",
        "cmd_mode": "only",
        "allowed_commands": ["ping"]
    });
    let ch: Channel = serde_json::from_value(v).unwrap();
    assert_eq!(ch.command_mode, CommandMode::Restricted);
    assert!(ch.is_editable());
    assert!(ch.allows("ping"));
    assert!(!ch.allows("help"));
}

#[test]
fn channel_list_accepts_bot_only_and_exclude_modes() {
    let body = r#"{"channels": [
        {"id": "1", "name": "general", "cmd_mode": "only", "allowed_commands": ["ping"]},
        {"id": "3", "name": "lounge", "cmd_mode": "exclude", "allowed_commands": ["ban"]}
    ]}"#;
    let list: crate::remote::ChannelList = serde_json::from_str(body).unwrap();
    let channels = list.into_channels();
    assert_eq!(channels.len(), 2);

    assert_eq!(channels[0].command_mode, CommandMode::Restricted);

    let lounge = &channels[1];
    assert_eq!(lounge.command_mode, CommandMode::Exclude);
    assert_eq!(lounge.command_mode.label(), "exclude");
    assert!(!lounge.is_editable());
    assert!(!lounge.allows("ban"));
    assert!(lounge.allows("ping"));

    let back = serde_json::to_value(lounge).unwrap();
    assert_eq!(back["command_mode"], "exclude");
}

#[test]
fn channel_mode_defaults_to_all() {
    let ch: Channel = serde_json::from_value(serde_json::json!({"id": "2", "name": "memes"})).unwrap();
    assert_eq!(ch.command_mode, CommandMode::All);
    assert!(ch.allowed_commands.is_empty());
    assert!(ch.allows("anything"));
}

#[test]
fn normalize_drops_duplicate_allow_list_entries() {
    let ch = Channel {
        id: "1".to_string(),
        name: "general".to_string(),
        command_mode: CommandMode::Restricted,
        allowed_commands: vec!["a".into(), "b".into(), "a".into(), "c".into(), "b".into()],
    }
    .normalize();
    assert_eq!(ch.allowed_commands, vec!["a", "b", "c"]);
}

#[test]
fn command_reads_catalog_wire_fields() {
    let v = serde_json::json!({
        "name": "ban",
        "cog": "Moderation",
        "description": "Ban a member",
        "aliases": ["b"],
        "hidden": false,
        "enable": false
    });
    let cmd: Command = serde_json::from_value(v).unwrap();
    assert_eq!(cmd.category, "Moderation");
    assert!(!cmd.enabled);
    assert!(cmd.answers_to("b"));
    assert!(!cmd.answers_to("kick"));

    let minimal: Command = serde_json::from_value(serde_json::json!({"name": "ping"})).unwrap();
    assert_eq!(minimal.category, "Unknown");
    assert!(minimal.enabled);
}

#[test]
fn pending_change_serializes_action_lowercase() {
    let change = PendingChange::new("1", "help", ChangeAction::Add);
    let v = serde_json::to_value(&change).unwrap();
    assert_eq!(v["action"], "add");
    assert_eq!(change.to_string(), "+help @1");
    assert_eq!(ChangeAction::toggle_for(true), ChangeAction::Remove);
}

#[test]
fn guild_info_keeps_unknown_fields() {
    let v = serde_json::json!({
        "guild": {"guild_id": "42", "name": "Club", "member_count": 12, "owner": "x"},
        "total_commands": 5,
        "commands_24h": 1,
        "bot_status": "online"
    });
    let stats: StatsOverview = serde_json::from_value(v).unwrap();
    assert_eq!(stats.guild.id.as_deref(), Some("42"));
    assert_eq!(stats.guild.members, Some(12));
    assert_eq!(stats.guild.extra.get("owner"), Some(&serde_json::json!("x")));
}
