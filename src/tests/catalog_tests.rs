use super::*;

fn cmd(name: &str, category: &str, aliases: &[&str]) -> Command {
    Command {
        name: name.to_string(),
        category: category.to_string(),
        description: String::new(),
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
        hidden: false,
        enabled: true,
    }
}

fn sample() -> CommandCatalog {
    CommandCatalog::new(vec![
        cmd("ban", "Moderation", &["b"]),
        cmd("ping", "Utility", &[]),
        cmd("kick", "Moderation", &[]),
        cmd("schedule", "Academic", &["sched"]),
    ])
}

#[test]
fn categories_start_with_all_and_keep_first_seen_order() {
    let catalog = sample();
    assert_eq!(
        catalog.categories(),
        vec!["all", "Moderation", "Utility", "Academic"]
    );
}

#[test]
fn filter_by_category() {
    let catalog = sample();
    assert_eq!(catalog.filter(ALL_CATEGORIES).len(), 4);
    let names: Vec<&str> = catalog
        .filter("Moderation")
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["ban", "kick"]);
    assert!(catalog.filter("Nope").is_empty());
}

#[test]
fn glob_matches_names_and_aliases_case_insensitively() {
    let catalog = sample();
    let names: Vec<&str> = catalog
        .matching("SCHED*")
        .unwrap()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["schedule"]);

    let names: Vec<&str> = catalog
        .matching("?i*")
        .unwrap()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["ping", "kick"]);

    assert!(catalog.matching("[").is_err());
}

#[test]
fn find_prefers_names_over_aliases() {
    let mut commands = sample().commands().to_vec();
    commands.push(cmd("b", "Fun", &[]));
    let catalog = CommandCatalog::new(commands);
    assert_eq!(catalog.find("b").unwrap().category, "Fun");
    assert_eq!(catalog.find("sched").unwrap().name, "schedule");
    assert!(catalog.find("missing").is_none());
}

#[test]
fn set_enabled_updates_known_commands_only() {
    let mut catalog = sample();
    assert!(catalog.set_enabled("ping", false));
    assert!(!catalog.find("ping").unwrap().enabled);
    assert!(!catalog.set_enabled("nope", false));
}
