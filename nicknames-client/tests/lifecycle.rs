//! Activation, deactivation and live re-sync of interception points

mod common;

use common::{Harness, TestHost, alice};
use nicknames_client::patch::{InstallOutcome, IdentityPoint, MenuPoint, RenderPoint, RosterPoint};
use nicknames_client::host::{Host, IdentitySlot};
use nicknames_common::{MemoryStorage, STORAGE_NAMESPACE};

fn with_nickname(harness: &Harness) {
    harness.plugin.set_nickname("42", "Nick").expect("set nickname");
}

#[test]
fn test_activate_installs_every_point() {
    let mut harness = Harness::new();
    let report = harness.plugin.activate();

    assert_eq!(report.installed(), 4);
    assert_eq!(report.failed(), 0);
    for point in [
        IdentityPoint::NAME,
        RosterPoint::NAME,
        RenderPoint::NAME,
        MenuPoint::NAME,
    ] {
        assert!(harness.plugin.patches().is_installed(point), "{point}");
    }
    // Two identity lookups, one roster, one per surface, one menu
    assert_eq!(harness.host.attached_hooks(), 2 + 1 + 5 + 1);
}

#[test]
fn test_deactivate_leaves_no_references() {
    let mut harness = Harness::new();
    with_nickname(&harness);
    harness.plugin.activate();
    assert_eq!(harness.host.display_name_of(&alice()), "Nick");

    assert_eq!(harness.plugin.deactivate(), 4);
    assert_eq!(harness.host.attached_hooks(), 0);
    assert!(harness.host.seams_unreferenced());
    assert_eq!(harness.host.display_name_of(&alice()), "alice");
    assert!(!harness.plugin.is_active());
}

#[test]
fn test_reactivation_behaves_identically() {
    let mut harness = Harness::new();
    with_nickname(&harness);

    let first = harness.plugin.activate();
    let hooks = harness.host.attached_hooks();
    harness.plugin.deactivate();
    let second = harness.plugin.activate();

    assert_eq!(first.installed(), second.installed());
    assert_eq!(harness.host.attached_hooks(), hooks);
    assert_eq!(harness.host.display_name_of(&alice()), "Nick");
}

#[test]
fn test_double_activate_is_a_no_op() {
    let mut harness = Harness::new();
    harness.plugin.activate();
    let hooks = harness.host.attached_hooks();

    let report = harness.plugin.activate();
    assert_eq!(report.installed(), 0);
    assert!(matches!(
        report.outcome(IdentityPoint::NAME),
        Some(InstallOutcome::AlreadyInstalled)
    ));
    assert_eq!(harness.host.attached_hooks(), hooks);
}

#[test]
fn test_roster_skipped_when_override_disabled() {
    let storage = MemoryStorage::with_blob(
        STORAGE_NAMESPACE,
        r#"{"nicknames":{"42":"Nick"},"settings":{"overrideServerNicks":false}}"#,
    );
    let mut harness = Harness::with(TestHost::new(), storage);
    let report = harness.plugin.activate();

    assert!(matches!(
        report.outcome(RosterPoint::NAME),
        Some(InstallOutcome::NotWanted)
    ));
    assert_eq!(harness.host.roster.len(), 0);
    assert_eq!(
        harness.host.nick_in_group("42", Some("Server Nick")).as_deref(),
        Some("Server Nick")
    );
    // Identity still overridden
    assert_eq!(harness.host.display_name_of(&alice()), "Nick");
}

#[test]
fn test_override_toggle_resyncs_roster() {
    let mut harness = Harness::new();
    with_nickname(&harness);
    harness.plugin.activate();
    assert_eq!(harness.host.nick_in_group("42", Some("Server")).as_deref(), Some("Nick"));

    harness
        .plugin
        .set_override_server_nicks(false)
        .expect("disable");
    assert!(!harness.plugin.patches().is_installed(RosterPoint::NAME));
    assert_eq!(harness.host.roster.len(), 0);
    assert_eq!(harness.host.nick_in_group("42", Some("Server")).as_deref(), Some("Server"));

    harness
        .plugin
        .set_override_server_nicks(true)
        .expect("enable");
    assert!(harness.plugin.patches().is_installed(RosterPoint::NAME));
    assert_eq!(harness.host.roster.len(), 1);
    assert_eq!(harness.host.nick_in_group("42", Some("Server")).as_deref(), Some("Nick"));
}

#[test]
fn test_override_toggle_while_inactive_only_saves() {
    let mut harness = Harness::new();
    harness
        .plugin
        .set_override_server_nicks(false)
        .expect("disable");
    harness
        .plugin
        .set_override_server_nicks(true)
        .expect("enable");
    assert_eq!(harness.host.attached_hooks(), 0);
    assert!(harness.plugin.settings().override_server_nicks);
}

#[test]
fn test_missing_seams_do_not_block_others() {
    /// Host exposing only the display-name lookup
    struct IdentityOnly(std::rc::Rc<IdentitySlot>);

    impl Host for IdentityOnly {
        fn display_name_slot(&self) -> Option<std::rc::Rc<IdentitySlot>> {
            Some(std::rc::Rc::clone(&self.0))
        }
    }

    let slot = nicknames_client::hook::HookSlot::new("getDisplayName");
    let host = std::rc::Rc::new(IdentityOnly(std::rc::Rc::clone(&slot)));
    let ui = std::rc::Rc::new(common::RecordingUi::default());
    let mut plugin = nicknames_client::Plugin::new(host, ui, Box::new(MemoryStorage::new()));
    plugin.set_nickname("42", "Nick").expect("set");

    let report = plugin.activate();
    assert_eq!(report.installed(), 1);
    assert_eq!(report.failed(), 3);
    assert_eq!(slot.call(&alice(), "alice".to_string()), "Nick");

    plugin.deactivate();
    assert!(slot.is_empty());
}

#[test]
fn test_dropping_plugin_deactivates() {
    let host = std::rc::Rc::new(TestHost::new());
    {
        let ui = std::rc::Rc::new(common::RecordingUi::default());
        let mut plugin =
            nicknames_client::Plugin::new(host.clone(), ui, Box::new(MemoryStorage::new()));
        plugin.activate();
        assert!(host.attached_hooks() > 0);
    }
    assert_eq!(host.attached_hooks(), 0);
}
