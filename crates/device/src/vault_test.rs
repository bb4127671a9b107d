use chrono::Utc;

use crate::vault::{DeviceVault, Language, LeadMarker};

#[test]
fn device_id_is_generated_once_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let first = {
        let vault = DeviceVault::open(&path);
        vault.device_id().unwrap()
    };
    assert!(!first.is_empty());

    let vault = DeviceVault::open(&path);
    assert_eq!(vault.device_id().unwrap(), first);
}

#[test]
fn language_defaults_to_arabic() {
    let vault = DeviceVault::in_memory();
    assert_eq!(vault.language(), Language::Ar);

    vault.set_language(Language::En).unwrap();
    assert_eq!(vault.language(), Language::En);
}

#[test]
fn toggle_favorite_flips_and_reports_the_new_state() {
    let vault = DeviceVault::in_memory();

    assert!(vault.toggle_favorite("cp1").unwrap());
    assert!(vault.is_favorite("cp1"));
    assert_eq!(vault.favorites(), vec!["cp1".to_string()]);

    assert!(!vault.toggle_favorite("cp1").unwrap());
    assert!(!vault.is_favorite("cp1"));
    assert!(vault.favorites().is_empty());
}

#[test]
fn lead_marker_presence_is_the_submitted_flag() {
    let vault = DeviceVault::in_memory();
    assert!(!vault.has_submitted_lead());

    vault
        .set_lead_marker(LeadMarker {
            lead_id: "lead-1".into(),
            submitted_at: Utc::now(),
            app_version: "1.2.0".into(),
        })
        .unwrap();

    assert!(vault.has_submitted_lead());
    assert_eq!(vault.lead_marker().unwrap().lead_id, "lead-1");
}

#[test]
fn state_round_trips_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let vault = DeviceVault::open(&path);
        vault.set_language(Language::En).unwrap();
        vault.set_selected_country(Some("kw".into())).unwrap();
        vault.toggle_favorite("cp1").unwrap();
        vault.toggle_favorite("cp2").unwrap();
    }

    let vault = DeviceVault::open(&path);
    assert_eq!(vault.language(), Language::En);
    assert_eq!(vault.selected_country().as_deref(), Some("kw"));
    assert_eq!(
        vault.favorites(),
        vec!["cp1".to_string(), "cp2".to_string()]
    );
}

#[test]
fn corrupt_state_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{not json").unwrap();

    let vault = DeviceVault::open(&path);
    assert_eq!(vault.language(), Language::Ar);
    assert!(vault.favorites().is_empty());

    // the vault recovers by rewriting on the next mutation
    vault.set_language(Language::En).unwrap();
    let vault = DeviceVault::open(&path);
    assert_eq!(vault.language(), Language::En);
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("state.json");

    let vault = DeviceVault::open(&path);
    vault.toggle_favorite("cp1").unwrap();
    assert!(path.exists());
}
