//! Tests for the voice preset registry

use masal_spk::config::SpeechConfig;
use masal_spk::error::SpeechError;
use masal_spk::preset::{builtin_presets, VoicePreset};
use masal_spk::registry::VoiceRegistry;

#[test]
fn test_lookup_round_trips_every_id() {
    let registry = VoiceRegistry::builtin();
    for summary in registry.list_all() {
        let preset = registry.lookup(&summary.id).expect("listed voice must resolve");
        assert_eq!(preset.id, summary.id);
        assert_eq!(preset.name, summary.name);
    }
}

#[test]
fn test_list_all_keeps_insertion_order() {
    let registry = VoiceRegistry::builtin();
    let ids: Vec<String> = registry.list_all().into_iter().map(|v| v.id).collect();
    assert_eq!(ids, vec!["fairytale_soft", "fairytale_calm", "narrator_neutral", "energetic"]);
}

#[test]
fn test_list_all_is_idempotent() {
    let registry = VoiceRegistry::builtin();
    let first = registry.list_all();
    for _ in 0..5 {
        assert_eq!(registry.list_all(), first);
    }
    assert_eq!(first.len(), registry.len());
}

#[test]
fn test_builtin_table_values() {
    let registry = VoiceRegistry::builtin();
    let soft = registry.lookup("fairytale_soft").unwrap();
    assert_eq!(soft.name, "Masal Anlatıcısı (Yumuşak)");
    assert_eq!(soft.model_key, "turbo");
    assert_eq!(soft.language_id, "tr");
    assert_eq!(soft.cfg_weight, 0.65);
    assert_eq!(soft.exaggeration, 0.90);

    assert_eq!(registry.default_voice(), "fairytale_soft");
    assert_eq!(registry.model_keys(), vec!["turbo"]);
}

#[test]
fn test_lookup_unknown_voice() {
    let registry = VoiceRegistry::builtin();
    assert!(registry.lookup("does-not-exist").is_none());
    assert!(registry.lookup("").is_none());
    assert!(registry.lookup("Fairytale_Soft").is_none());
}

#[test]
fn test_custom_registry_order_and_default() {
    let presets = vec![
        VoicePreset::new("b_voice", "B", "mtl", "en", 0.5, 0.5),
        VoicePreset::new("a_voice", "A", "turbo", "tr", 0.6, 0.6),
    ];
    let registry = VoiceRegistry::new(presets, "a_voice").unwrap();
    let ids: Vec<String> = registry.list_all().into_iter().map(|v| v.id).collect();
    assert_eq!(ids, vec!["b_voice", "a_voice"]);
    assert_eq!(registry.default_voice(), "a_voice");
    assert_eq!(registry.model_keys(), vec!["mtl", "turbo"]);
}

#[test]
fn test_duplicate_ids_rejected() {
    let mut presets = builtin_presets();
    presets.push(presets[0].clone());
    match VoiceRegistry::new(presets, "fairytale_soft") {
        Err(SpeechError::Config(msg)) => assert!(msg.contains("Duplicate")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_unregistered_default_rejected() {
    assert!(VoiceRegistry::new(builtin_presets(), "missing").is_err());
}

#[test]
fn test_empty_registry_rejected() {
    assert!(VoiceRegistry::new(Vec::new(), "fairytale_soft").is_err());
}

#[test]
fn test_invalid_preset_rejected() {
    let presets = vec![VoicePreset::new("loud", "Loud", "turbo", "tr", 0.5, 2.5)];
    assert!(VoiceRegistry::new(presets, "loud").is_err());
}

#[test]
fn test_config_voices_replace_builtin_table() {
    let config: SpeechConfig = toml::from_str(
        r#"
        default_voice = "story"

        [[voices]]
        id = "story"
        name = "Story"
        model_key = "turbo"
        cfg_weight = 0.4
        exaggeration = 0.8
        "#,
    )
    .unwrap();

    let registry = config.registry().unwrap();
    assert_eq!(registry.len(), 1);
    let story = registry.lookup("story").unwrap();
    // language_id defaults to "tr" when omitted
    assert_eq!(story.language_id, "tr");
    assert!(registry.lookup("fairytale_soft").is_none());
}
