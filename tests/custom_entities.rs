//! Host-supplied entity names, loaded from JSON and installed into a
//! shared language definition.

use std::sync::Arc;

use keeperscript_analysis::{CustomEntities, Document, LanguageDef};

const CONFIG: &str = r#"{
    "creatures": [
        { "name": "TIME_MAGE", "doc": "Slows everything around it." }
    ],
    "rooms": [
        { "name": "AVIARY" }
    ],
    "powers": [
        { "name": "POWER_TEMPEST", "doc": "A storm over the target area." }
    ],
    "traps": [
        { "name": "FREEZE" },
        { "name": "FEAR" }
    ]
}"#;

fn lang_with_config() -> Arc<LanguageDef> {
    let config: CustomEntities = serde_json::from_str(CONFIG).expect("valid config");
    let lang = LanguageDef::new();
    lang.install_custom(config);
    Arc::new(lang)
}

#[test]
fn custom_names_pass_the_type_check() {
    let script = "LEVEL_VERSION(1)\n\
                  TRAP_AVAILABLE(PLAYER0,FREEZE,1,1)\n\
                  CREATURE_AVAILABLE(PLAYER0,TIME_MAGE,1,0)\n\
                  IF(PLAYER0,GAME_TURN >= 100)\n\
                  \tWIN_GAME\n\
                  ENDIF";
    let d = Document::new(lang_with_config(), script);
    assert!(d.diagnostics().is_empty());

    let bare = Document::new(Arc::new(LanguageDef::new()), script);
    assert!(bare
        .diagnostics()
        .iter()
        .any(|x| x.message.contains("FREEZE")));
}

#[test]
fn custom_names_show_up_in_completions() {
    let d = Document::new(lang_with_config(), "TRAP_AVAILABLE(PLAYER0,");
    let labels: Vec<String> = d
        .completions(0, 23)
        .into_iter()
        .map(|c| c.label)
        .collect();
    assert!(labels.contains(&"FREEZE".to_string()));
    assert!(labels.contains(&"FEAR".to_string()));
}

#[test]
fn custom_rooms_and_powers_join_their_classes() {
    let script = "LEVEL_VERSION(1)\n\
                  ROOM_AVAILABLE(PLAYER0,AVIARY,1,0)\n\
                  MAGIC_AVAILABLE(PLAYER0,POWER_TEMPEST,1,0)\n\
                  RESEARCH(PLAYER0,ROOM,AVIARY,20000)\n\
                  IF(PLAYER0,GAME_TURN >= 100)\n\
                  \tWIN_GAME\n\
                  ENDIF";
    let d = Document::new(lang_with_config(), script);
    assert!(d.diagnostics().is_empty());
}

#[test]
fn custom_docs_back_hover() {
    let d = Document::new(
        lang_with_config(),
        "CREATURE_AVAILABLE(PLAYER0,TIME_MAGE,1,0)",
    );
    let text = d.hover(0, 30).expect("hover text");
    assert!(text.contains("Slows everything"));
}
