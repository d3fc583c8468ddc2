//! A full campaign-style level script run through the public API: setup
//! commands at the root, timed and alliance-driven condition blocks, and
//! end-of-level state carried out through campaign flags.

use std::sync::Arc;

use keeperscript_analysis::{Document, EditDelta, LanguageDef};

fn doc(text: &str) -> Document {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Document::new(Arc::new(LanguageDef::new()), text)
}

const CAMPAIGN: &str = "\
LEVEL_VERSION(1)
SET_MUSIC(3)
START_MONEY(PLAYER0,2500)
COMPUTER_PLAYER(PLAYER1,0)
ALLY_PLAYERS(PLAYER1,PLAYER_GOOD,1)
SET_DIGGER(PLAYER0,IMP)
ADD_CREATURE_TO_POOL(TROLL,12)
SET_CREATURE_PROPERTY(TROLL,NEVER_CHICKENS,1)
SET_CREATURE_TENDENCIES(PLAYER0,IMPRISON,1)
RESEARCH(PLAYER0,MAGIC,POWER_CALL_TO_ARMS,11500)
SET_TIMER(PLAYER0,TIMER0)
DISPLAY_COUNTDOWN(PLAYER0,TIMER0,6000,1)
IF(PLAYER0,TIMER0 >= 6000)
\tADD_GOLD_TO_PLAYER(PLAYER0,1000)
\tUSE_SPECIAL_INCREASE_LEVEL(PLAYER0,1)
ENDIF
IF_ALLIED(PLAYER1,PLAYER_GOOD == 1)
\tMAKE_UNSAFE(PLAYER0)
ENDIF
IF(PLAYER0,TOTAL_CREATURES <= 0)
\tTRANSFER_CREATURE(PLAYER0,TROLL,MOST_EXPERIENCED)
\tEXPORT_VARIABLE(PLAYER0,GAME_TURN,CAMPAIGN_FLAG0)
\tWIN_GAME
ENDIF";

#[test]
fn the_campaign_script_is_clean() {
    let d = doc(CAMPAIGN);
    assert_eq!(
        d.diagnostics()
            .iter()
            .map(|e| e.message.clone())
            .collect::<Vec<_>>(),
        Vec::<String>::new()
    );
}

#[test]
fn outline_covers_every_root_statement() {
    let nodes = doc(CAMPAIGN).outline();
    assert_eq!(nodes.len(), 15);
    assert_eq!(nodes[12].label, "IF(PLAYER0,TIMER0 >= 6000)");
    assert_eq!(nodes[13].label, "IF_ALLIED(PLAYER1,PLAYER_GOOD == 1)");
    assert_eq!(nodes[13].children.len(), 1);
    assert_eq!(nodes[14].children.len(), 3);
}

#[test]
fn campaign_flags_carry_no_local_references() {
    // Campaign flags persist across levels, so the script-local dataflow
    // log deliberately ignores them
    let d = doc(CAMPAIGN);
    let line = 21;
    let column = CAMPAIGN.lines().nth(line).unwrap().find("CAMPAIGN_FLAG0").unwrap();
    assert!(d.references(line, column).is_empty());
}

#[test]
fn countdown_timer_references_span_the_script() {
    let d = doc(CAMPAIGN);
    let line = 10;
    let column = CAMPAIGN.lines().nth(line).unwrap().find("TIMER0").unwrap();
    let sites = d.references(line, column);
    let lines: Vec<usize> = sites.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![10, 11, 12]);
}

#[test]
fn hover_on_a_setup_command_shows_its_doc() {
    let d = doc(CAMPAIGN);
    let text = d.hover(9, 2).unwrap();
    assert!(text.starts_with("RESEARCH(player, kind, item, points)"));
    assert!(text.contains("research cost"));
}

#[test]
fn countdown_signature_tracks_the_target_slot() {
    let d = doc(CAMPAIGN);
    // Cursor inside the 6000 argument of DISPLAY_COUNTDOWN
    let info = d.signature_help(11, 34).unwrap();
    assert!(info.heading.starts_with("DISPLAY_COUNTDOWN("));
    assert_eq!(info.active, 2);
    assert_eq!(info.params[2], "target");
}

#[test]
fn criterion_slot_offers_the_pick_rules() {
    let d = doc(CAMPAIGN);
    let line = 20;
    let column = CAMPAIGN
        .lines()
        .nth(line)
        .unwrap()
        .find("MOST_EXPERIENCED")
        .unwrap();
    let candidates = d.completions(line, column);
    let best = candidates
        .iter()
        .find(|c| c.label == "MOST_EXPERIENCED")
        .unwrap();
    assert!(best.doc.as_deref().unwrap().contains("highest-level"));
    assert!(!candidates.iter().any(|c| c.label == "PLAYER0"));
}

#[test]
fn research_item_must_match_the_declared_kind() {
    let script = CAMPAIGN.replace(
        "RESEARCH(PLAYER0,MAGIC,POWER_CALL_TO_ARMS,11500)",
        "RESEARCH(PLAYER0,ROOM,POWER_CALL_TO_ARMS,11500)",
    );
    let d = doc(&script);
    assert!(d
        .diagnostics()
        .iter()
        .any(|e| e.message == "POWER_CALL_TO_ARMS is not a valid room"));
}

#[test]
fn blanking_the_timer_setup_orphans_its_readers() {
    let mut d = doc(CAMPAIGN);
    d.apply_edit(&EditDelta {
        start_line: 10,
        end_line: 10,
        inserted_text: String::new(),
        resulting_line_count: 24,
    });
    d.analyze();
    assert!(d
        .diagnostics()
        .iter()
        .any(|e| e.message == "timer TIMER0 of PLAYER0 is read but never set"));

    d.set_line(10, "SET_TIMER(PLAYER0,TIMER0)");
    d.analyze();
    assert!(d.diagnostics().is_empty());
}

#[test]
fn setup_commands_stay_at_the_root() {
    let script = CAMPAIGN.replace(
        "\tMAKE_UNSAFE(PLAYER0)",
        "\tSET_DIGGER(PLAYER0,IMP)",
    );
    let d = doc(&script);
    assert!(d
        .diagnostics()
        .iter()
        .any(|e| e.message == "SET_DIGGER is not allowed inside a condition"));
}
