//! The editor-facing query surface, end to end through the public API.

use std::sync::Arc;

use keeperscript_analysis::{Document, EditDelta, LanguageDef};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn doc(text: &str) -> Document {
    init_tracing();
    Document::new(Arc::new(LanguageDef::new()), text)
}

const RAID: &str = "\
LEVEL_VERSION(1)
CREATE_PARTY(RAIDERS)
ADD_TO_PARTY(RAIDERS,ARCHER,2,300,STEAL_GOLD,0)
SET_TIMER(PLAYER0,TIMER2)
IF(PLAYER0,TIMER2 >= 3000)
\tADD_PARTY_TO_LEVEL(PLAYER_GOOD,RAIDERS,-1,1)
\tWIN_GAME
ENDIF";

#[test]
fn the_raid_script_is_clean() {
    assert!(doc(RAID).diagnostics().is_empty());
}

#[test]
fn outline_shows_the_block_structure() {
    let nodes = doc(RAID).outline();
    assert_eq!(nodes.len(), 5);
    assert_eq!(nodes[0].label, "LEVEL_VERSION(1)");
    assert_eq!(nodes[4].label, "IF(PLAYER0,TIMER2 >= 3000)");
    assert_eq!(nodes[4].children.len(), 2);
    assert_eq!(nodes[4].children[1].label, "WIN_GAME");
}

#[test]
fn party_references_cover_every_mention() {
    let d = doc(RAID);
    // Cursor on RAIDERS in CREATE_PARTY
    let sites = d.references(1, 14);
    assert_eq!(sites.len(), 3);
    assert_eq!(sites[0].line, 1);
    assert_eq!(sites[1].line, 2);
    assert_eq!(sites[2].line, 5);
}

#[test]
fn action_point_references_pair_triggers_with_resets() {
    let script = "\
LEVEL_VERSION(1)
IF_ACTION_POINT(3,PLAYER0) rem the bridge crossing
\tRESET_ACTION_POINT(3)
\tWIN_GAME
ENDIF";
    let d = doc(script);
    assert!(d.diagnostics().is_empty());

    // Cursor on the point number in IF_ACTION_POINT
    let sites = d.references(1, 16);
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].line, 1);
    assert_eq!(sites[1].line, 2);

    // A different point number is a different entity
    assert!(d.references(3, 2).is_empty());
}

#[test]
fn timer_references_pair_the_write_with_the_read() {
    let d = doc(RAID);
    // Cursor on TIMER2 in SET_TIMER
    let sites = d.references(3, 19);
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].line, 3);
    assert_eq!(sites[1].line, 4);
}

#[test]
fn hover_on_a_command_shows_its_signature() {
    let d = doc(RAID);
    let text = d.hover(2, 3).unwrap();
    assert!(text.contains("ADD_TO_PARTY"));
}

#[test]
fn signature_help_tracks_the_active_argument() {
    let d = doc(RAID);
    let info = d.signature_help(2, 21).unwrap();
    assert_eq!(info.params.len(), 6);
    assert_eq!(info.active, 1);
}

#[test]
fn value_position_completions_offer_readable_variables() {
    let d = doc(RAID);
    let candidates = d.completions(4, 22);
    assert!(candidates.iter().any(|c| c.label == "GAME_TURN"));
    assert!(candidates.iter().any(|c| c.label == "FLAG0"));
}

#[test]
fn queries_follow_edits_after_reanalysis() {
    let mut d = doc(RAID);
    d.apply_edit(&EditDelta {
        start_line: 6,
        end_line: 6,
        inserted_text: "\tLOSE_GAME".into(),
        resulting_line_count: 8,
    });
    d.analyze();

    let nodes = d.outline();
    assert_eq!(nodes[4].children[1].label, "LOSE_GAME");
    // The win-condition warning surfaces once WIN_GAME is gone
    assert!(d
        .diagnostics()
        .iter()
        .any(|diag| diag.message.contains("WIN_GAME")));
}
