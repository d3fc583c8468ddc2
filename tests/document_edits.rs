//! Incremental edits through the document model.

use std::sync::Arc;

use keeperscript_analysis::{Document, EditDelta, LanguageDef};

fn doc(text: &str) -> Document {
    Document::new(Arc::new(LanguageDef::new()), text)
}

const BASE: &str = "LEVEL_VERSION(1)\n\
                    SET_TIMER(PLAYER0,TIMER0)\n\
                    IF(PLAYER0,TIMER0 >= 6000)\n\
                    \tWIN_GAME\n\
                    ENDIF\n\
                    SET_FLAG(PLAYER0,UNKNOWN_FLAG,1)";

#[test]
fn inserting_two_lines_at_three_shifts_later_diagnostics_by_two() {
    let mut d = doc(BASE);
    let before: Vec<usize> = d.diagnostics().iter().map(|diag| diag.line).collect();
    assert!(before.contains(&5));

    d.apply_edit(&EditDelta {
        start_line: 3,
        end_line: 3,
        inserted_text: "\tADD_GOLD_TO_PLAYER(PLAYER0,1000)\n\tBONUS_LEVEL_TIME(500)\n\tWIN_GAME"
            .into(),
        resulting_line_count: 8,
    });
    assert_eq!(d.line_count(), 8);

    d.analyze();
    let after: Vec<usize> = d.diagnostics().iter().map(|diag| diag.line).collect();
    assert_eq!(
        before.iter().map(|l| l + 2).collect::<Vec<_>>(),
        after,
        "every diagnostic moved down by exactly the inserted line count"
    );
}

#[test]
fn set_line_is_only_visible_after_the_next_pass() {
    let mut d = doc(BASE);
    let stale = d.diagnostics().to_vec();

    d.set_line(5, "SET_FLAG(PLAYER0,FLAG1,1)");
    assert_eq!(d.diagnostics(), &stale[..]);

    d.analyze();
    // FLAG1 is written but never read, so one warning replaces the error
    assert!(d.diagnostics().iter().any(|x| x.message.contains("never read")));
    assert!(!d.diagnostics().iter().any(|x| x.message.contains("not a valid")));
}

#[test]
fn deleting_the_condition_block_unbalances_nothing_else() {
    let mut d = doc(BASE);
    d.apply_edit(&EditDelta {
        start_line: 2,
        end_line: 4,
        inserted_text: "WIN_GAME".into(),
        resulting_line_count: 4,
    });
    assert_eq!(d.line_count(), 4);

    d.analyze();
    assert!(!d
        .diagnostics()
        .iter()
        .any(|x| x.message.contains("never terminated")));
}

#[test]
fn edits_past_the_end_of_the_document_append() {
    let mut d = doc("LEVEL_VERSION(1)");
    d.apply_edit(&EditDelta {
        start_line: 10,
        end_line: 10,
        inserted_text: "WIN_GAME".into(),
        resulting_line_count: 2,
    });
    assert_eq!(d.line_count(), 2);
    assert_eq!(d.line(1).unwrap().text, "WIN_GAME");
}
