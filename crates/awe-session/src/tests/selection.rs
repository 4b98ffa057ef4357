use super::*;
use crate::types::SelectionUpdate;
use crate::EntryState;

fn move_cursor(session: &mut InputSession<TextBuffer>, to: usize) -> KeyResponse {
    let buffer = session.editor_mut().unwrap();
    let (old_start, old_end) = buffer.selection();
    buffer.set_selection(to, to);
    let candidates = buffer.composing();
    session.update_selection(SelectionUpdate {
        old_start,
        old_end,
        new_start: to,
        new_end: to,
        candidates,
    })
}

fn echo_selection(session: &mut InputSession<TextBuffer>) -> KeyResponse {
    let cursor = session.editor().unwrap().cursor();
    move_cursor(session, cursor)
}

#[test]
fn test_cursor_move_finishes_composition() {
    let mut session = make_session();
    type_string(&mut session, "hel");
    let resp = move_cursor(&mut session, 0);
    assert!(resp.consumed);
    assert_eq!(resp.candidates, crate::CandidateAction::Hide);
    assert!(!session.is_predicting());
    assert_eq!(text(&session), "hel");
    assert_eq!(composing(&session), "");
    assert_eq!(session.entry_state(), EntryState::Start);
}

#[test]
fn test_echo_keeps_composition() {
    let mut session = make_session();
    type_string(&mut session, "hel");
    echo_selection(&mut session);
    assert!(session.is_predicting());
    assert_eq!(composing(&session), "hel");
}

#[test]
fn test_echo_after_auto_correction_keeps_revert() {
    let mut session = make_session();
    type_string(&mut session, "teh ");
    echo_selection(&mut session);
    assert_eq!(session.entry_state(), EntryState::AcceptedDefault);
    type_string(&mut session, "<");
    assert_eq!(text(&session), "teh");
}

#[test]
fn test_cursor_move_forgets_revert() {
    let mut session = make_session();
    type_string(&mut session, "teh ");
    echo_selection(&mut session);
    echo_selection(&mut session);
    assert_eq!(session.entry_state(), EntryState::Start);
    type_string(&mut session, "<");
    assert_eq!(text(&session), "the");
}

#[test]
fn test_typing_after_cursor_move_inside_word() {
    let mut session = make_session();
    type_string(&mut session, "hel");
    move_cursor(&mut session, 1);
    type_string(&mut session, "x");
    assert!(!session.is_predicting());
    assert_eq!(text(&session), "hxel");
}

#[test]
fn test_selection_update_when_detached() {
    let mut session = make_session();
    session.finish_input();
    let resp = session.update_selection(SelectionUpdate {
        old_start: 0,
        old_end: 0,
        new_start: 1,
        new_end: 1,
        candidates: None,
    });
    assert!(!resp.consumed);
}
