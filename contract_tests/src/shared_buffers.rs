//! Shared-buffer contract: both editors see one instance per buffer name,
//! and editing state survives suspend/resume unchanged.

#[cfg(test)]
mod tests {
    use crate::test_helpers::*;

    #[test]
    fn test_edits_in_one_editor_visible_in_the_other() {
        let mut session = started_session();
        run(&mut session, &["ed()", "a", "written in ed", ".", "\x1a"]);

        // the display editor opens the same store; the line is already there
        let out = run(&mut session, &["edsel()"]);
        assert!(out.iter().any(|l| l.contains("written in ed")));
        assert!(out.iter().any(|l| l.contains("--- main* [1/1] ---")));

        // and an edit made through edsel is seen back in ed
        run(&mut session, &["a", "written in edsel", ".", "\x1a", "ed()"]);
        let out = run(&mut session, &["2p"]);
        assert_eq!(out, vec!["written in edsel".to_string()]);
    }

    #[test]
    fn test_insertion_point_travels_with_the_buffer() {
        let mut session = started_session();
        run(
            &mut session,
            &["ed()", "a", "first", "second", "third", ".", "1p", "\x1a"],
        );

        // dot was left on line 1; move it through the display editor
        run(&mut session, &["edsel()", "$p", "\x1a"]);

        // back in ed, dot is where edsel left it
        let mut session_out = run(&mut session, &["ed()", "p"]);
        assert_eq!(session_out.pop(), Some("third".to_string()));
    }

    #[test]
    fn test_state_preservation_round_trip() {
        let mut session = started_session();
        run(
            &mut session,
            &["ed('doc.txt')", "a", "alpha", "beta", ".", "1p"],
        );
        let before = session.store().borrow().get("doc.txt").expect("buffer exists");

        // suspend, do unrelated work in another job, resume
        run(&mut session, &["\x1a", "edsel()", "o", "q", "fg()"]);
        let after = session.store().borrow().get("doc.txt").expect("buffer exists");
        assert_eq!(before, after);

        // and the editor still behaves as if never interrupted
        let out = run(&mut session, &["p"]);
        assert_eq!(out, vec!["alpha".to_string()]);
    }

    #[test]
    fn test_buffer_created_on_first_reference() {
        let mut session = started_session();
        assert!(!session.store().borrow().contains("notes.txt"));

        run(&mut session, &["ed('notes.txt')", "a", "milk", ".", "q"]);
        assert!(session.store().borrow().contains("notes.txt"));

        // the shell reads the same instance, never a copy
        let out = run(&mut session, &["print notes.txt"]);
        assert_eq!(out, vec!["milk".to_string()]);
    }

    #[test]
    fn test_buffer_names_in_creation_order() {
        let mut session = started_session();
        run(&mut session, &["ed('b.txt')", "e a.txt", "q"]);
        let out = run(&mut session, &["buffers"]);
        assert_eq!(
            out,
            vec!["main".to_string(), "b.txt".to_string(), "a.txt".to_string()]
        );
    }
}
