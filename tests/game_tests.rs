//! Game session integration tests.
//!
//! These tests play whole games through the public API, finding pairs by
//! scanning card types the way a front end never could - the point is to
//! exercise the matcher, counters, and win detection end to end.

use pairs::{BoardSize, GameError, GameSession, TurnEvent, TypeId};

/// Indices of both cards of the given type.
fn find_pair(session: &GameSession, type_id: TypeId) -> (usize, usize) {
    let board = session.board();
    let mut found = (0..board.cell_count()).filter(|&i| board.card(i).unwrap().type_id == type_id);
    (found.next().unwrap(), found.next().unwrap())
}

// =============================================================================
// Perfect play
// =============================================================================

/// A perfect game takes exactly pair_count turns and ends won.
#[test]
fn test_perfect_game() {
    let mut session = GameSession::new(BoardSize::new(4, 4), 7);
    let pair_count = session.board().size().pair_count();

    for t in 0..pair_count {
        let (a, b) = find_pair(&session, TypeId::new(t as u16));
        assert_eq!(
            session.flip_card(a).unwrap(),
            TurnEvent::CardRevealed { index: a }
        );
        let event = session.flip_card(b).unwrap();
        let won = t == pair_count - 1;
        assert_eq!(event, TurnEvent::MatchFound { first: a, second: b, won });
    }

    assert!(session.is_won());
    assert_eq!(session.turns_taken(), pair_count as u32);
    assert_eq!(session.matches_found(), pair_count as u32);
    assert!(session.board().cards().all(|c| c.is_matched));
}

// =============================================================================
// Imperfect play
// =============================================================================

/// Mismatches cost turns but never matches, and every mismatch must be
/// resolved before play continues.
#[test]
fn test_game_with_mismatches() {
    let mut session = GameSession::new(BoardSize::new(2, 3), 11);
    let (a0, b0) = find_pair(&session, TypeId::new(0));
    let (a1, b1) = find_pair(&session, TypeId::new(1));

    // Deliberate mismatch
    session.flip_card(a0).unwrap();
    assert_eq!(
        session.flip_card(a1).unwrap(),
        TurnEvent::Mismatch { first: a0, second: a1 }
    );

    // Nothing works until the mismatch resolves
    assert_eq!(session.flip_card(b0), Err(GameError::MismatchUnresolved));
    session.resolve_mismatch().unwrap();

    // Now finish both pairs
    session.flip_card(a0).unwrap();
    session.flip_card(b0).unwrap();
    session.flip_card(a1).unwrap();
    session.flip_card(b1).unwrap();

    let (a2, b2) = find_pair(&session, TypeId::new(2));
    session.flip_card(a2).unwrap();
    let event = session.flip_card(b2).unwrap();
    assert_eq!(event, TurnEvent::MatchFound { first: a2, second: b2, won: true });

    assert_eq!(session.matches_found(), 3);
    assert_eq!(session.turns_taken(), 4); // 3 matches + 1 mismatch
}

/// The singleton on an odd board can be flipped but never matched, and the
/// game is still winnable.
#[test]
fn test_odd_board_is_winnable() {
    let mut session = GameSession::new(BoardSize::new(3, 3), 13);
    let pair_count = session.board().size().pair_count();
    let singleton_type = TypeId::new(pair_count as u16);

    let board = session.board();
    let singleton = (0..board.cell_count())
        .find(|&i| board.card(i).unwrap().type_id == singleton_type)
        .unwrap();

    // Flip the singleton together with half of pair 0: a mismatch
    let (a0, b0) = find_pair(&session, TypeId::new(0));
    session.flip_card(singleton).unwrap();
    assert_eq!(
        session.flip_card(a0).unwrap(),
        TurnEvent::Mismatch { first: singleton, second: a0 }
    );
    session.resolve_mismatch().unwrap();

    // Match every real pair
    for t in 0..pair_count {
        let (a, b) = find_pair(&session, TypeId::new(t as u16));
        session.flip_card(a).unwrap();
        session.flip_card(b).unwrap();
    }

    assert!(session.is_won());
    assert!(!session.board().card(singleton).unwrap().is_matched);
    assert_eq!(session.turns_taken(), pair_count as u32 + 1);
}

// =============================================================================
// Determinism
// =============================================================================

/// The same seed deals the same board; different seeds (almost surely) don't.
#[test]
fn test_deals_are_seeded() {
    let s1 = GameSession::new(BoardSize::new(4, 4), 99);
    let s2 = GameSession::new(BoardSize::new(4, 4), 99);
    let s3 = GameSession::new(BoardSize::new(4, 4), 100);

    let layout = |s: &GameSession| -> Vec<TypeId> {
        s.board().cards().map(|c| c.type_id).collect()
    };

    assert_eq!(layout(&s1), layout(&s2));
    assert_ne!(layout(&s1), layout(&s3));
}
