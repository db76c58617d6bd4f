use kifu_core::{Color, Move, MoveError, PieceType, Place, Position};

fn place(row: u8, col: u8) -> Place {
    Place::new(row, col).unwrap()
}

#[test]
fn test_pawn_push_from_opening() {
    let before = Position::default();
    let mut pos = before.copy();

    let mv = Move::new(1, PieceType::Pawn, place(6, 4), place(5, 4), false);
    pos.apply(&mv).unwrap();

    assert_eq!(pos.grid(Color::Black)[6][4], None);
    assert_eq!(pos.grid(Color::Black)[5][4], Some(PieceType::Pawn));
    assert_eq!(pos.grid(Color::White), before.grid(Color::White));
    assert_eq!(pos.hand(Color::Black), before.hand(Color::Black));
    assert_eq!(pos.hand(Color::White), before.hand(Color::White));
    assert_eq!(pos.side_to_move(), Color::White);
}

#[test]
fn test_capture_silver_to_hand() {
    let mut pos = Position::from_sfen("4k4/9/9/4s4/4P4/9/9/9/4K4 b - 1").unwrap();
    let before = pos.hand(Color::Black).count(PieceType::Silver);

    let mv = Move::new(1, PieceType::Pawn, place(4, 4), place(3, 4), false);
    pos.apply(&mv).unwrap();

    assert_eq!(pos.hand(Color::Black).count(PieceType::Silver), before + 1);
    assert_eq!(pos.grid(Color::White)[3][4], None);
    assert_eq!(pos.grid(Color::Black)[3][4], Some(PieceType::Pawn));
    assert!(pos.verify_conservation());
}

#[test]
fn test_drop_from_hand() {
    let mut pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b 2N 1").unwrap();

    let mv = Move::drop(1, PieceType::Knight, place(4, 2));
    pos.apply(&mv).unwrap();

    assert_eq!(pos.hand(Color::Black).count(PieceType::Knight), 1);
    assert_eq!(pos.grid(Color::Black)[4][2], Some(PieceType::Knight));
    assert!(pos.verify_conservation());
}

#[test]
fn test_copy_is_not_affected_by_apply() {
    let original = Position::default();
    let mut copied = original.copy();
    assert_eq!(original, copied);

    copied
        .apply(&Move::new(1, PieceType::Pawn, place(6, 2), place(5, 2), false))
        .unwrap();
    copied
        .apply(&Move::new(2, PieceType::Pawn, place(2, 6), place(3, 6), false))
        .unwrap();

    assert_eq!(original, Position::default());
    assert_ne!(original, copied);
}

#[test]
fn test_short_game_keeps_conservation() {
    let mut pos = Position::default();
    let moves = [
        Move::new(1, PieceType::Pawn, place(6, 2), place(5, 2), false),
        Move::new(2, PieceType::Pawn, place(2, 6), place(3, 6), false),
        // 角交換
        Move::new(3, PieceType::Bishop, place(7, 1), place(1, 7), true),
        Move::new(4, PieceType::Silver, place(0, 6), place(1, 7), false),
        Move::drop(5, PieceType::Bishop, place(4, 4)),
    ];

    for mv in &moves {
        pos.apply(mv).unwrap();
        assert!(pos.verify_conservation(), "after {mv}");
    }

    assert_eq!(pos.hand(Color::White).count(PieceType::Bishop), 1);
    assert!(pos.hand(Color::Black).is_empty());
    assert_eq!(pos.piece_on(place(4, 4)), Some((Color::Black, PieceType::Bishop)));
    assert_eq!(pos.piece_on(place(1, 7)), Some((Color::White, PieceType::Silver)));
    assert_eq!(
        pos.to_sfen(6).unwrap(),
        "lnsgkg1nl/1r5s1/pppppp1pp/6p2/4B4/2P6/PP1PPPPPP/7R1/LNSGKGSNL w b 6"
    );
}

#[test]
fn test_invalid_drop_is_rejected() {
    let mut pos = Position::default();
    let mv = Move::drop(1, PieceType::Gold, place(4, 4));
    assert_eq!(
        pos.apply(&mv),
        Err(MoveError::NotInHand { color: Color::Black, piece: PieceType::Gold })
    );
    assert_eq!(pos, Position::default());
}
