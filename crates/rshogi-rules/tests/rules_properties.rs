//! 局面・利き・王手・合法手の基本性質

use rshogi_rules::{Color, Piece, PieceType, Position, SFEN_HIRATE, Square};

fn pos(sfen: &str) -> Position {
    Position::from_sfen(sfen).expect("valid sfen")
}

#[test]
fn test_duplicate_pawn_position_has_no_pawn_drop() {
    let mut pos = pos("9/9/9/9/9/9/9/PPPPPPPPP/4K4 b P 1");
    let moves = pos.legal_moves();
    assert!(!moves.is_empty());
    assert!(
        moves.iter().all(|mv| !(mv.is_drop() && mv.piece_type() == PieceType::Pawn)),
        "pawn drop generated: {moves:?}"
    );
}

#[test]
fn test_pawn_drop_mate_is_excluded() {
    let mut pos = pos("9/9/9/9/9/9/4k4/3p1p3/4K4 w p 1");
    let in_front_of_king = Square::from_index(67).expect("on board");
    assert_eq!(in_front_of_king.to_string(), "5h");

    let moves = pos.legal_moves();
    assert!(
        !moves
            .iter()
            .any(|mv| mv.is_drop() && mv.piece_type() == PieceType::Pawn && mv.to() == in_front_of_king)
    );
    // 歩打ち自体は他の升で可能
    assert!(moves.iter().any(|mv| mv.is_drop()));
}

#[test]
fn test_check_detection_symmetry() {
    let pos = pos("9/9/9/9/9/9/4k4/4P4/4K4 b - 1");
    assert!(pos.is_check(Color::White));
    assert!(!pos.is_check(Color::Black));
}

#[test]
fn test_pawn_attack_set() {
    let pos = pos("9/9/9/9/9/9/9/4P4/4K4 b - 1");
    let from = Square::from_index(67).expect("on board");
    assert_eq!(pos.piece_on(from), Piece::B_PAWN);

    let targets: Vec<usize> = pos.attacks_from(Piece::B_PAWN, from).iter().map(|sq| sq.index()).collect();
    assert_eq!(targets, vec![58]);
}

#[test]
fn test_side_without_pieces_has_no_moves() {
    let mut pos = pos("9/9/9/9/9/9/9/4P4/4K4 w - 1");
    assert!(pos.legal_moves().is_empty());
    assert!(!pos.has_legal_move());
    // 玉がないので王手ではない
    assert!(!pos.in_check());
}

#[test]
fn test_startpos_sfen_roundtrip() {
    let pos = pos(SFEN_HIRATE);
    assert_eq!(pos.to_sfen(), SFEN_HIRATE);
    assert_eq!(Position::startpos().to_sfen(), SFEN_HIRATE);
}

#[test]
fn test_apply_undo_every_startpos_move() {
    let mut pos = Position::startpos();
    let before = pos.clone();
    for mv in pos.legal_moves() {
        pos.do_move(mv).expect("legal move applies");
        assert!(!pos.is_check(Color::Black), "{mv} leaves king in check");
        assert_eq!(pos.undo_move(), Ok(mv));
        assert_eq!(pos, before, "undo of {mv} differs");
    }
}

#[test]
fn test_usi_moves_roundtrip_through_parser() {
    let mut pos = pos("8l/1l+R2P3/p2pBG1pp/kps1p4/Nn1P2G2/P1P1P2PP/1PS6/1KSG3+r1/LN2+p3L w Sbgn3p 124");
    for mv in pos.legal_moves() {
        let token = mv.to_string();
        assert_eq!(pos.parse_usi_move(&token), Ok(mv), "{token}");
    }
}
