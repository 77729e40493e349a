//! 合法手の列挙

use std::ops::ControlFlow;

use crate::bitboard::{Bitboard, file_bb, rank_bb};
use crate::position::Position;
use crate::types::{Color, Move, Piece, PieceType, Square};

use super::promotion::promotion_policy;

impl Position {
    /// 手番側の合法手（盤上の移動 → 駒打ちの順）
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut moves = Vec::new();
        let _ = self.visit_legal_moves(|mv| {
            moves.push(mv);
            ControlFlow::<()>::Continue(())
        });
        moves
    }

    /// 合法手をUSI表記で列挙
    pub fn legal_usi_moves(&mut self) -> Vec<String> {
        self.legal_moves().into_iter().map(|mv| mv.to_string()).collect()
    }

    /// 合法手が1つでもあるか（見つかった時点で打ち切る）
    pub fn has_legal_move(&mut self) -> bool {
        self.visit_legal_moves(|_| ControlFlow::Break(())).is_break()
    }

    /// 手番側に合法手がないか
    ///
    /// 詰みとステイルメイトを区別しない。王手の有無は `in_check` で確かめる。
    pub fn is_checkmate(&mut self) -> bool {
        !self.has_legal_move()
    }

    /// 指し手が合法か
    pub fn is_legal(&mut self, mv: Move) -> bool {
        self.visit_legal_moves(|legal| {
            if legal == mv { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        })
        .is_break()
    }

    /// `from` の駒が合法に移動できる升
    ///
    /// 空き升や手番でない側の駒なら空。
    pub fn movable_squares(&mut self, from: Square) -> Bitboard {
        let pc = self.piece_on(from);
        if pc.is_none() || pc.color() != self.side_to_move() {
            return Bitboard::EMPTY;
        }
        let mut targets = Bitboard::EMPTY;
        let _ = self.visit_piece_moves(pc, from, &mut |mv| {
            targets.set(mv.to());
            ControlFlow::<()>::Continue(())
        });
        targets
    }

    /// 合法手を順に `f` へ渡す。`f` が `Break` を返したら打ち切る
    pub fn visit_legal_moves<B>(
        &mut self,
        mut f: impl FnMut(Move) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let us = self.side_to_move();
        for pc in Piece::all_of(us) {
            for from in self.pieces(pc) {
                self.visit_piece_moves(pc, from, &mut f)?;
            }
        }
        self.visit_drops(&mut f)
    }

    /// `from` にある `pc` の合法な移動
    fn visit_piece_moves<B>(
        &mut self,
        pc: Piece,
        from: Square,
        f: &mut impl FnMut(Move) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let us = pc.color();
        let pt = pc.piece_type();
        for to in self.attacks_from(pc, from) {
            for &promote in promotion_policy(us, pt, from, to).choices() {
                let mv = Move::new_move(from, to, pc, promote);
                if self.keeps_king_safe(mv) {
                    f(mv)?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// 合法な駒打ち
    fn visit_drops<B>(&mut self, f: &mut impl FnMut(Move) -> ControlFlow<B>) -> ControlFlow<B> {
        let us = self.side_to_move();
        let hand = self.hand(us);
        if hand.is_empty() {
            return ControlFlow::Continue(());
        }
        let empty = !self.occupied();

        for pt in PieceType::HAND_PIECES {
            if !hand.has(pt) {
                continue;
            }
            let mut targets = empty & droppable_ranks(us, pt);
            if pt == PieceType::Pawn {
                targets &= !self.pawn_files(us);
            }
            for to in targets {
                let mv = Move::new_drop(us, pt, to);
                if self.drop_is_legal(mv) {
                    f(mv)?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// 仮適用して自玉に王手がかからないか
    fn keeps_king_safe(&mut self, mv: Move) -> bool {
        let us = self.side_to_move();
        match self.speculate(mv) {
            Ok(spec) => !spec.is_check(us),
            Err(e) => {
                log::trace!("rejecting {mv:?}: {e}");
                false
            }
        }
    }

    /// 駒打ちの王手放置と打ち歩詰めの判定
    fn drop_is_legal(&mut self, mv: Move) -> bool {
        let us = self.side_to_move();
        let mut spec = match self.speculate(mv) {
            Ok(spec) => spec,
            Err(e) => {
                log::trace!("rejecting {mv:?}: {e}");
                return false;
            }
        };
        if spec.is_check(us) {
            return false;
        }
        // 打ち歩詰め: 歩を打って王手し、相手に応手がない
        if mv.piece_type() == PieceType::Pawn && spec.is_check(!us) && !spec.has_legal_move() {
            log::trace!("rejecting {mv:?}: pawn drop mate");
            return false;
        }
        true
    }

    /// 成っていない自分の歩がある筋
    fn pawn_files(&self, color: Color) -> Bitboard {
        let pawns = self.pieces(Piece::new(color, PieceType::Pawn));
        (0..9u8)
            .map(file_bb)
            .filter(|&mask| !(mask & pawns).is_empty())
            .fold(Bitboard::EMPTY, |acc, mask| acc | mask)
    }
}

/// 駒を打てる段（行き所のない段を除く）
fn droppable_ranks(color: Color, pt: PieceType) -> Bitboard {
    let min_rank = match pt {
        PieceType::Pawn | PieceType::Lance => 1,
        PieceType::Knight => 2,
        _ => 0,
    };
    (0..9u8)
        .filter(|&rank| Square::new(0, rank).relative_rank(color) >= min_rank)
        .fold(Bitboard::EMPTY, |acc, rank| acc | rank_bb(rank))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usi_moves(pos: &mut Position) -> Vec<String> {
        let mut moves = pos.legal_usi_moves();
        moves.sort();
        moves
    }

    #[test]
    fn test_startpos_has_30_moves() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        assert_eq!(pos.legal_moves().len(), 30);
        assert_eq!(pos, before);
        assert!(pos.history().is_empty());
    }

    #[test]
    fn test_duplicate_pawn_rule() {
        let mut pos = Position::from_sfen("9/9/9/9/9/9/9/PPPPPPPPP/4K4 b P 1").unwrap();
        assert!(pos.legal_moves().iter().all(|mv| !mv.is_drop()));

        // と金は二歩に数えない
        let mut pos = Position::from_sfen("9/9/9/9/9/9/9/+P8/4K4 b P 1").unwrap();
        let drops: Vec<Move> = pos.legal_moves().into_iter().filter(|mv| mv.is_drop()).collect();
        // 1段目を除く8段 × 9筋 から占有升（と金・玉）を除く
        assert_eq!(drops.len(), 8 * 9 - 2);
    }

    #[test]
    fn test_drop_rank_restrictions() {
        let mut pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b NL 1").unwrap();
        let moves = pos.legal_moves();
        for mv in moves.iter().filter(|mv| mv.is_drop()) {
            let rank = mv.to().relative_rank(Color::Black);
            match mv.piece_type() {
                PieceType::Lance => assert!(rank >= 1, "{mv}"),
                PieceType::Knight => assert!(rank >= 2, "{mv}"),
                _ => unreachable!(),
            }
        }
        assert!(moves.iter().any(|mv| mv.to_string() == "L*5b"));
        assert!(!moves.iter().any(|mv| mv.to_string() == "N*1b"));

        let mut pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 w p 1").unwrap();
        assert!(!pos.legal_usi_moves().iter().any(|m| m.ends_with('i')));
    }

    #[test]
    fn test_drop_pawn_mate_is_illegal() {
        let mut pos = Position::from_sfen("9/9/9/9/9/9/4k4/3p1p3/4K4 w p 1").unwrap();
        let before = pos.clone();
        let moves = pos.legal_usi_moves();
        assert!(!moves.contains(&"P*5h".to_string()));
        // 他の升への歩打ちは合法
        assert!(moves.contains(&"P*5e".to_string()));
        assert_eq!(pos, before);
    }

    #[test]
    fn test_pawn_drop_check_with_escape_is_legal() {
        // 4i が空いているので逃げられる
        let mut pos = Position::from_sfen("9/9/9/9/9/9/4k4/3p5/4K4 w p 1").unwrap();
        assert!(pos.legal_usi_moves().contains(&"P*5h".to_string()));
    }

    #[test]
    fn test_no_pieces_no_moves() {
        let mut pos = Position::from_sfen("9/9/9/9/9/9/9/4P4/4K4 w - 1").unwrap();
        assert!(pos.legal_moves().is_empty());
        assert!(pos.is_checkmate());
    }

    #[test]
    fn test_forced_and_optional_promotions() {
        let mut pos = Position::from_sfen("4k4/P8/9/2P6/9/9/9/9/4K4 b - 1").unwrap();
        let moves = usi_moves(&mut pos);
        // 9b の歩は 9a で成りのみ
        assert!(moves.contains(&"9b9a+".to_string()));
        assert!(!moves.contains(&"9b9a".to_string()));
        // 7d の歩は 7c で選べる
        assert!(moves.contains(&"7d7c+".to_string()));
        assert!(moves.contains(&"7d7c".to_string()));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // 5h の金は 5a の飛車に釘付け
        let mut pos = Position::from_sfen("4r4/9/9/9/9/9/9/4G4/4K4 b - 1").unwrap();
        let moves = usi_moves(&mut pos);
        assert!(moves.iter().all(|m| !m.starts_with("5h") || m == "5h5g"));
        assert!(moves.contains(&"5h5g".to_string()));
    }

    #[test]
    fn test_checkmate() {
        // 頭金
        let mut pos = Position::from_sfen("4k4/4G4/4P4/9/9/9/9/9/4K4 w - 1").unwrap();
        assert!(pos.in_check());
        assert!(pos.is_checkmate());
        assert!(Position::startpos().has_legal_move());
    }

    #[test]
    fn test_movable_squares() {
        let mut pos = Position::startpos();
        let targets: Vec<String> =
            pos.movable_squares(Square::new(2, 6)).iter().map(|sq| sq.to_string()).collect();
        assert_eq!(targets, vec!["7f"]);

        // 後手の駒・空き升
        assert!(pos.movable_squares(Square::new(2, 2)).is_empty());
        assert!(pos.movable_squares(Square::new(4, 4)).is_empty());
    }

    #[test]
    fn test_is_legal() {
        let mut pos = Position::startpos();
        let mv = pos.parse_usi_move("7g7f").unwrap();
        assert!(pos.is_legal(mv));
        let mv = pos.parse_usi_move("7g7e").unwrap();
        assert!(!pos.is_legal(mv));
    }
}
