//! 指し手の実行・巻き戻し

use std::ops::Deref;

use crate::error::RulesError;
use crate::types::{Move, Piece};

use super::pos::Position;
use super::state::UndoInfo;

impl Position {
    /// 指し手を適用する
    ///
    /// 検査をすべて終えてから局面を書き換えるため、エラー時の局面は呼び出し前と同じ。
    /// 王手放置などの合法性は検査しない。
    pub fn do_move(&mut self, mv: Move) -> Result<(), RulesError> {
        let us = self.side_to_move;
        let to = mv.to();

        let undo = match mv.from() {
            None => {
                if mv.piece().color() != us {
                    return Err(RulesError::NotSideToMove(mv.piece().color()));
                }
                let pt = mv.piece_type();
                let new_hand = self.hand_after_remove(us, pt)?;
                if self.occupied().contains(to) {
                    return Err(RulesError::SquareOccupied(to));
                }
                let pc = Piece::new(us, pt);

                self.hand[us.index()] = new_hand;
                self.set_bit(pc, to);
                UndoInfo {
                    mv,
                    moved: pc,
                    captured: Piece::NONE,
                    placed: pc,
                }
            }
            Some(from) => {
                let pc = self.piece_on(from);
                if pc.is_none() || pc.color() != us {
                    return Err(RulesError::EmptyOrigin(from));
                }
                let captured = self.piece_on(to);
                if captured.is_some() && captured.color() == us {
                    return Err(RulesError::SquareOccupied(to));
                }
                let new_hand = if captured.is_some() {
                    Some(self.hand_after_add(us, captured.piece_type().unpromote())?)
                } else {
                    None
                };
                // 玉・金・成駒の成りフラグは無視する
                let placed = if mv.is_promote() { pc.promote().unwrap_or(pc) } else { pc };

                if let Some(hand) = new_hand {
                    self.clear_bit(captured, to);
                    self.hand[us.index()] = hand;
                }
                self.clear_bit(pc, from);
                self.set_bit(placed, to);
                UndoInfo {
                    mv,
                    moved: pc,
                    captured,
                    placed,
                }
            }
        };

        self.history.push(undo);
        self.side_to_move = !us;
        self.game_ply += 1;
        Ok(())
    }

    /// 直前の指し手を巻き戻し、その指し手を返す
    pub fn undo_move(&mut self) -> Result<Move, RulesError> {
        let undo = *self.history.last().ok_or(RulesError::EmptyHistory)?;
        let us = !self.side_to_move;
        let to = undo.mv.to();

        let new_hand = match undo.mv.from() {
            None => Some(self.hand_after_add(us, undo.moved.piece_type())?),
            Some(_) if undo.captured.is_some() => {
                Some(self.hand_after_remove(us, undo.captured.piece_type().unpromote())?)
            }
            Some(_) => None,
        };

        self.history.pop();
        self.side_to_move = us;
        if let Some(hand) = new_hand {
            self.hand[us.index()] = hand;
        }
        self.clear_bit(undo.placed, to);
        if let Some(from) = undo.mv.from() {
            self.set_bit(undo.moved, from);
            if undo.captured.is_some() {
                self.set_bit(undo.captured, to);
            }
        }
        self.game_ply -= 1;
        Ok(undo.mv)
    }

    /// 指し手を仮適用し、ガードが破棄されたときに巻き戻す
    ///
    /// 合法手生成での「適用→判定→巻き戻し」に使う。ガード越しには `&Position`
    /// しか得られず、履歴を崩す操作（`do_move` / `undo_move`）は呼べない。
    pub fn speculate(&mut self, mv: Move) -> Result<Speculation<'_>, RulesError> {
        self.do_move(mv)?;
        Ok(Speculation { pos: self })
    }
}

/// 仮適用中の局面
///
/// `Drop` で必ず `undo_move` する。どの経路で判定を抜けても局面は元に戻る。
pub struct Speculation<'a> {
    pos: &'a mut Position,
}

impl Deref for Speculation<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        &*self.pos
    }
}

impl Speculation<'_> {
    /// 仮適用の上にさらに仮適用を重ねる
    pub fn speculate(&mut self, mv: Move) -> Result<Speculation<'_>, RulesError> {
        self.pos.speculate(mv)
    }

    /// 仮適用後の局面で手番側に合法手があるか
    pub fn has_legal_move(&mut self) -> bool {
        self.pos.has_legal_move()
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.pos.undo_move() {
            log::warn!("speculative move could not be undone: {e}");
        }
    }
}
