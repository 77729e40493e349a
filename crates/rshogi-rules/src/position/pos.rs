//! 局面の本体

use crate::bitboard::Bitboard;
use crate::error::RulesError;
use crate::types::{Color, Hand, Piece, PieceType, Square};

use super::state::UndoInfo;

/// 局面
///
/// 駒の配置は28種類の駒ごとのBitboardだけで表し、占有升などの派生情報は
/// 保持せず都度計算する。1つの升に立つビットは高々1つ。
pub struct Position {
    /// 駒ごとのBitboard（`Piece::kind_index()` で引く）
    pub(super) by_piece: [Bitboard; Piece::KIND_NUM],
    /// 手駒 [Color]
    pub(super) hand: [Hand; Color::NUM],
    /// 手番
    pub(super) side_to_move: Color,
    /// 手数（1始まり、適用で+1・巻き戻しで-1）
    pub(super) game_ply: u64,
    /// 適用済みの指し手
    pub(super) history: Vec<UndoInfo>,
}

impl Position {
    /// 空の局面（先手番・1手目）
    pub fn new() -> Self {
        Position {
            by_piece: [Bitboard::EMPTY; Piece::KIND_NUM],
            hand: [Hand::EMPTY; Color::NUM],
            side_to_move: Color::Black,
            game_ply: 1,
            history: Vec::new(),
        }
    }

    // ========== 駒の配置 ==========

    /// 升にある駒（なければ `Piece::NONE`）
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.by_piece
            .iter()
            .position(|bb| bb.contains(sq))
            .and_then(Piece::from_kind_index)
            .unwrap_or(Piece::NONE)
    }

    /// 指定駒のBitboard
    #[inline]
    pub fn pieces(&self, pc: Piece) -> Bitboard {
        if pc.is_none() {
            return Bitboard::EMPTY;
        }
        self.by_piece[pc.kind_index()]
    }

    /// 指定手番の駒がある升
    pub fn pieces_of(&self, color: Color) -> Bitboard {
        Piece::all_of(color).fold(Bitboard::EMPTY, |acc, pc| acc | self.pieces(pc))
    }

    /// 駒がある升
    pub fn occupied(&self) -> Bitboard {
        self.by_piece.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    /// 玉の位置（玉がなければNone）
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(Piece::new(color, PieceType::King)).lsb()
    }

    /// 升に駒を置く
    pub fn put_piece(&mut self, pc: Piece, sq: Square) -> Result<(), RulesError> {
        if pc.is_none() {
            return Err(RulesError::UnknownPiece);
        }
        if self.occupied().contains(sq) {
            return Err(RulesError::SquareOccupied(sq));
        }
        self.by_piece[pc.kind_index()].set(sq);
        Ok(())
    }

    /// 升から駒を取り除く
    pub fn remove_piece(&mut self, pc: Piece, sq: Square) -> Result<(), RulesError> {
        if pc.is_none() {
            return Err(RulesError::UnknownPiece);
        }
        self.by_piece[pc.kind_index()].clear(sq);
        Ok(())
    }

    /// 検査済みの配置変更（do_move / undo_move 専用）
    #[inline]
    pub(super) fn set_bit(&mut self, pc: Piece, sq: Square) {
        self.by_piece[pc.kind_index()].set(sq);
    }

    #[inline]
    pub(super) fn clear_bit(&mut self, pc: Piece, sq: Square) {
        self.by_piece[pc.kind_index()].clear(sq);
    }

    // ========== 手駒 ==========

    /// 手駒
    #[inline]
    pub fn hand(&self, color: Color) -> Hand {
        self.hand[color.index()]
    }

    /// 手駒を1枚増やす
    pub fn add_hand(&mut self, color: Color, piece_type: PieceType) -> Result<(), RulesError> {
        self.hand[color.index()] = self.hand_after_add(color, piece_type)?;
        Ok(())
    }

    /// 手駒を1枚減らす
    pub fn remove_hand(&mut self, color: Color, piece_type: PieceType) -> Result<(), RulesError> {
        self.hand[color.index()] = self.hand_after_remove(color, piece_type)?;
        Ok(())
    }

    pub(super) fn hand_after_add(&self, color: Color, piece_type: PieceType) -> Result<Hand, RulesError> {
        self.hand[color.index()]
            .checked_add(piece_type)
            .ok_or(RulesError::HandOverflow { color, piece_type })
    }

    pub(super) fn hand_after_remove(
        &self,
        color: Color,
        piece_type: PieceType,
    ) -> Result<Hand, RulesError> {
        self.hand[color.index()]
            .checked_sub(piece_type)
            .ok_or(RulesError::InsufficientHand { color, piece_type })
    }

    // ========== 手番・手数・履歴 ==========

    /// 手番
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 手数
    #[inline]
    pub fn game_ply(&self) -> u64 {
        self.game_ply
    }

    /// 適用済みの指し手（古い順）
    #[inline]
    pub fn history(&self) -> &[UndoInfo] {
        &self.history
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// 複製は盤面・手駒・手番・手数のみを写し、履歴は空にする
impl Clone for Position {
    fn clone(&self) -> Self {
        Position {
            by_piece: self.by_piece,
            hand: self.hand,
            side_to_move: self.side_to_move,
            game_ply: self.game_ply,
            history: Vec::new(),
        }
    }
}

/// 履歴は比較しない
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.by_piece == other.by_piece
            && self.hand == other.hand
            && self.side_to_move == other.side_to_move
            && self.game_ply == other.game_ply
    }
}

impl Eq for Position {}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Position")
            .field("sfen", &self.to_sfen())
            .field("history", &self.history.len())
            .finish()
    }
}
