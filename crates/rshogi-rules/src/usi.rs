//! USI形式の指し手表記
//!
//! - 盤上の移動: `7g7f`、成りは末尾に `+`（`8h2b+`）
//! - 駒打ち: `P*5e`（駒文字は常に大文字）
//!
//! 文字列からの復元は動かす駒を盤面から引くため `Position` のメソッドとして提供する。
//! 復元は書式と移動元の駒の有無のみを検査し、合法性は `Position::is_legal` で判定する。

use thiserror::Error;

use crate::position::Position;
use crate::types::{Move, PieceType, Square};

/// 指し手文字列の解析エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsiMoveError {
    #[error("Invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("Invalid move format: {0}")]
    InvalidMoveFormat(String),

    #[error("Invalid drop piece: {0}")]
    InvalidDropPiece(char),

    #[error("No piece on origin square {0}")]
    EmptyOrigin(Square),
}

/// 指し手をUSI表記に変換
pub fn move_to_usi(mv: Move) -> String {
    match mv.from() {
        None => format!("{}*{}", mv.piece_type().base_char(), mv.to()),
        Some(from) if mv.is_promote() => format!("{from}{}+", mv.to()),
        Some(from) => format!("{from}{}", mv.to()),
    }
}

/// 駒打ちの駒文字を駒種に変換（玉は打てない）
fn parse_drop_piece(c: char) -> Result<PieceType, UsiMoveError> {
    if !c.is_ascii_uppercase() {
        return Err(UsiMoveError::InvalidDropPiece(c));
    }
    match PieceType::from_base_char(c) {
        Some(pt) if pt.is_hand_piece() => Ok(pt),
        _ => Err(UsiMoveError::InvalidDropPiece(c)),
    }
}

impl Position {
    /// USI表記の指し手を、この局面の手番の指し手として復元する
    ///
    /// 盤上の移動では移動元の駒を `Move` に取り込むため、移動元が空ならエラー。
    pub fn parse_usi_move(&self, s: &str) -> Result<Move, UsiMoveError> {
        if let Some((piece, to)) = s.split_once('*') {
            let mut chars = piece.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(UsiMoveError::InvalidMoveFormat(s.to_string()));
            };
            let pt = parse_drop_piece(c)?;
            let to: Square = to.parse()?;
            return Ok(Move::new_drop(self.side_to_move(), pt, to));
        }

        let (body, promote) = match s.strip_suffix('+') {
            Some(stripped) => (stripped, true),
            None => (s, false),
        };
        if body.len() != 4 || !body.is_ascii() {
            return Err(UsiMoveError::InvalidMoveFormat(s.to_string()));
        }

        let from: Square = body[0..2].parse()?;
        let to: Square = body[2..4].parse()?;
        let piece = self.piece_on(from);
        if piece.is_none() {
            return Err(UsiMoveError::EmptyOrigin(from));
        }
        Ok(Move::new_move(from, to, piece, promote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Piece};

    #[test]
    fn test_move_to_usi() {
        let mv = Move::new_move(Square::new(2, 6), Square::new(2, 5), Piece::B_PAWN, false);
        assert_eq!(move_to_usi(mv), "7g7f");

        let mv = Move::new_move(Square::new(1, 7), Square::new(7, 1), Piece::B_BISHOP, true);
        assert_eq!(move_to_usi(mv), "8h2b+");

        let mv = Move::new_drop(Color::White, PieceType::Pawn, Square::new(4, 4));
        assert_eq!(move_to_usi(mv), "P*5e");
    }

    #[test]
    fn test_parse_board_move() {
        let pos = Position::startpos();
        let mv = pos.parse_usi_move("7g7f").unwrap();
        assert_eq!(mv.from(), Some(Square::new(2, 6)));
        assert_eq!(mv.to(), Square::new(2, 5));
        assert_eq!(mv.piece(), Piece::B_PAWN);
        assert!(!mv.is_promote());
        assert_eq!(mv.to_string(), "7g7f");
    }

    #[test]
    fn test_parse_drop_uses_side_to_move() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 w g 1").unwrap();
        let mv = pos.parse_usi_move("G*5e").unwrap();
        assert!(mv.is_drop());
        assert_eq!(mv.piece(), Piece::W_GOLD);
        assert_eq!(mv.to_string(), "G*5e");
    }

    #[test]
    fn test_parse_errors() {
        let pos = Position::startpos();
        assert_eq!(
            pos.parse_usi_move("5e5d"),
            Err(UsiMoveError::EmptyOrigin(Square::new(4, 4)))
        );
        assert!(matches!(pos.parse_usi_move("K*5e"), Err(UsiMoveError::InvalidDropPiece('K'))));
        assert!(matches!(pos.parse_usi_move("p*5e"), Err(UsiMoveError::InvalidDropPiece('p'))));
        assert!(matches!(pos.parse_usi_move("PP*5e"), Err(UsiMoveError::InvalidMoveFormat(_))));
        assert!(matches!(pos.parse_usi_move("7g7"), Err(UsiMoveError::InvalidMoveFormat(_))));
        assert!(matches!(pos.parse_usi_move("0g7f"), Err(UsiMoveError::InvalidSquare(_))));
        assert!(matches!(pos.parse_usi_move("P*5z"), Err(UsiMoveError::InvalidSquare(_))));
    }
}
