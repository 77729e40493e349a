//! 局面のJSON表現
//!
//! UIや外部ツールに渡すためのスナップショット。盤面は `cells[段][筋]` で、
//! 各段は9筋から1筋の順に並ぶ（SFENと同じ向き）。

use serde::{Deserialize, Serialize};

use crate::types::{Color, Hand, Piece, PieceType, Square};

use super::pos::Position;

/// 駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieceJson {
    /// "sente" | "gote"
    pub owner: String,
    /// "K" | "R" | "B" | "G" | "S" | "N" | "L" | "P"
    #[serde(rename = "type")]
    pub piece_type: String,
    /// 成駒かどうか（生駒では省略）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted: Option<bool>,
}

/// 盤面の1マス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellJson {
    /// "9a" ~ "1i" 形式
    pub square: String,
    /// 駒（存在しない場合はnull）
    pub piece: Option<PieceJson>,
}

/// 持ち駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HandJson {
    #[serde(rename = "P", skip_serializing_if = "Option::is_none")]
    pub pawn: Option<u32>,
    #[serde(rename = "L", skip_serializing_if = "Option::is_none")]
    pub lance: Option<u32>,
    #[serde(rename = "N", skip_serializing_if = "Option::is_none")]
    pub knight: Option<u32>,
    #[serde(rename = "S", skip_serializing_if = "Option::is_none")]
    pub silver: Option<u32>,
    #[serde(rename = "G", skip_serializing_if = "Option::is_none")]
    pub gold: Option<u32>,
    #[serde(rename = "B", skip_serializing_if = "Option::is_none")]
    pub bishop: Option<u32>,
    #[serde(rename = "R", skip_serializing_if = "Option::is_none")]
    pub rook: Option<u32>,
}

/// 両者の持ち駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandsJson {
    pub sente: HandJson,
    pub gote: HandJson,
}

/// 盤面全体の状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardStateJson {
    /// 9x9のセル配列
    pub cells: Vec<Vec<CellJson>>,
    /// 持ち駒
    pub hands: HandsJson,
    /// 手番: "sente" | "gote"
    pub turn: String,
    /// 手数
    pub ply: u64,
}

fn owner_name(color: Color) -> String {
    match color {
        Color::Black => "sente".to_string(),
        Color::White => "gote".to_string(),
    }
}

impl From<Piece> for PieceJson {
    fn from(pc: Piece) -> Self {
        let pt = pc.piece_type();
        PieceJson {
            owner: owner_name(pc.color()),
            piece_type: pt.base_char().to_string(),
            promoted: pt.is_promoted().then_some(true),
        }
    }
}

impl From<Hand> for HandJson {
    fn from(hand: Hand) -> Self {
        let get = |pt: PieceType| Some(hand.count(pt)).filter(|&n| n > 0);
        HandJson {
            pawn: get(PieceType::Pawn),
            lance: get(PieceType::Lance),
            knight: get(PieceType::Knight),
            silver: get(PieceType::Silver),
            gold: get(PieceType::Gold),
            bishop: get(PieceType::Bishop),
            rook: get(PieceType::Rook),
        }
    }
}

impl Position {
    /// JSONスナップショットを作る
    pub fn to_json_state(&self) -> BoardStateJson {
        let cells = (0..9u8)
            .map(|rank| {
                (0..9u8)
                    .map(|file| {
                        let sq = Square::new(file, rank);
                        let pc = self.piece_on(sq);
                        CellJson {
                            square: sq.to_string(),
                            piece: pc.is_some().then(|| PieceJson::from(pc)),
                        }
                    })
                    .collect()
            })
            .collect();

        BoardStateJson {
            cells,
            hands: HandsJson {
                sente: self.hand(Color::Black).into(),
                gote: self.hand(Color::White).into(),
            },
            turn: owner_name(self.side_to_move),
            ply: self.game_ply,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_state_startpos() {
        let state = Position::startpos().to_json_state();
        assert_eq!(state.cells.len(), 9);
        assert!(state.cells.iter().all(|row| row.len() == 9));
        assert_eq!(state.turn, "sente");
        assert_eq!(state.ply, 1);

        let corner = &state.cells[0][0];
        assert_eq!(corner.square, "9a");
        assert_eq!(
            corner.piece,
            Some(PieceJson {
                owner: "gote".to_string(),
                piece_type: "L".to_string(),
                promoted: None,
            })
        );
        assert_eq!(state.cells[4][4].piece, None);
        assert_eq!(state.hands.sente, HandJson::default());
    }

    #[test]
    fn test_json_promoted_and_hand() {
        let pos = Position::from_sfen("4k4/9/9/9/4+B4/9/9/9/4K4 w 2Pr 7").unwrap();
        let state = pos.to_json_state();
        let piece = state.cells[4][4].piece.clone().unwrap();
        assert_eq!(piece.piece_type, "B");
        assert_eq!(piece.promoted, Some(true));
        assert_eq!(state.hands.sente.pawn, Some(2));
        assert_eq!(state.hands.gote.rook, Some(1));
        assert_eq!(state.turn, "gote");
        assert_eq!(state.ply, 7);
    }
}
