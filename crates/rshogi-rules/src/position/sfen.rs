//! SFEN形式の解析・出力

use thiserror::Error;

use crate::types::{Color, Hand, Piece, PieceType, Square};

use super::pos::Position;

/// 平手初期局面のSFEN
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// 手駒の出力順（先手→後手の順にこの並びで出力する）
const HAND_ORDER: [PieceType; 7] = [
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
    PieceType::Pawn,
];

/// SFENパースエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SfenError {
    /// フィールド数が不正
    #[error("SFEN must have 3 or 4 fields, got {0}")]
    FieldCount(usize),
    /// 盤面の形式が不正
    #[error("Invalid board: {0}")]
    Board(String),
    /// 手番の形式が不正
    #[error("Invalid side to move: {0} (expected 'b' or 'w')")]
    SideToMove(String),
    /// 手駒の形式が不正
    #[error("Invalid hand: {0}")]
    Hand(String),
    /// 手数の形式が不正
    #[error("Invalid ply: {0}")]
    Ply(String),
}

impl Position {
    /// 平手初期局面
    pub fn startpos() -> Self {
        let mut pos = Position::new();
        pos.set_hirate();
        pos
    }

    /// 平手初期局面を設定
    pub fn set_hirate(&mut self) {
        *self = Position::new();
        for (file, pt) in (0..9u8).zip(BACK_RANK) {
            self.set_bit(Piece::new(Color::White, pt), Square::new(file, 0));
            self.set_bit(Piece::W_PAWN, Square::new(file, 2));
            self.set_bit(Piece::B_PAWN, Square::new(file, 6));
            self.set_bit(Piece::new(Color::Black, pt), Square::new(file, 8));
        }
        self.set_bit(Piece::W_ROOK, Square::new(1, 1));
        self.set_bit(Piece::W_BISHOP, Square::new(7, 1));
        self.set_bit(Piece::B_BISHOP, Square::new(1, 7));
        self.set_bit(Piece::B_ROOK, Square::new(7, 7));
    }

    /// SFEN文字列から局面を生成
    pub fn from_sfen(sfen: &str) -> Result<Self, SfenError> {
        let mut pos = Position::new();
        pos.set_sfen(sfen)?;
        Ok(pos)
    }

    /// SFEN文字列から局面を設定
    ///
    /// 盤面・手駒・手番・手数・履歴のすべてを置き換える。エラー時は元の局面のまま。
    pub fn set_sfen(&mut self, sfen: &str) -> Result<(), SfenError> {
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(SfenError::FieldCount(parts.len()));
        }

        let mut pos = Position::new();

        // 1. 盤面
        pos.parse_board(parts[0])?;

        // 2. 手番
        pos.side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => return Err(SfenError::SideToMove(other.to_string())),
        };

        // 3. 手駒
        pos.parse_hand(parts[2])?;

        // 4. 手数（省略時は1、数字のみで 1..=u32::MAX）
        if let Some(ply) = parts.get(3) {
            pos.game_ply = parse_move_number(ply).ok_or_else(|| SfenError::Ply(ply.to_string()))?;
        }

        log::debug!("decoded position: {sfen}");
        *self = pos;
        Ok(())
    }

    /// 現局面のSFEN文字列を取得
    pub fn to_sfen(&self) -> String {
        let mut result = String::new();

        // 1. 盤面（各段を9筋→1筋の順）
        for rank in 0..9u8 {
            let mut empty_count = 0;
            for file in 0..9u8 {
                let pc = self.piece_on(Square::new(file, rank));
                if pc.is_none() {
                    empty_count += 1;
                    continue;
                }
                if empty_count > 0 {
                    result.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                result.push_str(&pc.to_sfen());
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if rank < 8 {
                result.push('/');
            }
        }

        // 2. 手番
        result.push(' ');
        result.push(self.side_to_move.to_sfen_char());

        // 3. 手駒
        result.push(' ');
        let hand_str = self.hand_to_sfen();
        if hand_str.is_empty() {
            result.push('-');
        } else {
            result.push_str(&hand_str);
        }

        // 4. 手数
        result.push(' ');
        result.push_str(&self.game_ply.to_string());

        result
    }

    /// 盤面部分をパース
    fn parse_board(&mut self, board_str: &str) -> Result<(), SfenError> {
        let ranks: Vec<&str> = board_str.split('/').collect();
        if ranks.len() != 9 {
            return Err(SfenError::Board(format!("Expected 9 ranks, got {}", ranks.len())));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = rank_idx as u8;
            let mut file = 0u8;
            let mut promoted = false;

            for c in rank_str.chars() {
                if c == '+' {
                    if promoted {
                        return Err(SfenError::Board(format!("Double '+' in rank {rank_idx}")));
                    }
                    promoted = true;
                    continue;
                }

                if let Some(digit) = c.to_digit(10) {
                    if promoted || digit == 0 {
                        return Err(SfenError::Board(format!(
                            "Unexpected '{c}' in rank {rank_idx}"
                        )));
                    }
                    file += digit as u8;
                    if file > 9 {
                        return Err(SfenError::Board(format!(
                            "Too many squares in rank {rank_idx}"
                        )));
                    }
                    continue;
                }

                if file >= 9 {
                    return Err(SfenError::Board(format!("Too many pieces in rank {rank_idx}")));
                }
                let pc = sfen_char_to_piece(c, promoted)?;
                self.set_bit(pc, Square::new(file, rank));
                promoted = false;
                file += 1;
            }

            if promoted || file != 9 {
                return Err(SfenError::Board(format!(
                    "Rank {rank_idx} has wrong number of squares"
                )));
            }
        }

        Ok(())
    }

    /// 手駒部分をパース（同じ駒の繰り返しは加算）
    fn parse_hand(&mut self, hand_str: &str) -> Result<(), SfenError> {
        if hand_str == "-" {
            return Ok(());
        }

        let mut count: Option<u32> = None;
        for c in hand_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                let n = count.unwrap_or(0).saturating_mul(10).saturating_add(digit);
                count = Some(n);
                continue;
            }

            let (color, pt) = sfen_hand_char_to_piece(c)?;
            let n = match count.take() {
                None => 1,
                Some(0) => return Err(SfenError::Hand(format!("Zero count for '{c}'"))),
                Some(n) => n,
            };
            let total = self.hand[color.index()].count(pt).saturating_add(n);
            if total > Hand::max_count(pt) {
                return Err(SfenError::Hand(format!("Too many '{c}' in hand: {total}")));
            }
            self.hand[color.index()] = self.hand[color.index()].set(pt, total);
        }

        if count.is_some() {
            return Err(SfenError::Hand(format!("Trailing count in '{hand_str}'")));
        }
        Ok(())
    }

    /// 手駒をSFEN文字列に変換
    fn hand_to_sfen(&self) -> String {
        let mut result = String::new();
        for color in Color::ALL {
            let hand = self.hand[color.index()];
            for pt in HAND_ORDER {
                let cnt = hand.count(pt);
                if cnt == 0 {
                    continue;
                }
                if cnt > 1 {
                    result.push_str(&cnt.to_string());
                }
                result.push_str(&Piece::new(color, pt).to_sfen());
            }
        }
        result
    }
}

/// 平手の1段目・9段目（9筋→1筋）
const BACK_RANK: [PieceType; 9] = [
    PieceType::Lance,
    PieceType::Knight,
    PieceType::Silver,
    PieceType::Gold,
    PieceType::King,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
];

/// SFEN文字を駒に変換
fn sfen_char_to_piece(c: char, promoted: bool) -> Result<Piece, SfenError> {
    if !c.is_ascii_alphabetic() {
        return Err(SfenError::Board(format!("Unknown piece: {c}")));
    }
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    let base_pt = PieceType::from_base_char(c)
        .ok_or_else(|| SfenError::Board(format!("Unknown piece: {c}")))?;

    let pt = if promoted {
        base_pt.promote().ok_or_else(|| SfenError::Board(format!("Cannot promote: {c}")))?
    } else {
        base_pt
    };

    Ok(Piece::new(color, pt))
}

/// SFEN手駒文字を駒種に変換
fn sfen_hand_char_to_piece(c: char) -> Result<(Color, PieceType), SfenError> {
    let color = if c.is_ascii_uppercase() { Color::Black } else { Color::White };
    match PieceType::from_base_char(c) {
        Some(pt) if pt.is_hand_piece() && c.is_ascii_alphabetic() => Ok((color, pt)),
        _ => Err(SfenError::Hand(format!("Unknown hand piece: {c}"))),
    }
}

/// 手数欄（ASCII数字のみ、1以上 `u32::MAX` 以下）
fn parse_move_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.parse::<u32>() {
        Ok(n) if n > 0 => Some(u64::from(n)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_matches_hirate_sfen() {
        let pos = Position::startpos();
        assert_eq!(pos, Position::from_sfen(SFEN_HIRATE).unwrap());
        assert_eq!(pos.to_sfen(), SFEN_HIRATE);

        assert_eq!(pos.piece_on(Square::new(0, 8)), Piece::B_LANCE);
        assert_eq!(pos.piece_on(Square::new(4, 8)), Piece::B_KING);
        assert_eq!(pos.piece_on(Square::new(1, 7)), Piece::B_BISHOP);
        assert_eq!(pos.piece_on(Square::new(7, 7)), Piece::B_ROOK);
        assert_eq!(pos.piece_on(Square::new(4, 0)), Piece::W_KING);
        assert_eq!(pos.king_square(Color::White), Some(Square::new(4, 0)));
        assert_eq!(pos.occupied().count(), 40);
    }

    #[test]
    fn test_sfen_roundtrip() {
        let test_cases = [
            SFEN_HIRATE,
            "8l/1l+R2P3/p2pBG1pp/kps1p4/Nn1P2G2/P1P1P2PP/1PS6/1KSG3+r1/LN2+p3L w Sbgn3p 124",
            "4k4/9/9/9/9/9/9/9/4K4 b 2R2B4G4S4N4L18P 1",
        ];

        for sfen in test_cases {
            let pos = Position::from_sfen(sfen).unwrap();
            assert_eq!(pos.to_sfen(), sfen, "SFEN roundtrip failed for: {sfen}");
        }
    }

    #[test]
    fn test_hand_order_and_accumulation() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b pPGp2P 1").unwrap();
        assert_eq!(pos.hand(Color::Black).count(PieceType::Pawn), 3);
        assert_eq!(pos.hand(Color::White).count(PieceType::Pawn), 2);
        assert_eq!(pos.to_sfen(), "4k4/9/9/9/9/9/9/9/4K4 b G3P2p 1");
    }

    #[test]
    fn test_move_number_optional() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 w -").unwrap();
        assert_eq!(pos.game_ply(), 1);
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn test_sfen_promoted_pieces() {
        let pos = Position::from_sfen("4k4/9/9/9/4+P4/9/9/9/4K4 b - 1").unwrap();
        assert_eq!(pos.piece_on(Square::new(4, 4)), Piece::B_PRO_PAWN);
    }

    #[test]
    fn test_decode_resets_history() {
        let mut pos = Position::startpos();
        let mv = pos.parse_usi_move("7g7f").unwrap();
        pos.do_move(mv).unwrap();
        pos.set_sfen(SFEN_HIRATE).unwrap();
        assert!(pos.history().is_empty());
        assert_eq!(pos.game_ply(), 1);
    }

    #[test]
    fn test_sfen_errors() {
        let cases = [
            ("invalid", SfenError::FieldCount(1)),
            ("9/9/9 b - 1", SfenError::Board("Expected 9 ranks, got 3".to_string())),
            ("4k4/9/9/9/9/9/9/9/4K4 x - 1", SfenError::SideToMove("x".to_string())),
            ("4k4/9/9/9/9/9/9/9/4K4 b - 0", SfenError::Ply("0".to_string())),
            ("4k4/9/9/9/9/9/9/9/4K4 b - abc", SfenError::Ply("abc".to_string())),
        ];
        for (sfen, expected) in cases {
            assert_eq!(Position::from_sfen(sfen), Err(expected), "{sfen}");
        }

        for sfen in [
            "4k5/9/9/9/9/9/9/9/4K4 b - 1",
            "4k3/9/9/9/9/9/9/9/4K4 b - 1",
            "4+k4/9/9/9/9/9/9/9/4K4 b - 1",
            "4x4/9/9/9/9/9/9/9/4K4 b - 1",
            "4k4/9/9/9/9/9/9/9/4K3+ b - 1",
        ] {
            assert!(matches!(Position::from_sfen(sfen), Err(SfenError::Board(_))), "{sfen}");
        }

        for sfen in [
            "4k4/9/9/9/9/9/9/9/4K4 b K 1",
            "4k4/9/9/9/9/9/9/9/4K4 b 2 1",
            "4k4/9/9/9/9/9/9/9/4K4 b 0P 1",
            "4k4/9/9/9/9/9/9/9/4K4 b 4R 1",
        ] {
            assert!(matches!(Position::from_sfen(sfen), Err(SfenError::Hand(_))), "{sfen}");
        }
    }

    #[test]
    fn test_move_number_digits_only() {
        for ply in ["+5", "-1", "5a", "4294967296"] {
            let sfen = format!("4k4/9/9/9/9/9/9/9/4K4 b - {ply}");
            assert_eq!(Position::from_sfen(&sfen), Err(SfenError::Ply(ply.to_string())));
        }
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b - 007").unwrap();
        assert_eq!(pos.game_ply(), 7);
    }

    #[test]
    fn test_max_move_number_still_generates_moves() {
        let mut pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b - 4294967295").unwrap();
        let before = pos.clone();
        assert_eq!(pos.legal_moves().len(), 5);

        let mv = pos.parse_usi_move("5i5h").unwrap();
        pos.do_move(mv).unwrap();
        assert_eq!(pos.game_ply(), u64::from(u32::MAX) + 1);
        pos.undo_move().unwrap();
        assert_eq!(pos, before);
    }

    #[test]
    fn test_set_sfen_error_keeps_position() {
        let mut pos = Position::startpos();
        assert!(pos.set_sfen("4k4/9/9/9/9/9/9/9/4K4 b - 0").is_err());
        assert_eq!(pos, Position::startpos());
    }
}
