//! 升（Square）

use std::fmt;

use super::Color;
use crate::usi::UsiMoveError;

/// 盤上の升（0-80、段優先の行順）
///
/// **注意**: 内部の筋座標はUSI表記と逆向き
/// - file 0 = 9筋（左端）
/// - file 8 = 1筋（右端）
/// - rank 0 = a段（後手陣の端）
/// - rank 8 = i段（先手陣の端）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// 升の数
    pub const NUM: usize = 81;

    /// 筋・段から生成
    ///
    /// `file` は内部座標（0 = 9筋）であることに注意。
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 9 && rank < 9);
        Square(rank * 9 + file)
    }

    /// インデックスから生成（範囲外はNone）
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::NUM { Some(Square(index as u8)) } else { None }
    }

    /// 全升を番号順に列挙
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }

    /// 筋（0-8、0 = 9筋）
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 9
    }

    /// 段（0-8、0 = a段）
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 9
    }

    /// インデックス
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 内部値
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// 手番から見た段（0 = その手番にとって最奥の段）
    #[inline]
    pub const fn relative_rank(self, color: Color) -> u8 {
        match color {
            Color::Black => self.rank(),
            Color::White => 8 - self.rank(),
        }
    }

    /// 段・筋方向にずらした升（盤外ならNone）
    #[inline]
    pub const fn offset(self, dr: i8, df: i8) -> Option<Square> {
        let r = self.rank() as i8 + dr;
        let f = self.file() as i8 + df;
        if r < 0 || r >= 9 || f < 0 || f >= 9 {
            None
        } else {
            Some(Square::new(f as u8, r as u8))
        }
    }

    /// USI表記の文字から生成
    ///
    /// # Example
    /// ```
    /// use rshogi_rules::Square;
    ///
    /// let sq = Square::from_usi_chars('7', 'g').unwrap();
    /// assert_eq!(sq.to_string(), "7g");
    /// assert_eq!(sq.index(), 6 * 9 + 2);
    /// ```
    pub fn from_usi_chars(file: char, rank: char) -> Result<Self, UsiMoveError> {
        let file_idx = match file {
            '1'..='9' => b'9' - file as u8,
            _ => return Err(UsiMoveError::InvalidSquare(format!("{file}{rank}"))),
        };
        let rank_idx = match rank {
            'a'..='i' => rank as u8 - b'a',
            _ => return Err(UsiMoveError::InvalidSquare(format!("{file}{rank}"))),
        };
        Ok(Square::new(file_idx, rank_idx))
    }
}

/// USI表記（例: "5e"）で表示
///
/// - 内部 file 0 → '9'、file 8 → '1'
/// - 内部 rank 0 → 'a'、rank 8 → 'i'
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = b'9' - self.file();
        let rank = b'a' + self.rank();
        write!(f, "{}{}", file as char, rank as char)
    }
}

impl std::str::FromStr for Square {
    type Err = UsiMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => Self::from_usi_chars(f, r),
            _ => Err(UsiMoveError::InvalidSquare(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_coordinates() {
        let sq: Square = "5e".parse().unwrap();
        assert_eq!(sq.file(), 4);
        assert_eq!(sq.rank(), 4);
        assert_eq!(sq.index(), 40);

        // 9a は左上隅、1i は右下隅
        assert_eq!("9a".parse::<Square>().unwrap().index(), 0);
        assert_eq!("1i".parse::<Square>().unwrap().index(), 80);
        assert_eq!(Square::new(4, 7).to_string(), "5h");
    }

    #[test]
    fn test_square_parse_errors() {
        assert!("0a".parse::<Square>().is_err());
        assert!("5j".parse::<Square>().is_err());
        assert!("5".parse::<Square>().is_err());
        assert!("5ee".parse::<Square>().is_err());
    }

    #[test]
    fn test_square_offset() {
        let sq = Square::new(0, 0);
        assert_eq!(sq.offset(-1, 0), None);
        assert_eq!(sq.offset(0, -1), None);
        assert_eq!(sq.offset(1, 1), Some(Square::new(1, 1)));
        assert_eq!(Square::new(8, 8).offset(1, 0), None);
    }

    #[test]
    fn test_relative_rank() {
        let sq = Square::new(4, 1);
        assert_eq!(sq.relative_rank(Color::Black), 1);
        assert_eq!(sq.relative_rank(Color::White), 7);
    }

    #[test]
    fn test_all_squares() {
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), Square::NUM);
        assert_eq!(all[67], Square::new(4, 7));
        assert_eq!(Square::from_index(81), None);
    }
}
