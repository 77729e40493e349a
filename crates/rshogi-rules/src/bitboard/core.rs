//! Bitboard本体

use crate::types::Square;

/// 81マスの集合（下位81bitを使用）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u128);

impl Bitboard {
    /// 空
    pub const EMPTY: Self = Bitboard(0);

    /// 全升
    pub const ALL: Self = Bitboard((1u128 << Square::NUM) - 1);

    /// 1升だけ立てる
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1u128 << sq.index())
    }

    /// 升を立てる
    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u128 << sq.index();
    }

    /// 升を落とす
    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u128 << sq.index());
    }

    /// 升が立っているか
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 >> sq.index()) & 1 != 0
    }

    /// 最下位の升を取り出して落とす
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// 最下位の升
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        Square::from_index(self.0.trailing_zeros() as usize)
    }

    /// 立っている升の数
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// 空かどうか
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 立っている升を昇順に列挙
    #[inline]
    pub fn iter(self) -> BitboardIter {
        BitboardIter(self)
    }

    /// 内部値
    #[inline]
    pub const fn raw(self) -> u128 {
        self.0
    }
}

/// `Bitboard` の升イテレータ
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.0.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> BitboardIter {
        self.iter()
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

/// 筋のマスク（`file` は内部座標、0 = 9筋）
pub const fn file_bb(file: u8) -> Bitboard {
    let mut bits = 0u128;
    let mut rank = 0;
    while rank < 9 {
        bits |= 1u128 << (rank * 9 + file as usize);
        rank += 1;
    }
    Bitboard(bits)
}

/// 段のマスク（0 = a段）
pub const fn rank_bb(rank: u8) -> Bitboard {
    Bitboard(0x1FFu128 << (rank as usize * 9))
}

impl std::ops::BitOr for Bitboard {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for Bitboard {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl std::ops::Not for Bitboard {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Bitboard(!self.0 & Self::ALL.0)
    }
}

impl std::ops::BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitboard_operations() {
        let mut bb = Bitboard::EMPTY;
        assert!(bb.is_empty());

        let sq: Square = "5e".parse().unwrap();
        bb.set(sq);
        assert!(bb.contains(sq));
        assert_eq!(bb.count(), 1);

        bb.clear(sq);
        assert!(!bb.contains(sq));
        assert!(bb.is_empty());
    }

    #[test]
    fn test_bitboard_iter_order() {
        let squares: Vec<Square> = ["1i", "9a", "5e"].iter().map(|s| s.parse().unwrap()).collect();
        let bb: Bitboard = squares.iter().copied().collect();
        let listed: Vec<String> = bb.iter().map(|sq| sq.to_string()).collect();
        assert_eq!(listed, vec!["9a", "5e", "1i"]);
    }

    #[test]
    fn test_not_stays_on_board() {
        assert_eq!((!Bitboard::EMPTY).count(), 81);
        assert!((!Bitboard::ALL).is_empty());
    }

    #[test]
    fn test_file_and_rank_masks() {
        for file in 0..9 {
            let mask = file_bb(file);
            assert_eq!(mask.count(), 9);
            for sq in mask.iter() {
                assert_eq!(sq.file(), file);
            }
        }
        for rank in 0..9 {
            let mask = rank_bb(rank);
            assert_eq!(mask.count(), 9);
            assert!(mask.iter().all(|sq| sq.rank() == rank));
        }
    }
}
