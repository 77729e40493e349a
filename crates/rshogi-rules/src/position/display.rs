//! 局面のテキスト表示

use std::fmt;

use crate::types::{Color, Square};

use super::pos::Position;

/// 9x9の盤（空き升は `.`）、手番、両者の手駒を表示
///
/// ```text
///   9  8  7  6  5  4  3  2  1
///  l  n  s  g  k  g  s  n  l  a
/// ...
/// ```
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  9  8  7  6  5  4  3  2  1")?;
        for rank in 0..9u8 {
            for file in 0..9u8 {
                let pc = self.piece_on(Square::new(file, rank));
                if pc.is_none() {
                    write!(f, "  .")?;
                } else {
                    write!(f, "{:>3}", pc.to_sfen())?;
                }
            }
            writeln!(f, "  {}", (b'a' + rank) as char)?;
        }

        let side = match self.side_to_move {
            Color::Black => "black",
            Color::White => "white",
        };
        writeln!(f, "side to move: {side}, ply: {}", self.game_ply)?;
        for color in Color::ALL {
            write!(f, "{color:?} hand:")?;
            let hand = self.hand(color);
            if hand.is_empty() {
                write!(f, " -")?;
            }
            for (pt, n) in hand.iter() {
                write!(f, " {}{n}", pt.base_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_grid() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/4+P4/4K4 b 2Pg 1").unwrap();
        let text = pos.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "  .  .  .  .  k  .  .  .  .  a");
        assert_eq!(lines[8], "  .  .  .  . +P  .  .  .  .  h");
        assert_eq!(lines[10], "side to move: black, ply: 1");
        assert_eq!(lines[11], "Black hand: P2");
        assert_eq!(lines[12], "White hand: G1");
    }
}
