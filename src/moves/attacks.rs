//! Attack bitboards for every piece kind.
//!
//! Leapers (king, knight, pawn) use const tables built at compile time.
//! Sliders trace rays against an occupancy mask and stop on the first
//! occupied square, which is included in the result. `between` and
//! `square_distance` support the sliding-move revision in the game engine.

use crate::game_state::chess_types::{Color, PieceKind, Square};

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const KNIGHT_STEPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_STEPS);
pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_STEPS);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, 1), (1, 1)]);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, -1), (1, -1)]);

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ROOK_DIRECTIONS
        .iter()
        .fold(0, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

/// Squares attacked by `kind` of `color` standing on `square`.
pub fn piece_attacks(kind: PieceKind, color: Color, square: Square, occupancy: u64) -> u64 {
    match kind {
        PieceKind::Pawn => pawn_attacks(color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}

/// Squares strictly between `a` and `b` when they share a rank, file or
/// diagonal; empty otherwise.
pub fn between(a: Square, b: Square) -> u64 {
    let (af, ar) = ((a % 8) as i32, (a / 8) as i32);
    let (bf, br) = ((b % 8) as i32, (b / 8) as i32);
    let (df, dr) = (bf - af, br - ar);

    let aligned = (df == 0) != (dr == 0) || (df != 0 && df.abs() == dr.abs());
    if !aligned {
        return 0;
    }

    let (step_f, step_r) = (df.signum(), dr.signum());
    let mut out = 0u64;
    let (mut f, mut r) = (af + step_f, ar + step_r);
    while (f, r) != (bf, br) {
        out |= 1u64 << (r * 8 + f);
        f += step_f;
        r += step_r;
    }
    out
}

/// Chebyshev (king-step) distance between two squares.
#[inline]
pub fn square_distance(a: Square, b: Square) -> u8 {
    let file_gap = (a % 8).abs_diff(b % 8);
    let rank_gap = (a / 8).abs_diff(b / 8);
    file_gap.max(rank_gap)
}

/// Iterate the set squares of a bitboard from a1 upwards.
pub fn squares_of(mut bitboard: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bitboard == 0 {
            return None;
        }
        let sq = bitboard.trailing_zeros() as Square;
        bitboard &= bitboard - 1;
        Some(sq)
    })
}

fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = (square % 8) as i32 + file_step;
    let mut rank = (square / 8) as i32 + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn leaper_table(steps: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;
        while i < steps.len() {
            let f = file + steps[i].0;
            let r = rank + steps[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                attacks |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaper_tables_respect_board_edges() {
        assert_eq!(king_attacks(0).count_ones(), 3);
        assert_eq!(knight_attacks(27).count_ones(), 8);
        assert_eq!(knight_attacks(0).count_ones(), 2);
        assert_eq!(pawn_attacks(Color::White, 12), (1u64 << 19) | (1u64 << 21));
        assert_eq!(pawn_attacks(Color::Black, 52), (1u64 << 43) | (1u64 << 45));
        assert_eq!(pawn_attacks(Color::White, 56), 0);
    }

    #[test]
    fn slider_rays_stop_on_blockers() {
        assert_eq!(rook_attacks(27, 0).count_ones(), 14);
        assert_eq!(bishop_attacks(27, 0).count_ones(), 13);
        assert_eq!(queen_attacks(27, 0).count_ones(), 27);

        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(0, blocker_on_a4);
        assert_ne!(attacks & blocker_on_a4, 0);
        assert_eq!(attacks & (1u64 << 32), 0);
    }

    #[test]
    fn between_only_for_aligned_squares() {
        // a1..h1
        assert_eq!(squares_of(between(0, 7)).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        // c1..f4 diagonal
        assert_eq!(between(2, 29), (1u64 << 11) | (1u64 << 20));
        // knight hop is not a line
        assert_eq!(between(1, 18), 0);
        // adjacent squares have nothing between
        assert_eq!(between(12, 20), 0);
    }

    #[test]
    fn distance_is_king_steps() {
        assert_eq!(square_distance(0, 63), 7);
        assert_eq!(square_distance(12, 28), 2);
        assert_eq!(square_distance(12, 21), 1);
    }
}
