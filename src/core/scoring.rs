//! Score arithmetic for resolved chains.

/// Points for clearing `count` elements at once: count * (count - 1).
pub fn match_score(count: usize) -> u32 {
    let n = count as u32;
    n.saturating_mul(n.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_chain_scores_six() {
        assert_eq!(match_score(3), 6);
    }

    #[test]
    fn test_score_grows_quadratically() {
        assert_eq!(match_score(4), 12);
        assert_eq!(match_score(5), 20);
        assert_eq!(match_score(7), 42);
    }

    #[test]
    fn test_degenerate_counts_score_zero() {
        assert_eq!(match_score(0), 0);
        assert_eq!(match_score(1), 0);
    }

    #[test]
    fn test_full_board_clear() {
        // 8x8 board: 64 * 63.
        assert_eq!(match_score(64), 4032);
    }
}
