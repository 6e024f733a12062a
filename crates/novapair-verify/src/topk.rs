//! Confirmed counts at rank cutoffs.

use serde::{Deserialize, Serialize};

/// Confirmation statistic for the first `cutoff` ranks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutoffStat {
    pub cutoff: usize,
    pub confirmed: usize,
    /// 100 × confirmed / cutoff
    pub percentage: f64,
}

/// Count confirmed flags within each rank cutoff.
///
/// Cutoffs are evaluated in the order given. A cutoff of zero or one larger
/// than the number of flags yields no statistic.
pub fn aggregate(flags: &[bool], cutoffs: &[usize]) -> Vec<CutoffStat> {
    // cumulative[k] = confirmed among the first k ranks
    let mut cumulative = Vec::with_capacity(flags.len() + 1);
    cumulative.push(0usize);
    for &flag in flags {
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + usize::from(flag));
    }

    cutoffs
        .iter()
        .filter(|&&k| k > 0 && k <= flags.len())
        .map(|&k| {
            let confirmed = cumulative[k];
            CutoffStat {
                cutoff: k,
                confirmed,
                percentage: confirmed as f64 * 100.0 / k as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_beyond_length_skipped() {
        let stats = aggregate(&[true, false, true], &[1, 5]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].cutoff, 1);
        assert_eq!(stats[0].confirmed, 1);
        assert!((stats[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cutoff_equal_to_length_valid() {
        let stats = aggregate(&[true, false, true], &[3]);
        assert_eq!(stats[0].confirmed, 2);
        assert!((stats[0].percentage - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cutoff_skipped() {
        assert!(aggregate(&[true], &[0]).is_empty());
        assert!(aggregate(&[], &[0, 1, 10]).is_empty());
    }

    #[test]
    fn test_unsorted_cutoffs_keep_order() {
        let flags = [false, true, true, false, true];
        let stats = aggregate(&flags, &[4, 2, 5]);
        let got: Vec<(usize, usize)> = stats.iter().map(|s| (s.cutoff, s.confirmed)).collect();
        assert_eq!(got, vec![(4, 2), (2, 1), (5, 3)]);
    }

    #[test]
    fn test_counts_match_prefix() {
        let flags: Vec<bool> = (0..50).map(|i| i % 3 == 0 || i % 7 == 0).collect();
        for k in 1..=flags.len() {
            let stats = aggregate(&flags, &[k]);
            let expected = flags[..k].iter().filter(|&&f| f).count();
            assert_eq!(stats[0].confirmed, expected, "cutoff {k}");
        }
    }
}
