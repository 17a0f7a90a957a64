//! Layout-only border alignment.
//!
//! When neither strokes nor shadings pin a border down, borders of one
//! orientation are aligned onto as few shared coordinates as possible:
//!
//! - collect the range bounds of all borders as sorted breakpoints
//! - every two adjacent breakpoints give a candidate at their midpoint
//! - each candidate records which borders it falls within (its coverage)
//! - candidates are tried from widest coverage to narrowest, keeping
//!   breakpoint order among equals
//! - a candidate is accepted only if it crosses no border already crossed
//!   by an accepted candidate
//! - stop once every border is crossed
//!
//! This is a greedy set cover, deterministic but not always optimal.

use gridline_table_models::BorderRange;

/// A candidate coordinate and the borders it is valid for.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub position: f64,
    /// `coverage[i]` is set iff `position` is valid for border `i`.
    pub coverage: Vec<bool>,
}

impl Candidate {
    /// Number of borders this candidate is valid for.
    #[must_use]
    pub fn count(&self) -> usize {
        self.coverage.iter().filter(|&&covered| covered).count()
    }

    /// Dot product of the coverage with per-border crossing counts.
    #[must_use]
    pub fn overlap(&self, counts: &[usize]) -> usize {
        self.coverage
            .iter()
            .zip(counts)
            .filter(|&(&covered, _)| covered)
            .map(|(_, &count)| count)
            .sum()
    }

    /// Indices of the borders this candidate is valid for.
    pub fn covered(&self) -> impl Iterator<Item = usize> + '_ {
        self.coverage
            .iter()
            .enumerate()
            .filter_map(|(i, &covered)| covered.then_some(i))
    }
}

/// Distinct range bounds of all `ranges`, ascending.
#[must_use]
pub fn breakpoints(ranges: &[BorderRange]) -> Vec<f64> {
    let mut points: Vec<f64> = ranges.iter().flat_map(|r| [r.low, r.high]).collect();
    points.sort_by(f64::total_cmp);
    points.dedup();
    points
}

/// Candidates at the midpoint of each pair of adjacent breakpoints, in
/// breakpoint order.
#[must_use]
pub fn candidates(ranges: &[BorderRange], margin: f64) -> Vec<Candidate> {
    breakpoints(ranges)
        .windows(2)
        .map(|pair| {
            let position = (pair[0] + pair[1]) / 2.0;
            let coverage = ranges
                .iter()
                .map(|range| range.contains(position, margin))
                .collect();
            Candidate { position, coverage }
        })
        .collect()
}

/// Greedily picks candidates for `num_borders` borders.
///
/// Returned candidates never cover the same border twice. Borders covered
/// by none of them are left for the caller to treat as provisional.
#[must_use]
pub fn select(mut candidates: Vec<Candidate>, num_borders: usize) -> Vec<Candidate> {
    // Stable, so equal counts keep breakpoint order.
    candidates.sort_by(|a, b| b.count().cmp(&a.count()));

    let mut counts = vec![0_usize; num_borders];
    let mut accepted = Vec::new();

    for candidate in candidates {
        if counts.iter().sum::<usize>() == num_borders {
            break;
        }

        let duplicated = candidate.overlap(&counts);
        if duplicated > 0 {
            log::trace!(
                "Skipping layout candidate {} crossing {duplicated} claimed border(s)",
                candidate.position
            );
            continue;
        }

        if candidate.count() == 0 {
            continue;
        }

        for (count, &covered) in counts.iter_mut().zip(&candidate.coverage) {
            *count += usize::from(covered);
        }
        accepted.push(candidate);
    }

    accepted
}

/// Runs [`candidates`] and [`select`] over `ranges`.
#[must_use]
pub fn align(ranges: &[BorderRange], margin: f64) -> Vec<Candidate> {
    select(candidates(ranges, margin), ranges.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(bounds: &[(f64, f64)]) -> Vec<BorderRange> {
        bounds
            .iter()
            .map(|&(low, high)| BorderRange::new(low, high))
            .collect()
    }

    #[test]
    fn breakpoints_are_sorted_and_distinct() {
        let r = ranges(&[(90.0, 200.0), (0.0, 100.0), (190.0, 300.0), (0.0, 100.0)]);
        assert_eq!(
            breakpoints(&r),
            vec![0.0, 90.0, 100.0, 190.0, 200.0, 300.0]
        );
    }

    #[test]
    fn candidates_record_coverage() {
        let r = ranges(&[(0.0, 100.0), (90.0, 200.0), (190.0, 300.0)]);
        let c = candidates(&r, 1.0);
        let positions: Vec<f64> = c.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![45.0, 95.0, 145.0, 195.0, 250.0]);
        assert_eq!(c[1].coverage, vec![true, true, false]);
        assert_eq!(c[3].coverage, vec![false, true, true]);
        assert_eq!(c[4].coverage, vec![false, false, true]);
    }

    #[test]
    fn aligns_overlapping_borders_onto_shared_position() {
        let r = ranges(&[(0.0, 100.0), (90.0, 200.0), (190.0, 300.0)]);
        let accepted = align(&r, 1.0);

        let positions: Vec<f64> = accepted.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![95.0, 250.0]);
        assert_eq!(accepted[0].covered().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(accepted[1].covered().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn ties_keep_breakpoint_order() {
        // 5.0 and 15.0 each cover one border; the earlier one wins border 0.
        let r = ranges(&[(0.0, 10.0), (10.0, 20.0)]);
        let accepted = align(&r, 0.0);
        let positions: Vec<f64> = accepted.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![5.0, 15.0]);
    }

    #[test]
    fn no_border_is_crossed_twice() {
        let r = ranges(&[
            (0.0, 50.0),
            (20.0, 80.0),
            (40.0, 120.0),
            (60.0, 61.0),
            (100.0, 140.0),
            (130.0, 200.0),
        ]);
        let accepted = align(&r, 1.0);

        let mut crossings = vec![0; r.len()];
        for candidate in &accepted {
            for i in candidate.covered() {
                crossings[i] += 1;
            }
        }
        assert!(crossings.iter().all(|&n| n <= 1), "{crossings:?}");
        for candidate in &accepted {
            for i in candidate.covered() {
                assert!(r[i].contains(candidate.position, 1.0));
            }
        }
    }

    #[test]
    fn stops_once_every_border_is_covered() {
        let r = ranges(&[(0.0, 10.0), (0.0, 10.0)]);
        let accepted = align(&r, 0.0);
        assert_eq!(accepted.len(), 1);
        assert!((accepted[0].position - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_inputs_select_nothing() {
        assert!(align(&[], 1.0).is_empty());
        assert!(align(&ranges(&[(42.0, 42.0)]), 1.0).is_empty());
    }

    #[test]
    fn single_border_takes_its_midpoint() {
        let accepted = align(&ranges(&[(10.0, 30.0)]), 1.0);
        assert_eq!(accepted.len(), 1);
        assert!((accepted[0].position - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn gaps_between_ranges_are_ignored() {
        let r = ranges(&[(0.0, 10.0), (20.0, 30.0)]);
        let accepted = align(&r, 0.0);
        let positions: Vec<f64> = accepted.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![5.0, 25.0]);
    }
}
