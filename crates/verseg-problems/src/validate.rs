use crate::{
    brute,
    problems::{DistinctCount, FrequentValues, RangeKth, RangeRank},
};
use core::fmt::Debug;
use std::time::{Duration, Instant};
use verseg::Result;

/// A randomized workload
#[derive(Debug, Clone, Copy)]
pub struct Workload {
    /// Length of the generated array
    pub len: usize,
    /// Number of queries per problem
    pub queries: usize,
    /// Seed of the random generator
    pub seed: u64,
}

/// Outcome of validating a single problem
#[derive(Debug, Clone)]
pub struct Report {
    /// Problem name
    pub problem: &'static str,
    /// Number of executed queries
    pub queries: usize,
    /// Number of answers that differ from the reference
    pub mismatches: usize,
    /// Time spent indexing the array and answering all queries
    pub elapsed: Duration,
}

impl Report {
    /// Returns `true` if every answer matched the reference
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }
}

/// Generates an array with plenty of duplicates together with random windows over it
struct Generator {
    rng: fastrand::Rng,
    len: usize,
}

impl Generator {
    fn values(&mut self) -> Vec<i64> {
        let max = (self.len as i64 / 2).max(1);
        (0..self.len).map(|_| self.rng.i64(-max..=max)).collect()
    }

    fn window(&mut self) -> (usize, usize) {
        let l = self.rng.usize(1..=self.len);
        (l, self.rng.usize(l..=self.len))
    }
}

/// Runs the workload through every problem and compares against [brute]
///
/// Fails if an array cannot be indexed, e.g. because the workload length is zero.
pub fn run(workload: &Workload) -> Result<Vec<Report>> {
    let mut generator = Generator {
        rng: fastrand::Rng::with_seed(workload.seed),
        len: workload.len,
    };
    let values = generator.values();
    let mut reports = Vec::with_capacity(4);

    let start = Instant::now();
    let kth = RangeKth::new(&values)?;
    let mut mismatches = 0;
    for _ in 0..workload.queries {
        let (l, r) = generator.window();
        let k = generator.rng.u64(1..=(r - l + 1) as u64);
        let got = kth.query(l, r, k).ok().copied();
        mismatches += check("kth", (l, r, k), brute::kth(&values, l, r, k), got);
    }
    reports.push(report("kth", workload, mismatches, start));

    let start = Instant::now();
    let rank = RangeRank::new(&values)?;
    let mut mismatches = 0;
    for _ in 0..workload.queries {
        let (l, r) = generator.window();
        let max = workload.len as i64;
        let x = generator.rng.i64(-max..=max);
        let got = rank.query(l, r, &x).ok();
        mismatches += check("rank", (l, r, x), Some(brute::rank(&values, l, r, &x)), got);
    }
    reports.push(report("rank", workload, mismatches, start));

    let start = Instant::now();
    let frequent = FrequentValues::new(&values)?;
    let mut mismatches = 0;
    for _ in 0..workload.queries {
        let (l, r) = generator.window();
        let t = generator.rng.u64(0..4);
        let got = frequent.query(l, r, t).ok();
        mismatches += check("frequent", (l, r, t), Some(brute::frequent(&values, l, r, t)), got);
    }
    reports.push(report("frequent", workload, mismatches, start));

    let start = Instant::now();
    let distinct = DistinctCount::new(&values)?;
    let mut mismatches = 0;
    for _ in 0..workload.queries {
        let (l, r) = generator.window();
        let got = distinct.query(l, r).ok();
        mismatches += check("distinct", (l, r), Some(brute::distinct(&values, l, r)), got);
    }
    reports.push(report("distinct", workload, mismatches, start));

    Ok(reports)
}

fn check<Q: Debug, T: PartialEq + Debug>(
    problem: &str,
    query: Q,
    expected: Option<T>,
    got: Option<T>,
) -> usize {
    if expected == got {
        return 0;
    }
    log::warn!(
        "{} mismatch for {:?}: expected {:?}, got {:?}",
        problem,
        query,
        expected,
        got
    );
    1
}

fn report(problem: &'static str, workload: &Workload, mismatches: usize, start: Instant) -> Report {
    Report {
        problem,
        queries: workload.queries,
        mismatches,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drivers_agree_with_references() {
        for (len, seed) in [(1, 7), (2, 1), (50, 3), (300, 11)] {
            let workload = Workload {
                len,
                queries: 200,
                seed,
            };
            let reports = run(&workload).unwrap();
            assert_eq!(reports.len(), 4);
            for report in reports {
                assert!(report.passed(), "{:?} with {:?}", report, workload);
                assert_eq!(report.queries, 200);
            }
        }
    }

    #[test]
    fn empty_workload_is_rejected() {
        let workload = Workload {
            len: 0,
            queries: 1,
            seed: 0,
        };
        assert!(run(&workload).is_err());
    }
}
