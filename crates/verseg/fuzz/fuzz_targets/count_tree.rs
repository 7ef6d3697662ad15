#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use verseg::{aggregator::count::CountAggregator, *};

const DOMAIN: usize = 32;

#[derive(Debug, Arbitrary)]
enum Op {
    Insert { parent: u8, pos: u8, delta: i8 },
    Range { version: u8, l: u8, r: u8 },
    Kth { low: u8, high: u8, k: u8 },
    Frequency { low: u8, high: u8, threshold: i8 },
}

fuzz_target!(|ops: Vec<Op>| {
    let domain = Domain::new(DOMAIN).unwrap();
    let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(domain);
    let mut model: Vec<Vec<i64>> = vec![vec![0; DOMAIN]];

    for op in ops {
        match op {
            Op::Insert { parent, pos, delta } => {
                let parent = parent as usize % model.len();
                let pos = pos as usize % (DOMAIN + 1);
                let result = tree.insert(VersionId::new(parent as u32), pos, delta as i64);
                if pos == 0 {
                    assert!(matches!(result, Err(Error::PositionOutOfDomain { .. })));
                    continue;
                }
                let mut next = model[parent].clone();
                next[pos - 1] += delta as i64;
                if next[pos - 1] < 0 {
                    assert_eq!(result, Err(Error::Underflow { pos }));
                } else {
                    assert_eq!(result.map(|v| v.get() as usize), Ok(model.len()));
                    model.push(next);
                }
            }
            Op::Range { version, l, r } => {
                let version = version as usize % model.len();
                let (l, r) = (l as usize % DOMAIN + 1, r as usize % DOMAIN + 1);
                let result = tree.range_aggregate(VersionId::new(version as u32), l, r);
                if l > r {
                    assert!(result.is_err());
                } else {
                    assert_eq!(result, Ok(model[version][l - 1..r].iter().sum()));
                }
            }
            Op::Kth { low, high, k } => {
                let (low, high) = (low as usize % model.len(), high as usize % model.len());
                let diff: Vec<i64> = (0..DOMAIN).map(|i| model[high][i] - model[low][i]).collect();
                // only meaningful when every position grew
                if diff.iter().any(|&d| d < 0) {
                    continue;
                }
                let total: i64 = diff.iter().sum();
                let k = k as u64;
                let result = tree.kth(VersionId::new(low as u32), VersionId::new(high as u32), k);
                if k == 0 || k as i64 > total {
                    assert!(matches!(result, Err(Error::RankOutOfRange { .. })));
                } else {
                    let mut seen = 0;
                    let expected = diff
                        .iter()
                        .position(|&d| {
                            seen += d;
                            seen >= k as i64
                        })
                        .map(|idx| idx + 1);
                    assert_eq!(result.ok(), expected);
                }
            }
            Op::Frequency { low, high, threshold } => {
                let (low, high) = (low as usize % model.len(), high as usize % model.len());
                let threshold = threshold as i64;
                let diff: Vec<i64> = (0..DOMAIN).map(|i| model[high][i] - model[low][i]).collect();
                let expected = diff.iter().filter(|&&d| d > threshold).count() as u64;
                let result =
                    tree.frequency_bounded_count(VersionId::new(low as u32), VersionId::new(high as u32), threshold);
                assert_eq!(result, Ok(expected));
            }
        }
    }
});
