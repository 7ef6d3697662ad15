use criterion::{
    criterion_group,
    criterion_main,
    BatchSize,
    Bencher,
    BenchmarkId,
    Criterion,
    Throughput,
};
use rand::prelude::*;
use verseg::{aggregator::count::CountAggregator, *};

const NUM_ELEMENTS: usize = 10000;

pub fn insert_benchmark(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("latency");
        for domain in [1 << 10, 1 << 16, 1 << 20].iter() {
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("insert-chain-domain-{}", domain)),
                domain,
                |b, &domain| insert_chain(domain, b),
            );
        }
        group.bench_function("insert-random-parent", insert_random_parent);
    }

    let mut group = c.benchmark_group("throughput");
    group.throughput(Throughput::Elements(NUM_ELEMENTS as u64));
    for domain in [1 << 10, 1 << 16, 1 << 20].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("build-and-insert-{}", domain)),
            domain,
            |b, &domain| build_and_insert(domain, b),
        );
    }
    group.finish();
}

fn insert_chain(domain: usize, bencher: &mut Bencher) {
    let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(Domain::new(domain).unwrap());
    let mut version = tree.first();
    let mut rng = rand::thread_rng();
    bencher.iter(|| {
        version = tree.insert(version, rng.gen_range(1..=domain), 1).unwrap();
    });

    #[cfg(feature = "profiler")]
    println!("{:?}", tree.stats());
}

fn insert_random_parent(bencher: &mut Bencher) {
    let domain = 1 << 16;
    let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(Domain::new(domain).unwrap());
    let mut rng = rand::thread_rng();
    bencher.iter(|| {
        let parent = VersionId::new(rng.gen_range(0..tree.version_count() as u32));
        tree.insert(parent, rng.gen_range(1..=domain), 1).unwrap()
    });
}

fn build_and_insert(domain: usize, bencher: &mut Bencher) {
    let mut rng = rand::thread_rng();
    let values: Vec<usize> = (0..NUM_ELEMENTS).map(|_| rng.gen_range(1..=domain)).collect();
    let options = Options::for_workload(Domain::new(domain).unwrap(), NUM_ELEMENTS, false);
    bencher.iter_batched(
        || PersistentTree::<CountAggregator>::with_options(Domain::new(domain).unwrap(), options),
        |mut tree| {
            let mut version = tree.first();
            for &value in &values {
                version = tree.insert(version, value, 1).unwrap();
            }
            tree
        },
        BatchSize::PerIteration,
    );
}

criterion_group!(benches, insert_benchmark);
criterion_main!(benches);
