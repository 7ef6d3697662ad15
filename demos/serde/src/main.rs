use postcard::to_allocvec;
use std::time::Instant;
use verseg::{aggregator::count::CountAggregator, Domain, PersistentTree};

fn main() {
    let domain = Domain::new(1 << 16).unwrap();
    let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(domain);
    println!("====EMPTY TREE====");
    serialize_tree(&tree);

    // Insert 100k pseudo-random values, one version each
    let mut version = tree.first();
    let mut value: usize = 1;
    for _ in 0..100_000 {
        value = (value * 7919 + 13) % domain.size() + 1;
        version = tree.insert(version, value, 1).unwrap();
    }
    println!("====100K VERSIONS====");
    serialize_tree(&tree);

    #[cfg(feature = "profiler")]
    tree.print_stats();
}

fn serialize_tree(tree: &PersistentTree<CountAggregator>) {
    let now = Instant::now();
    let bytes = to_allocvec(tree).unwrap();
    println!(
        "Serialised tree ({} nodes) size {} bytes in {:?}",
        tree.node_count(),
        bytes.len(),
        now.elapsed()
    );
    let now = Instant::now();
    let out: PersistentTree<CountAggregator> = postcard::from_bytes(&bytes).unwrap();
    println!("Deserialized tree in {:?}", now.elapsed());
    assert_eq!(
        out.range_aggregate(out.latest(), 1, out.domain().size()),
        tree.range_aggregate(tree.latest(), 1, tree.domain().size())
    );
}
