use verseg::{aggregator::sum::U64SumAggregator, Domain, SharedTree};

fn main() {
    let tree: SharedTree<U64SumAggregator> = SharedTree::new(Domain::new(1024).unwrap());
    let v1 = tree.insert(tree.first(), 10, 999).unwrap();

    // share the tree across threads
    let reader = tree.clone();

    let handle = std::thread::spawn(move || {
        println!(
            "Read result from another thread {:#?}",
            reader.range_aggregate(v1, 1, 1024)
        );
    });

    // versions created concurrently never affect v1
    let v2 = tree.insert(v1, 10, 1).unwrap();
    handle.join().expect("Failed to join the thread.");

    assert_eq!(tree.range_aggregate(v1, 1, 1024), Ok(999));
    assert_eq!(tree.range_aggregate(v2, 1, 1024), Ok(1000));
}
