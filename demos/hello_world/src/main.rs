use verseg::{aggregator::count::CountAggregator, Domain, PersistentTree, VersionId};

fn main() {
    // Values of an array that has already been mapped onto the ranks [1, 8]
    let array = [5, 1, 4, 2, 8, 1, 7, 3];

    // Create a tree over the domain [1, 8] that counts occurrences per value
    let domain = Domain::new(8).unwrap();
    let mut tree: PersistentTree<CountAggregator> = PersistentTree::new(domain);

    // Insert the array one position at a time. Version i holds the first i values
    let mut versions: Vec<VersionId> = vec![tree.first()];
    for value in array {
        let parent = *versions.last().unwrap();
        versions.push(tree.insert(parent, value, 1).unwrap());
    }
    println!("{:?}", tree);

    // 2nd smallest value among array positions [2, 5] = {1, 4, 2, 8}
    assert_eq!(tree.kth(versions[1], versions[5], 2), Ok(2));

    // Distinct values among array positions [5, 8] = {8, 1, 7, 3}
    assert_eq!(tree.frequency_bounded_count(versions[4], versions[8], 0), Ok(4));

    // How many values among array positions [1, 6] fall within [1, 4]
    assert_eq!(tree.range_difference(versions[0], versions[6], 1, 4), Ok(4));

    // Older versions are left untouched by later inserts
    assert_eq!(tree.range_aggregate(versions[2], 1, 8), Ok(2));
    assert_eq!(tree.range_aggregate(versions[8], 1, 8), Ok(8));

    // Branch off an old version: version 2 with an extra 6
    let branch = tree.insert(versions[2], 6, 1).unwrap();
    assert_eq!(tree.kth(versions[0], branch, 3), Ok(6));
    println!("branched {} from {}", branch, versions[2]);
}
