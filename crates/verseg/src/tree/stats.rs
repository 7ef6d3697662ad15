use super::PersistentTree;
use crate::aggregator::Aggregator;
use core::fmt;
use verseg_stats::Sketch;

/// Latency stats for a [crate::PersistentTree]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Default)]
pub struct Stats {
    /// A sketch for recording latencies of building version 0
    pub build: Sketch,
    /// A sketch for recording latencies of inserts
    pub insert: Sketch,
    /// A sketch for recording latencies of range aggregations
    pub range_aggregate: Sketch,
    /// A sketch for recording latencies of k-th smallest queries
    pub kth: Sketch,
    /// A sketch for recording latencies of frequency bounded counts
    pub frequency_bounded_count: Sketch,
}

impl fmt::Debug for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PersistentTree Stats")
            .field("build", &self.build.percentiles())
            .field("insert", &self.insert.percentiles())
            .field("range_aggregate", &self.range_aggregate.percentiles())
            .field("kth", &self.kth.percentiles())
            .field(
                "frequency_bounded_count",
                &self.frequency_bounded_count.percentiles(),
            )
            .finish()
    }
}

impl<A: Aggregator> PersistentTree<A> {
    /// Prints the latency stats of the tree as a table
    pub fn print_stats(&self) {
        use prettytable::{row, Table};
        let mut table = Table::new();
        table.add_row(row![
            "name", "count", "min", "p50", "p99", "p99.9", "p99.99", "p99.999", "max",
        ]);
        let percentile_fmt = |p: f64| -> String { format!("{:.2}ns", p) };

        let add_row = |id: &str, table: &mut Table, sketch: &Sketch| {
            let percentiles = sketch.percentiles();
            table.add_row(row![
                id,
                percentiles.count,
                percentile_fmt(percentiles.min),
                percentile_fmt(percentiles.p50),
                percentile_fmt(percentiles.p99),
                percentile_fmt(percentiles.p99_9),
                percentile_fmt(percentiles.p99_99),
                percentile_fmt(percentiles.p99_999),
                percentile_fmt(percentiles.max),
            ]);
        };

        add_row("build", &mut table, &self.stats.build);
        add_row("insert", &mut table, &self.stats.insert);
        add_row("range_aggregate", &mut table, &self.stats.range_aggregate);
        add_row("kth", &mut table, &self.stats.kth);
        add_row(
            "frequency_bounded_count",
            &mut table,
            &self.stats.frequency_bounded_count,
        );

        log::info!(
            "{} nodes over {} versions ({} bytes)",
            self.node_count(),
            self.version_count(),
            self.size_bytes()
        );
        table.printstd();
    }
}
