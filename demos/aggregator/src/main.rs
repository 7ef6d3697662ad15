use verseg::{
    aggregator::{Aggregator, PartialAggregateType},
    Domain,
    PersistentTree,
};

/// Our user-defined Aggregator capturing the AVG wind speed and temperature of sensor devices.
#[derive(Clone, Debug, Default)]
pub struct CustomAggregator;

/// Raw input data from a sensor
#[derive(Clone, Debug, Copy)]
pub struct RawData {
    wind_speed: f64,
    temperature: f64,
}

/// Partial Aggregate used (sum + count) in order to calculate AVG
#[derive(Clone, PartialEq, Debug, Default, Copy, serde::Serialize, serde::Deserialize)]
pub struct PartialAvg {
    count: f64,
    sum: f64,
}
impl PartialAvg {
    const fn new(sum: f64, count: f64) -> Self {
        Self { count, sum }
    }
    fn merge(self, other: Self) -> Self {
        Self::new(self.sum + other.sum, self.count + other.count)
    }
    fn avg(&self) -> f64 {
        self.sum / self.count
    }
}

/// Partial Aggregate State for 2 attributes (Wind speed + Temperature)
#[derive(Clone, PartialEq, Default, Debug, Copy, serde::Serialize, serde::Deserialize)]
pub struct PartialAggregate {
    wind_speed: PartialAvg,
    temperature: PartialAvg,
}

impl PartialAggregate {
    pub fn new(raw: RawData) -> Self {
        Self {
            wind_speed: PartialAvg::new(raw.wind_speed, 1.0),
            temperature: PartialAvg::new(raw.temperature, 1.0),
        }
    }
    pub const fn identity() -> Self {
        Self {
            wind_speed: PartialAvg::new(0.0, 0.0),
            temperature: PartialAvg::new(0.0, 0.0),
        }
    }
}

// Need to implement PartialAggregateType for our custom struct
impl PartialAggregateType for PartialAggregate {}

/// Lowered Aggregate State
#[derive(Debug, Copy, Clone)]
pub struct Aggregate {
    pub avg_wind_speed: f64,
    pub avg_temperature: f64,
}

impl Aggregator for CustomAggregator {
    const IDENTITY: Self::PartialAggregate = PartialAggregate::identity();

    type Input = RawData;
    type PartialAggregate = PartialAggregate;
    type Aggregate = Aggregate;

    fn lift(input: Self::Input) -> Self::PartialAggregate {
        PartialAggregate::new(input)
    }

    // combine two partial aggregates
    fn combine(a: Self::PartialAggregate, b: Self::PartialAggregate) -> Self::PartialAggregate {
        PartialAggregate {
            wind_speed: a.wind_speed.merge(b.wind_speed),
            temperature: a.temperature.merge(b.temperature),
        }
    }
    // lower partial agg to a final aggregate result
    fn lower(a: Self::PartialAggregate) -> Self::Aggregate {
        Aggregate {
            avg_wind_speed: a.wind_speed.avg(),
            avg_temperature: a.temperature.avg(),
        }
    }
}

fn main() {
    // one domain position per sensor id
    let domain = Domain::new(4).unwrap();
    let mut tree: PersistentTree<CustomAggregator> = PersistentTree::new(domain);

    // Insert some readings, every reading producing a new version
    let v1 = tree
        .insert(
            tree.first(),
            1,
            RawData {
                wind_speed: 50.0,
                temperature: 100.0,
            },
        )
        .unwrap();
    let v2 = tree
        .insert(
            v1,
            2,
            RawData {
                wind_speed: 30.0,
                temperature: 55.0,
            },
        )
        .unwrap();
    let v3 = tree
        .insert(
            v2,
            2,
            RawData {
                wind_speed: 29.0,
                temperature: 65.0,
            },
        )
        .unwrap();

    // verify the partial aggregates and also lowered aggregate type
    let partial = tree.range_aggregate(v3, 1, 4).unwrap();
    dbg!(partial);

    assert_eq!(
        partial,
        PartialAggregate {
            wind_speed: PartialAvg {
                count: 3.0,
                sum: 109.0
            },
            temperature: PartialAvg {
                count: 3.0,
                sum: 220.0
            }
        }
    );

    // sensor 2 as of version 2 only holds its first reading
    let sensor_2 = tree.range_aggregate_and_lower(v2, 2, 2).unwrap();
    assert_eq!(sensor_2.avg_temperature, 55.0);

    let all = tree.range_aggregate_and_lower(v3, 1, 4).unwrap();
    dbg!(all);
}
