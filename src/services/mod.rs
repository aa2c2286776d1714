pub mod stats_aggregator;
