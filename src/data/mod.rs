pub mod connectors;
pub mod dataset;

pub use connectors::CsvConnector;
pub use dataset::Dataset;
