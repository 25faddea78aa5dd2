pub mod partition;
pub mod gaussian;

// Unified re-exports for the estimators so tests and users can import
// infopartition::estimators::approaches::* ergonomically.
pub use gaussian::GaussianMutualInformation;
pub use partition::{NonAdaptivePartition, PartitionMutualInformation};
