pub mod mutual_information;
pub mod traits;
pub mod approaches;

pub use traits::{GlobalValue, LocalValues, OptionalLocalValues, MutualInformationEstimator};
