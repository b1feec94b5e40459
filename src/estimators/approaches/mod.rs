pub mod binned_mi;
pub mod common_nd;
pub mod discrete;
pub mod mic;

// Unified re-exports so callers can import estimators from
// infoflow::estimators::approaches::* ergonomically.
pub use binned_mi::BinnedMutualInformation;
pub use discrete::mle::DiscreteEntropy;
pub use discrete::{DiscreteConditionalMutualInformation, DiscreteTransferEntropy};
pub use mic::MicEstimator;
