pub mod approaches;
pub mod mutual_information;
pub mod traits;
pub mod transfer_entropy;
pub mod utils;

pub use traits::{DependenceScore, GlobalValue, LocalValues, OptionalLocalValues};
