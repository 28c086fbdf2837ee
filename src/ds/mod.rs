pub mod freq_chain;

pub use freq_chain::{BucketView, Buckets, FreqChain};
