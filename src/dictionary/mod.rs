pub mod merge;
pub mod store;
pub mod value;

pub use merge::{DictionaryMerger, MergeOutcome, MergeStatus, SkipReason};
pub use store::DictionaryStore;
pub use value::{Dictionary, Value};
