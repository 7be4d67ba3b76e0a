pub mod normalize;
pub mod suggest;

pub use normalize::{contains_markup, normalize, NormalizedText};
pub use suggest::{suggest_key, KeySuggester};
