mod feature_set;
mod pos;
mod token;

pub use feature_set::{FeatureSet, ParseFeaturesError};
pub(crate) use feature_set::title_case;
pub use pos::{ParsePosError, Pos};
pub use token::Token;
