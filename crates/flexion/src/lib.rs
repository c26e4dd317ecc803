pub mod compound;
pub mod error;
pub mod inflect;
pub mod inflector;
pub mod resolve;
pub mod rules;
pub mod schema;
pub mod tables;
pub mod types;

pub use error::{InflectError, InflectWarning, LoadError};
pub use inflector::{InflectRequest, Inflector};
pub use schema::Schema;
pub use tables::{LoadReport, Tables};
pub use types::{FeatureSet, ParseFeaturesError, ParsePosError, Pos, Token};

/// Creates a [`FeatureSet`] from category-value pairs.
///
/// # Example
///
/// ```
/// use flexion::features;
///
/// let target = features! { "Case" => "Dat", "Number" => "Plur" };
/// assert_eq!(target.to_string(), "Case=Dat|Number=Plur");
/// ```
#[macro_export]
macro_rules! features {
    {} => {
        $crate::FeatureSet::new()
    };
    { $($category:expr => $value:expr),+ $(,)? } => {
        {
            let mut set = $crate::FeatureSet::new();
            $(
                set.insert($category, $value);
            )+
            set
        }
    };
}

/// Compiles a regex literal once, on first use.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: ::once_cell::sync::Lazy<::regex::Regex> =
            ::once_cell::sync::Lazy::new(|| ::regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
