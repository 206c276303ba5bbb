pub mod aggregate;
pub mod date;
pub mod product;
pub mod resolve;

pub use aggregate::{Aggregate, ProductTotal, aggregate};
pub use date::{DateExtractor, FuzzyDateExtractor};
pub use product::match_product;
pub use resolve::{Resolution, ResolvedPredicate, ViewState, resolve_query, resolve_query_with};
