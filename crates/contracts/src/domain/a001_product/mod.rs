pub mod aggregate;
pub mod search;

pub use aggregate::{BaseProduct, BaseProductDto, ProductId};
pub use search::{presentation, Product, ProductSearchQuery, ProductSearchResponse, SortOrder};
