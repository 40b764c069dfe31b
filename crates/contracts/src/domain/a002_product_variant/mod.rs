pub mod aggregate;

pub use aggregate::{ProductVariant, ProductVariantDto, VariantId};
