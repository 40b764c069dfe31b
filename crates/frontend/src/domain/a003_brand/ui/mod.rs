pub mod list;

pub use list::BrandList;
