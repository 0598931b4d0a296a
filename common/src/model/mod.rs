pub mod barcode;
pub mod error;
pub mod product;
