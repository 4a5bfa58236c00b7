pub mod color;
pub mod filename;
pub mod jwt;
pub mod links;
