pub mod extract;
pub mod memory;
pub mod normalize;
pub mod payload;
pub mod sanitize;
