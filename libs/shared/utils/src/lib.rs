pub mod clock;
pub mod extractor;
pub mod jwt;
pub mod store;
pub mod test_utils;
