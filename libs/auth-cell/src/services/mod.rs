pub mod session;
pub mod theme;
