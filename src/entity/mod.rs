pub mod country;
pub mod hotel;
pub mod user;

pub mod prelude;

pub use prelude::*;
