pub mod country;
pub mod hotel;
pub mod user;

pub use country::*;
pub use hotel::*;
pub use user::*;
