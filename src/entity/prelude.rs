pub use super::country::Entity as CountryEntity;
pub use super::hotel::Entity as HotelEntity;
pub use super::user::Entity as UserEntity;
