pub mod account;
pub mod common;
pub mod country;
pub mod hotel;

pub use account::{login, me, register, AuthResponse, LoginRequest, RegisterRequest};
pub use common::{pagination_headers, validate_id, PaginationParams, X_PAGINATION};
pub use country::{
    create_country, delete_country, get_country, list_countries, update_country, CountryResponse,
    CountrySummary, CreateCountryRequest, UpdateCountryRequest,
};
pub use hotel::{
    create_hotel, delete_hotel, get_hotel, list_hotels, update_hotel, CreateHotelRequest,
    HotelListParams, HotelResponse, HotelSummary, UpdateHotelRequest,
};
