use serde::{Deserialize, Serialize};

use crate::models::Country;

/// A hotel, owned by exactly one country through `country_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i32,
    /// Populated only when `HotelInclude::Country` was requested.
    pub country: Option<Box<Country>>,
}

impl Hotel {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        rating: f64,
        country_id: i32,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
            rating,
            country_id,
            country: None,
        }
    }

    /// Overwrite the editable fields with `input`
    pub fn apply(&mut self, input: UpdateHotel) {
        self.name = input.name;
        self.address = input.address;
        self.rating = input.rating;
        self.country_id = input.country_id;
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateHotel {
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i32,
}

impl From<CreateHotel> for Hotel {
    fn from(input: CreateHotel) -> Self {
        Hotel::new(input.name, input.address, input.rating, input.country_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateHotel {
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i32,
}
