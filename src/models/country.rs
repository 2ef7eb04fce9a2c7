use serde::{Deserialize, Serialize};

use crate::models::Hotel;

/// A country in the catalog.
///
/// `id` is `0` until the row has been saved and the engine has assigned a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub short_name: String,
    /// Populated only when `CountryInclude::Hotels` was requested.
    pub hotels: Option<Vec<Hotel>>,
}

impl Country {
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            short_name: short_name.into(),
            hotels: None,
        }
    }

    /// Overwrite the editable fields with `input`
    pub fn apply(&mut self, input: UpdateCountry) {
        self.name = input.name;
        self.short_name = input.short_name;
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCountry {
    pub name: String,
    pub short_name: String,
}

impl From<CreateCountry> for Country {
    fn from(input: CreateCountry) -> Self {
        Country::new(input.name, input.short_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCountry {
    pub name: String,
    pub short_name: String,
}
