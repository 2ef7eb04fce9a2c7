use async_trait::async_trait;
use sea_orm::{
    ActiveValue::{NotSet, Set, Unchanged},
    DatabaseConnection, LoaderTrait,
};

use crate::entity::{country, hotel};
use crate::error::{AppError, AppResult};
use crate::models::{Country, Hotel};
use crate::repositories::{Include, Includes, ModelOf, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelInclude {
    Country,
}

impl Include for HotelInclude {
    const ALL: &'static [Self] = &[HotelInclude::Country];

    fn name(self) -> &'static str {
        match self {
            HotelInclude::Country => "Country",
        }
    }
}

impl From<hotel::Model> for Hotel {
    fn from(model: hotel::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            rating: model.rating,
            country_id: model.country_id,
            country: None,
        }
    }
}

#[async_trait]
impl Record for Hotel {
    type Entity = hotel::Entity;
    type ActiveModel = hotel::ActiveModel;
    type Key = i32;
    type Include = HotelInclude;

    const NAME: &'static str = "Hotel";

    fn key(&self) -> i32 {
        self.id
    }

    fn to_insert(&self) -> hotel::ActiveModel {
        hotel::ActiveModel {
            id: if self.id == 0 { NotSet } else { Set(self.id) },
            name: Set(self.name.clone()),
            address: Set(self.address.clone()),
            rating: Set(self.rating),
            country_id: Set(self.country_id),
        }
    }

    fn to_update(&self) -> hotel::ActiveModel {
        hotel::ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name.clone()),
            address: Set(self.address.clone()),
            rating: Set(self.rating),
            country_id: Set(self.country_id),
        }
    }

    fn validate(&self) -> AppResult<()> {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > 150 {
            return Err(AppError::validation(
                "Hotel name must be between 1 and 150 characters",
            ));
        }

        let address = self.address.trim();
        if address.is_empty() || address.chars().count() > 250 {
            return Err(AppError::validation(
                "Hotel address must be between 1 and 250 characters",
            ));
        }

        if !(1.0..=5.0).contains(&self.rating) {
            return Err(AppError::validation("Hotel rating must be between 1 and 5"));
        }

        if self.country_id < 1 {
            return Err(AppError::validation("Hotel must reference a country"));
        }

        Ok(())
    }

    async fn load(
        db: &DatabaseConnection,
        models: Vec<ModelOf<Self>>,
        includes: &Includes<HotelInclude>,
    ) -> AppResult<Vec<Self>> {
        if !includes.contains(HotelInclude::Country) {
            return Ok(models.into_iter().map(Hotel::from).collect());
        }

        let countries = models.load_one(country::Entity, db).await?;

        Ok(models
            .into_iter()
            .zip(countries)
            .map(|(model, country)| Hotel {
                country: country.map(|country| Box::new(Country::from(country))),
                ..model.into()
            })
            .collect())
    }
}
