use async_trait::async_trait;
use sea_orm::{
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, LoaderTrait,
    PaginatorTrait, QueryFilter,
};

use crate::entity::{country, hotel};
use crate::error::{AppError, AppResult};
use crate::models::{Country, Hotel};
use crate::repositories::{DeletePolicies, DeletePolicy, Include, Includes, ModelOf, Record};

/// Relation name used to configure what happens to hotels when their
/// country is deleted
pub const HOTELS_RELATION: &str = "Country.Hotels";

/// Declared policy for [`HOTELS_RELATION`]
pub const HOTELS_ON_DELETE: DeletePolicy = DeletePolicy::Restrict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryInclude {
    Hotels,
}

impl Include for CountryInclude {
    const ALL: &'static [Self] = &[CountryInclude::Hotels];

    fn name(self) -> &'static str {
        match self {
            CountryInclude::Hotels => "Hotels",
        }
    }
}

impl From<country::Model> for Country {
    fn from(model: country::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            short_name: model.short_name,
            hotels: None,
        }
    }
}

#[async_trait]
impl Record for Country {
    type Entity = country::Entity;
    type ActiveModel = country::ActiveModel;
    type Key = i32;
    type Include = CountryInclude;

    const NAME: &'static str = "Country";

    fn key(&self) -> i32 {
        self.id
    }

    fn to_insert(&self) -> country::ActiveModel {
        country::ActiveModel {
            id: if self.id == 0 { NotSet } else { Set(self.id) },
            name: Set(self.name.clone()),
            short_name: Set(self.short_name.clone()),
        }
    }

    fn to_update(&self) -> country::ActiveModel {
        country::ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name.clone()),
            short_name: Set(self.short_name.clone()),
        }
    }

    fn validate(&self) -> AppResult<()> {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > 50 {
            return Err(AppError::validation(
                "Country name must be between 1 and 50 characters",
            ));
        }

        let short_name = self.short_name.trim();
        if short_name.is_empty() || short_name.chars().count() > 2 {
            return Err(AppError::validation(
                "Country short name must be between 1 and 2 characters",
            ));
        }

        Ok(())
    }

    async fn load(
        db: &DatabaseConnection,
        models: Vec<ModelOf<Self>>,
        includes: &Includes<CountryInclude>,
    ) -> AppResult<Vec<Self>> {
        if !includes.contains(CountryInclude::Hotels) {
            return Ok(models.into_iter().map(Country::from).collect());
        }

        let hotels = models.load_many(hotel::Entity, db).await?;

        Ok(models
            .into_iter()
            .zip(hotels)
            .map(|(model, hotels)| {
                let mut hotels: Vec<Hotel> = hotels.into_iter().map(Hotel::from).collect();
                hotels.sort_by_key(|hotel| hotel.id);

                Country {
                    hotels: Some(hotels),
                    ..model.into()
                }
            })
            .collect())
    }

    async fn before_delete(
        txn: &DatabaseTransaction,
        key: i32,
        policies: &DeletePolicies,
    ) -> AppResult<u64> {
        let dependents = hotel::Entity::find()
            .filter(hotel::Column::CountryId.eq(key))
            .count(txn)
            .await?;

        if dependents == 0 {
            return Ok(0);
        }

        match policies.resolve(HOTELS_RELATION, HOTELS_ON_DELETE) {
            DeletePolicy::Restrict => Err(AppError::ConstraintViolation {
                constraint: HOTELS_RELATION.to_string(),
                detail: format!("Country {} still has {} hotel(s)", key, dependents),
            }),
            DeletePolicy::Cascade => {
                let result = hotel::Entity::delete_many()
                    .filter(hotel::Column::CountryId.eq(key))
                    .exec(txn)
                    .await?;

                tracing::debug!(
                    country_id = key,
                    hotels = result.rows_affected,
                    "Cascaded country delete"
                );
                Ok(result.rows_affected)
            }
        }
    }
}
