use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::entities::PropertyListing;
use crate::domain::entities::property_listing::DEFAULT_CITY;
use crate::infrastructure::database::schema::mha_properties;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = mha_properties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PropertyModel {
    pub id: i64,
    pub property_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub details_url: String,
    pub allows_cats: Option<bool>,
    pub allows_dogs: Option<bool>,
    pub senior_55_plus: Option<bool>,
    pub source_url: String,
    pub last_seen: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = mha_properties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPropertyModel {
    pub property_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub details_url: String,
    pub allows_cats: Option<bool>,
    pub allows_dogs: Option<bool>,
    pub senior_55_plus: Option<bool>,
    pub source_url: String,
}

impl From<&PropertyListing> for NewPropertyModel {
    fn from(listing: &PropertyListing) -> Self {
        Self {
            property_name: listing.property_name().to_string(),
            address: listing.address().map(str::to_string),
            city: Some(listing.city().to_string()),
            details_url: listing.details_url().to_string(),
            allows_cats: listing.allows_cats(),
            allows_dogs: listing.allows_dogs(),
            senior_55_plus: listing.senior_55_plus(),
            source_url: listing.source_url().to_string(),
        }
    }
}

impl From<PropertyModel> for PropertyListing {
    fn from(model: PropertyModel) -> Self {
        PropertyListing::new(model.property_name, model.details_url, model.source_url)
            .with_address(model.address)
            .with_city(model.city.unwrap_or_else(|| DEFAULT_CITY.to_string()))
            .with_amenities(model.allows_cats, model.allows_dogs, model.senior_55_plus)
            .with_last_seen(Some(model.last_seen))
    }
}
