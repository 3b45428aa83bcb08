use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::debug;

use super::sql_functions::coalesce;
use crate::domain::entities::PropertyListing;
use crate::domain::repositories::{PropertyRepository, RepositoryError};
use crate::infrastructure::database::models::{NewPropertyModel, PropertyModel};
use crate::infrastructure::database::schema::mha_properties;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresPropertyRepository {
    pool: DbPool,
}

impl PostgresPropertyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for PostgresPropertyRepository {
    async fn upsert_batch(&self, listings: &[PropertyListing]) -> Result<usize, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::Pool(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for listing in listings {
                let new_listing = NewPropertyModel::from(listing);
                debug!("Upserting property {}", new_listing.details_url);

                diesel::insert_into(mha_properties::table)
                    .values(&new_listing)
                    .on_conflict(mha_properties::details_url)
                    .do_update()
                    .set((
                        mha_properties::property_name.eq(excluded(mha_properties::property_name)),
                        mha_properties::address.eq(coalesce(
                            excluded(mha_properties::address),
                            mha_properties::address,
                        )),
                        mha_properties::allows_cats.eq(coalesce(
                            excluded(mha_properties::allows_cats),
                            mha_properties::allows_cats,
                        )),
                        mha_properties::allows_dogs.eq(coalesce(
                            excluded(mha_properties::allows_dogs),
                            mha_properties::allows_dogs,
                        )),
                        mha_properties::senior_55_plus.eq(coalesce(
                            excluded(mha_properties::senior_55_plus),
                            mha_properties::senior_55_plus,
                        )),
                        mha_properties::last_seen.eq(now),
                    ))
                    .execute(conn)?;
            }
            Ok(listings.len())
        })
        .map_err(|e| RepositoryError::Database(e.to_string()))
    }

    async fn find_by_details_url(
        &self,
        details_url: &str,
    ) -> Result<Option<PropertyListing>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::Pool(e.to_string()))?;

        let result = mha_properties::table
            .filter(mha_properties::details_url.eq(details_url))
            .select(PropertyModel::as_select())
            .first::<PropertyModel>(&mut conn)
            .optional()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(result.map(PropertyListing::from))
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::Pool(e.to_string()))?;

        mha_properties::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }
}
