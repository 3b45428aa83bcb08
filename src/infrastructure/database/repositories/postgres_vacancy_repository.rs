use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel::upsert::excluded;

use super::sql_functions::coalesce;
use crate::domain::entities::VacancyRow;
use crate::domain::repositories::{RepositoryError, VacancyRepository};
use crate::infrastructure::database::models::{NewVacancyModel, VacancyModel};
use crate::infrastructure::database::schema::mha_vacancy_board;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresVacancyRepository {
    pool: DbPool,
}

impl PostgresVacancyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VacancyRepository for PostgresVacancyRepository {
    async fn upsert_batch(&self, rows: &[VacancyRow]) -> Result<usize, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::Pool(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for row in rows {
                let new_row = NewVacancyModel::from(row);

                diesel::insert_into(mha_vacancy_board::table)
                    .values(&new_row)
                    .on_conflict((
                        mha_vacancy_board::property_name,
                        mha_vacancy_board::source_pdf_url,
                        mha_vacancy_board::updated_date,
                    ))
                    .do_update()
                    .set((
                        mha_vacancy_board::vacancies_text
                            .eq(excluded(mha_vacancy_board::vacancies_text)),
                        mha_vacancy_board::manager_name.eq(coalesce(
                            excluded(mha_vacancy_board::manager_name),
                            mha_vacancy_board::manager_name,
                        )),
                        mha_vacancy_board::manager_phone.eq(coalesce(
                            excluded(mha_vacancy_board::manager_phone),
                            mha_vacancy_board::manager_phone,
                        )),
                        mha_vacancy_board::manager_email.eq(coalesce(
                            excluded(mha_vacancy_board::manager_email),
                            mha_vacancy_board::manager_email,
                        )),
                        mha_vacancy_board::ingested_at.eq(now),
                    ))
                    .execute(conn)?;
            }
            Ok(rows.len())
        })
        .map_err(|e| RepositoryError::Database(e.to_string()))
    }

    async fn list_for_report(&self) -> Result<Vec<VacancyRow>, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::Pool(e.to_string()))?;

        let models = mha_vacancy_board::table
            .order((
                mha_vacancy_board::updated_date.desc().nulls_last(),
                mha_vacancy_board::property_name.asc(),
            ))
            .select(VacancyModel::as_select())
            .load::<VacancyModel>(&mut conn)
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(models.into_iter().map(VacancyRow::from).collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RepositoryError::Pool(e.to_string()))?;

        mha_vacancy_board::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| RepositoryError::Database(e.to_string()))
    }
}
