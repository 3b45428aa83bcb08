use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::entities::VacancyRow;
use crate::domain::value_objects::{ManagerContact, PropertyBlock};
use crate::infrastructure::database::schema::mha_vacancy_board;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = mha_vacancy_board)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VacancyModel {
    pub id: i64,
    pub property_name: String,
    pub address: Option<String>,
    pub vacancies_text: Option<String>,
    pub manager_name: Option<String>,
    pub manager_phone: Option<String>,
    pub manager_email: Option<String>,
    pub updated_date: Option<NaiveDate>,
    pub source_pdf_url: String,
    pub ingested_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = mha_vacancy_board)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVacancyModel {
    pub property_name: String,
    pub address: Option<String>,
    pub vacancies_text: Option<String>,
    pub manager_name: Option<String>,
    pub manager_phone: Option<String>,
    pub manager_email: Option<String>,
    pub updated_date: Option<NaiveDate>,
    pub source_pdf_url: String,
}

impl From<&VacancyRow> for NewVacancyModel {
    fn from(row: &VacancyRow) -> Self {
        let manager = row.manager();
        Self {
            property_name: row.property_name().to_string(),
            address: row.address().map(str::to_string),
            vacancies_text: row.vacancies_text().map(str::to_string),
            manager_name: manager.name.clone(),
            manager_phone: manager.phone.clone(),
            manager_email: manager.email.clone(),
            updated_date: row.updated_date(),
            source_pdf_url: row.source_pdf_url().to_string(),
        }
    }
}

impl From<VacancyModel> for VacancyRow {
    fn from(model: VacancyModel) -> Self {
        VacancyRow::new(
            PropertyBlock::new(model.property_name, model.address),
            model.vacancies_text,
            ManagerContact::new(model.manager_name, model.manager_phone, model.manager_email),
            model.updated_date,
            model.source_pdf_url,
        )
        .with_ingested_at(Some(model.ingested_at))
    }
}
