use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::value_objects::{ManagerContact, PropertyBlock};

/// Identity of a vacancy-board row across ingestion runs.
pub type VacancyKey = (String, String, Option<NaiveDate>);

/// One row of the vacancy board.
#[derive(Debug, Clone, PartialEq)]
pub struct VacancyRow {
    property_name: String,
    address: Option<String>,
    vacancies_text: Option<String>,
    manager: ManagerContact,
    updated_date: Option<NaiveDate>,
    source_pdf_url: String,
    ingested_at: Option<NaiveDateTime>,
}

impl VacancyRow {
    pub fn new(
        property: PropertyBlock,
        vacancies_text: Option<String>,
        manager: ManagerContact,
        updated_date: Option<NaiveDate>,
        source_pdf_url: String,
    ) -> Self {
        Self {
            property_name: property.name,
            address: property.address,
            vacancies_text,
            manager,
            updated_date,
            source_pdf_url,
            ingested_at: None,
        }
    }

    pub fn with_ingested_at(mut self, ingested_at: Option<NaiveDateTime>) -> Self {
        self.ingested_at = ingested_at;
        self
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn vacancies_text(&self) -> Option<&str> {
        self.vacancies_text.as_deref()
    }

    pub fn manager(&self) -> &ManagerContact {
        &self.manager
    }

    pub fn updated_date(&self) -> Option<NaiveDate> {
        self.updated_date
    }

    pub fn source_pdf_url(&self) -> &str {
        &self.source_pdf_url
    }

    pub fn ingested_at(&self) -> Option<NaiveDateTime> {
        self.ingested_at
    }

    pub fn identity_key(&self) -> VacancyKey {
        (
            self.property_name.clone(),
            self.source_pdf_url.clone(),
            self.updated_date,
        )
    }

    /// Applies a re-ingested row with the same identity key. The vacancy text
    /// is the payload and always wins; manager details only fill gaps.
    pub fn merge_from(&mut self, newer: &VacancyRow, ingested_at: NaiveDateTime) {
        self.vacancies_text = newer.vacancies_text.clone();
        self.manager.merge_from(&newer.manager);
        self.ingested_at = Some(ingested_at);
    }
}
