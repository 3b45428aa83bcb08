use std::sync::Arc;

use crate::domain::entities::VacancyRow;
use crate::domain::repositories::{RepositoryError, VacancyRepository};

pub struct ListVacanciesUseCase {
    vacancy_repository: Arc<dyn VacancyRepository>,
}

impl ListVacanciesUseCase {
    pub fn new(vacancy_repository: Arc<dyn VacancyRepository>) -> Self {
        Self { vacancy_repository }
    }

    pub async fn execute(&self) -> Result<Vec<VacancyRow>, RepositoryError> {
        self.vacancy_repository.list_for_report().await
    }
}

/// One display line per row: name, vacancies, manager email, board date.
pub fn format_vacancy_line(row: &VacancyRow) -> String {
    format!(
        "{} | {} | {} | {}",
        row.property_name(),
        row.vacancies_text().unwrap_or("-"),
        row.manager().email.as_deref().unwrap_or("-"),
        row.updated_date()
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string()),
    )
}
