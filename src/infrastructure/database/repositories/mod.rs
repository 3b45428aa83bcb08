pub mod postgres_property_repository;
pub mod postgres_vacancy_repository;
mod sql_functions;

pub use postgres_property_repository::PostgresPropertyRepository;
pub use postgres_vacancy_repository::PostgresVacancyRepository;
