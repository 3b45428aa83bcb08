pub mod property_repository;
pub mod repository_error;
pub mod vacancy_repository;

pub use property_repository::PropertyRepository;
pub use repository_error::RepositoryError;
pub use vacancy_repository::VacancyRepository;
