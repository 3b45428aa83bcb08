pub mod property_model;
pub mod vacancy_model;

pub use property_model::{NewPropertyModel, PropertyModel};
pub use vacancy_model::{NewVacancyModel, VacancyModel};
