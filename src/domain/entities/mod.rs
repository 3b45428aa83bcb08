pub mod property_listing;
pub mod vacancy_row;

pub use property_listing::PropertyListing;
pub use vacancy_row::VacancyRow;
