pub mod listing_parser;
pub mod vacancy_parser;
