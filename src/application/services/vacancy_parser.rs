//! Field heuristics for vacancy-board rows.
//!
//! Each board row has three columns: a property block (name, then street
//! address), free-form vacancy text, and a manager block (name, phone,
//! email). None of these are delimited, so they are split by pattern.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::domain::entities::VacancyRow;
use crate::domain::value_objects::{ManagerContact, PropertyBlock};

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_STREET_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{1,5}\s").unwrap());
static RE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{3}\)\s*\d{3}-\d{4}").unwrap());
static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap());
static RE_UPDATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Information updated:\s*([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})").unwrap()
});

const MIN_COLUMNS: usize = 3;

/// Collapses whitespace runs and trims; blank input is `None`.
pub fn clean_cell(value: Option<&str>) -> Option<String> {
    let collapsed = RE_WHITESPACE.replace_all(value?, " ");
    let trimmed = collapsed.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Splits at the first street number: everything before it is the name,
/// everything from it on is the address. A block that starts with a number,
/// or has none, is all name.
pub fn split_property_block(block: &str) -> PropertyBlock {
    if let Some(m) = RE_STREET_NUMBER.find(block) {
        if let Some(name) = clean_cell(Some(&block[..m.start()])) {
            return PropertyBlock::new(name, clean_cell(Some(&block[m.start()..])));
        }
    }

    PropertyBlock::new(block.trim().to_string(), None)
}

/// Phone and email are searched independently; the name is whatever comes
/// before the first `(`.
pub fn parse_manager_contact(block: &str) -> ManagerContact {
    let phone = RE_PHONE.find(block).map(|m| m.as_str().to_string());
    let email = RE_EMAIL.find(block).map(|m| m.as_str().to_string());
    let name = clean_cell(block.split('(').next());

    ManagerContact::new(name, phone, email)
}

/// Reads the board's "Information updated: M/D/YYYY" header.
pub fn parse_updated_date(page_text: &str) -> Option<NaiveDate> {
    let caps = RE_UPDATED.captures(page_text)?;
    let month = caps.get(1)?.as_str().parse().ok()?;
    let day = caps.get(2)?.as_str().parse().ok()?;
    let year = caps.get(3)?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Builds a record from one table row. Rows that are too short or have an
/// empty property column are skipped.
pub fn parse_row(
    cells: &[Option<String>],
    updated_date: Option<NaiveDate>,
    source_pdf_url: &str,
) -> Option<VacancyRow> {
    if cells.len() < MIN_COLUMNS {
        return None;
    }

    let property_block = clean_cell(cells[0].as_deref())?;
    let vacancies_text = clean_cell(cells[1].as_deref());
    let manager = clean_cell(cells[2].as_deref())
        .map(|block| parse_manager_contact(&block))
        .unwrap_or_default();

    Some(VacancyRow::new(
        split_property_block(&property_block),
        vacancies_text,
        manager,
        updated_date,
        source_pdf_url.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_clean_cell() {
        assert_eq!(
            clean_cell(Some("  Riverside\n  Apartments\t")),
            Some("Riverside Apartments".to_string())
        );
        assert_eq!(clean_cell(Some(" \n\t ")), None);
        assert_eq!(clean_cell(None), None);
    }

    #[test]
    fn test_split_name_and_address() {
        let block = split_property_block("Riverside Apartments 123 Main St");

        assert_eq!(block.name, "Riverside Apartments");
        assert_eq!(block.address.as_deref(), Some("123 Main St"));
    }

    #[test]
    fn test_split_without_street_number() {
        let block = split_property_block("Garden Court");

        assert_eq!(block.name, "Garden Court");
        assert_eq!(block.address, None);
    }

    #[test]
    fn test_split_leading_number_is_all_name() {
        let block = split_property_block("1235 Building 400 Broadway");

        assert_eq!(block.name, "1235 Building 400 Broadway");
        assert_eq!(block.address, None);
    }

    #[test]
    fn test_manager_contact() {
        let contact = parse_manager_contact("Jane Doe (406) 555-1234 jane@example.org");

        assert_eq!(contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(contact.phone.as_deref(), Some("(406) 555-1234"));
        assert_eq!(contact.email.as_deref(), Some("jane@example.org"));
    }

    #[test]
    fn test_manager_contact_without_phone() {
        let contact = parse_manager_contact("Front Office office@mha.example.org");

        assert_eq!(contact.name.as_deref(), Some("Front Office office@mha.example.org"));
        assert_eq!(contact.phone, None);
        assert_eq!(contact.email.as_deref(), Some("office@mha.example.org"));
    }

    #[test]
    fn test_updated_date() {
        assert_eq!(
            parse_updated_date("Vacancy Board Information updated: 2/6/2026 Property"),
            NaiveDate::from_ymd_opt(2026, 2, 6)
        );
        assert_eq!(
            parse_updated_date("information UPDATED:12/25/2025"),
            NaiveDate::from_ymd_opt(2025, 12, 25)
        );
        assert_eq!(parse_updated_date("Information updated: 13/40/2026"), None);
        assert_eq!(parse_updated_date("no header here"), None);
    }

    #[test]
    fn test_parse_row() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 6);
        let row = parse_row(
            &cells(&[
                Some("Riverside Apartments\n123 Main St"),
                Some("1BR: 2\n2BR: 0"),
                Some("Jane Doe\n(406) 555-1234\njane@example.org"),
            ]),
            date,
            "https://example.org/board.pdf",
        )
        .unwrap();

        assert_eq!(row.property_name(), "Riverside Apartments");
        assert_eq!(row.address(), Some("123 Main St"));
        assert_eq!(row.vacancies_text(), Some("1BR: 2 2BR: 0"));
        assert_eq!(row.manager().email.as_deref(), Some("jane@example.org"));
        assert_eq!(row.updated_date(), date);
        assert_eq!(row.source_pdf_url(), "https://example.org/board.pdf");
    }

    #[test]
    fn test_parse_row_skips_short_and_blank_rows() {
        assert!(parse_row(&cells(&[Some("A"), Some("B")]), None, "u").is_none());
        assert!(parse_row(&cells(&[Some("  "), Some("B"), Some("C")]), None, "u").is_none());
        assert!(parse_row(&cells(&[None, Some("B"), Some("C")]), None, "u").is_none());
    }

    #[test]
    fn test_parse_row_without_manager() {
        let row = parse_row(&cells(&[Some("Garden Court"), Some("None"), None]), None, "u")
            .unwrap();

        assert!(row.manager().is_empty());
    }
}
