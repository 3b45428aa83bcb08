use chrono::NaiveDateTime;

pub const DEFAULT_CITY: &str = "Missoula";

/// One property detail page, identified by its `details_url`.
///
/// The amenity flags are tri-state: `Some(true)` when the page says so,
/// `None` when it doesn't. Nothing ever records `Some(false)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyListing {
    property_name: String,
    address: Option<String>,
    city: String,
    details_url: String,
    allows_cats: Option<bool>,
    allows_dogs: Option<bool>,
    senior_55_plus: Option<bool>,
    source_url: String,
    last_seen: Option<NaiveDateTime>,
}

impl PropertyListing {
    pub fn new(property_name: String, details_url: String, source_url: String) -> Self {
        Self {
            property_name,
            address: None,
            city: DEFAULT_CITY.to_string(),
            details_url,
            allows_cats: None,
            allows_dogs: None,
            senior_55_plus: None,
            source_url,
            last_seen: None,
        }
    }

    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = address;
        self
    }

    pub fn with_city(mut self, city: String) -> Self {
        self.city = city;
        self
    }

    pub fn with_amenities(
        mut self,
        allows_cats: Option<bool>,
        allows_dogs: Option<bool>,
        senior_55_plus: Option<bool>,
    ) -> Self {
        self.allows_cats = allows_cats;
        self.allows_dogs = allows_dogs;
        self.senior_55_plus = senior_55_plus;
        self
    }

    pub fn with_last_seen(mut self, last_seen: Option<NaiveDateTime>) -> Self {
        self.last_seen = last_seen;
        self
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn details_url(&self) -> &str {
        &self.details_url
    }

    pub fn allows_cats(&self) -> Option<bool> {
        self.allows_cats
    }

    pub fn allows_dogs(&self) -> Option<bool> {
        self.allows_dogs
    }

    pub fn senior_55_plus(&self) -> Option<bool> {
        self.senior_55_plus
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn last_seen(&self) -> Option<NaiveDateTime> {
        self.last_seen
    }

    /// Applies a fresh scrape of the same detail page.
    ///
    /// The name is always replaced. Nullable facts are only replaced when the
    /// newer scrape knows them, so a later page that drops a phrase cannot
    /// downgrade the record.
    pub fn merge_from(&mut self, newer: &PropertyListing, seen_at: NaiveDateTime) {
        self.property_name = newer.property_name.clone();
        if newer.address.is_some() {
            self.address = newer.address.clone();
        }
        self.allows_cats = newer.allows_cats.or(self.allows_cats);
        self.allows_dogs = newer.allows_dogs.or(self.allows_dogs);
        self.senior_55_plus = newer.senior_55_plus.or(self.senior_55_plus);
        self.last_seen = Some(seen_at);
    }
}
