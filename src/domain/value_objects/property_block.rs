/// The property column of a vacancy-board row, split into a display name and
/// an optional street address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBlock {
    pub name: String,
    pub address: Option<String>,
}

impl PropertyBlock {
    pub fn new(name: String, address: Option<String>) -> Self {
        Self { name, address }
    }
}
