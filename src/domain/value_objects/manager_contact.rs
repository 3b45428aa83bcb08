/// Contact details parsed out of the manager column of the vacancy board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagerContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ManagerContact {
    pub fn new(name: Option<String>, phone: Option<String>, email: Option<String>) -> Self {
        Self { name, phone, email }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }

    /// Fills in fields from `newer` that it actually knows; missing values
    /// never erase what is already here.
    pub fn merge_from(&mut self, newer: &ManagerContact) {
        if newer.name.is_some() {
            self.name = newer.name.clone();
        }
        if newer.phone.is_some() {
            self.phone = newer.phone.clone();
        }
        if newer.email.is_some() {
            self.email = newer.email.clone();
        }
    }
}
