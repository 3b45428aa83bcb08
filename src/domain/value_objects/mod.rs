pub mod manager_contact;
pub mod property_block;

pub use manager_contact::ManagerContact;
pub use property_block::PropertyBlock;
