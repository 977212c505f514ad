pub use super::gyms::Entity as Gyms;
