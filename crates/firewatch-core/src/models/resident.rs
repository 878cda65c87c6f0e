//! Resident models.

use serde::{Deserialize, Serialize};

use crate::identity::PersonIdentity;

/// A person living at an address.
///
/// Identity is the (first name, last name) pair under
/// [`crate::identity::normalize`]. Several residents may share an address
/// (a household) or a last name (a family).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl Resident {
    /// Create a resident with only the identity fields set.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: String::new(),
            city: String::new(),
            zip: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }

    /// Builder-style address setter.
    pub fn at(mut self, address: impl Into<String>, city: impl Into<String>) -> Self {
        self.address = address.into();
        self.city = city.into();
        self
    }

    /// Builder-style contact setter.
    pub fn with_contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.phone = phone.into();
        self.email = email.into();
        self
    }
}

impl PersonIdentity for Resident {
    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }
}
