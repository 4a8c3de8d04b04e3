use crate::models::{non_empty, Category, Contact, ContactFields};

/// Editable text fields of the details form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    Email,
    Address,
}

impl FormField {
    pub const ALL: &'static [FormField] = &[
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Address,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Phone => "Phone",
            FormField::Email => "Email",
            FormField::Address => "Address",
        }
    }

    /// Address is the only field that takes line breaks
    pub fn is_multiline(self) -> bool {
        self == FormField::Address
    }
}

/// The five editable fields of the window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub category: Category,
}

impl ContactForm {
    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Email => &self.email,
            FormField::Address => &self.address,
        }
    }

    pub fn text_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Phone => &mut self.phone,
            FormField::Email => &mut self.email,
            FormField::Address => &mut self.address,
        }
    }

    /// Overwrite every field with a stored contact
    pub fn load(&mut self, contact: &Contact) {
        self.name = contact.name.clone();
        self.phone = contact.phone.clone().unwrap_or_default();
        self.email = contact.email.clone().unwrap_or_default();
        self.address = contact.address.clone().unwrap_or_default();
        self.category = contact.category;
    }

    /// Empty the text fields and reset category to the first entry
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Surrounding whitespace on the name is dropped, as in the `add` subcommand
    pub fn to_fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.trim().to_string(),
            phone: non_empty(self.phone.clone()),
            email: non_empty(self.email.clone()),
            address: non_empty(self.address.clone()),
            category: self.category,
        }
    }
}
