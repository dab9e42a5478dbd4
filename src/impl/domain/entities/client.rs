use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub String);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        ClientId(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_payment_method: String,
    pub notes: Option<String>,
    /// Assigned by the record store on insert; never changes afterwards.
    pub created_at: DateTime<Utc>,
}

/// Client data supplied by callers on insert. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_payment_method: String,
    pub notes: Option<String>,
}

/// Partial update. `None` leaves the field untouched; `notes: Some(None)`
/// clears the notes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_payment_method: Option<String>,
    pub notes: Option<Option<String>>,
}

// --

impl Client {
    pub fn new(id: ClientId, fields: ClientFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            preferred_payment_method: fields.preferred_payment_method,
            notes: fields.notes,
            created_at,
        }
    }

    pub fn to_fields(&self) -> ClientFields {
        ClientFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            preferred_payment_method: self.preferred_payment_method.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl ClientPatch {
    pub fn apply(&self, client: &mut Client) {
        if let Some(name) = &self.name {
            client.name = name.clone();
        }
        if let Some(email) = &self.email {
            client.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            client.phone = phone.clone();
        }
        if let Some(method) = &self.preferred_payment_method {
            client.preferred_payment_method = method.clone();
        }
        if let Some(notes) = &self.notes {
            client.notes = notes.clone();
        }
    }
}
