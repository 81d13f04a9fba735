//! Identifier sets accepted by the bulk-delete operations.

use uuid::Uuid;

use crate::errors::ServiceError;

/// A non-empty, de-duplicated set of record identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSet(Vec<Uuid>);

impl IdSet {
    /// Parse caller-supplied identifiers. An empty list or any value that is
    /// not a UUID makes the whole set malformed.
    pub fn parse<I, S>(raw: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids: Vec<Uuid> = Vec::new();
        for value in raw {
            let value = value.as_ref().trim();
            let id = Uuid::parse_str(value)
                .map_err(|_| ServiceError::Validation(format!("invalid id: {value}")))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if ids.is_empty() {
            return Err(ServiceError::Validation("No IDs provided".into()));
        }
        Ok(Self(ids))
    }

    pub fn as_slice(&self) -> &[Uuid] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn contains(&self, id: &Uuid) -> bool { self.0.contains(id) }
}

impl From<Uuid> for IdSet {
    fn from(id: Uuid) -> Self { Self(vec![id]) }
}
