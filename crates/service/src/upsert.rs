/// Result of an upsert-by-key: the stored record and whether it was inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted<T> {
    pub record: T,
    pub created: bool,
}
