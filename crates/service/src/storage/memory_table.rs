use tokio::sync::RwLock;
use uuid::Uuid;

/// Records addressable by their generated identifier.
pub trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for models::advertisement::Model {
    fn key(&self) -> Uuid { self.id }
}

impl Keyed for models::service::Model {
    fn key(&self) -> Uuid { self.id }
}

impl Keyed for models::enquiry::Model {
    fn key(&self) -> Uuid { self.id }
}

impl Keyed for models::visitor::Model {
    fn key(&self) -> Uuid { self.id }
}

/// Generic in-memory table preserving insertion order.
///
/// Every mutation holds the write lock for its whole read-modify-write, so
/// `upsert_by` is atomic with respect to concurrent callers.
pub struct MemoryTable<V> {
    rows: RwLock<Vec<V>>,
}

impl<V> Default for MemoryTable<V> {
    fn default() -> Self { Self { rows: RwLock::new(Vec::new()) } }
}

impl<V> MemoryTable<V>
where
    V: Keyed + Clone + Send + Sync,
{
    pub fn new() -> Self { Self::default() }

    /// List all rows in insertion order.
    pub async fn list(&self) -> Vec<V> {
        self.rows.read().await.clone()
    }

    pub async fn count(&self) -> u64 {
        self.rows.read().await.len() as u64
    }

    /// Rows `[offset, offset + limit)` in insertion order.
    pub async fn window(&self, offset: u64, limit: u64) -> Vec<V> {
        let rows = self.rows.read().await;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        rows.iter().skip(offset).take(limit).cloned().collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<V> {
        let rows = self.rows.read().await;
        rows.iter().find(|r| r.key() == id).cloned()
    }

    pub async fn insert(&self, value: V) -> V {
        let mut rows = self.rows.write().await;
        rows.push(value.clone());
        value
    }

    /// Apply a mutation to the row with `id`; `None` when absent.
    pub async fn update<F>(&self, id: Uuid, f: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.key() == id)?;
        f(row);
        Some(row.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Option<V> {
        let mut rows = self.rows.write().await;
        let pos = rows.iter().position(|r| r.key() == id)?;
        Some(rows.remove(pos))
    }

    /// Remove every row whose id is in `ids`; missing ids are ignored.
    pub async fn remove_many(&self, ids: &[Uuid]) -> Vec<V> {
        let mut rows = self.rows.write().await;
        let (removed, kept): (Vec<V>, Vec<V>) = rows.drain(..).partition(|r| ids.contains(&r.key()));
        *rows = kept;
        removed
    }

    /// Update the first row matching `matches` or insert `candidate`.
    /// Returns the stored row and `true` when it was inserted.
    pub async fn upsert_by<P, F>(&self, matches: P, on_existing: F, candidate: V) -> (V, bool)
    where
        P: Fn(&V) -> bool,
        F: FnOnce(&mut V),
    {
        let mut rows = self.rows.write().await;
        if let Some(row) = rows.iter_mut().find(|r| matches(r)) {
            on_existing(row);
            return (row.clone(), false);
        }
        rows.push(candidate.clone());
        (candidate, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row { id: Uuid, name: String, hits: u32 }

    impl Keyed for Row {
        fn key(&self) -> Uuid { self.id }
    }

    fn row(name: &str) -> Row { Row { id: Uuid::new_v4(), name: name.into(), hits: 1 } }

    #[tokio::test]
    async fn crud_keeps_insertion_order() {
        let table = MemoryTable::new();
        let a = table.insert(row("a")).await;
        let b = table.insert(row("b")).await;
        let c = table.insert(row("c")).await;
        assert_eq!(table.count().await, 3);
        assert_eq!(table.window(1, 5).await, vec![b.clone(), c.clone()]);

        let updated = table.update(a.id, |r| r.name = "a2".into()).await.unwrap();
        assert_eq!(updated.name, "a2");
        assert!(table.update(Uuid::new_v4(), |_| {}).await.is_none());

        let removed = table.remove_many(&[a.id, Uuid::new_v4()]).await;
        assert_eq!(removed.len(), 1);
        assert_eq!(table.list().await, vec![b, c]);
    }

    #[tokio::test]
    async fn upsert_by_updates_existing_row() {
        let table = MemoryTable::new();
        let (first, created) = table.upsert_by(|r: &Row| r.name == "x", |r| r.hits += 1, row("x")).await;
        assert!(created);
        let (second, created) = table.upsert_by(|r: &Row| r.name == "x", |r| r.hits += 1, row("x")).await;
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.hits, 2);
        assert_eq!(table.count().await, 1);
    }
}
