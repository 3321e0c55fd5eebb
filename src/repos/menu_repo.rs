/*
 * Responsibility
 * - MenuItem のインメモリ keyed store (id → MenuItem)
 * - 複数リクエストから同時に呼ばれても安全 (内部で RwLock)
 * - 呼び出し側にロックを持たせない。返すのは常にコピー
 */
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::MenuItem;

#[derive(Debug, Clone, Default)]
pub struct MenuRepo {
    items: Arc<RwLock<HashMap<Uuid, MenuItem>>>,
}

impl MenuRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by id.
    pub fn save(&self, item: MenuItem) -> MenuItem {
        self.items.write().insert(item.id, item.clone());
        item
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<MenuItem> {
        self.items.read().get(&id).cloned()
    }

    /// Snapshot ordered by name, then id.
    pub fn find_all(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self.items.read().values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        items
    }

    /// Removing an absent id is a no-op returning `None`.
    pub fn delete(&self, id: Uuid) -> Option<MenuItem> {
        self.items.write().remove(&id)
    }

    /// Read-modify-write under one write lock. `None` if the id is absent.
    pub fn modify<F>(&self, id: Uuid, f: F) -> Option<MenuItem>
    where
        F: FnOnce(&mut MenuItem),
    {
        let mut items = self.items.write();
        let item = items.get_mut(&id)?;
        f(item);
        // id is the key
        item.id = id;
        Some(item.clone())
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}
