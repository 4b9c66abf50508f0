use crate::domain::{Item, ItemId, PageRequest, UserId};
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// ItemCatalogのモック実装
///
/// 登録順を保持し、所有者ごとのページングに使う。
pub struct ItemCatalog {
    items: Mutex<Vec<Item>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// テスト用にアイテムを登録
    pub fn add_item(&self, owner_id: UserId, name: &str, available: bool) -> ItemId {
        let item = Item {
            item_id: ItemId::new(),
            owner_id,
            name: name.to_string(),
            description: format!("{} for rent", name),
            available,
        };
        let item_id = item.item_id;
        self.items.lock().unwrap().push(item);
        item_id
    }

    /// 貸出可否を切り替える
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items.iter_mut().find(|i| i.item_id == item_id) {
            item.available = available;
        }
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    async fn find(&self, item_id: ItemId) -> Result<Option<Item>> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|i| i.item_id == item_id).cloned())
    }

    async fn find_by_owner(&self, owner_id: UserId, page: PageRequest) -> Result<Vec<Item>> {
        let owned: Vec<Item> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(page.apply(owned))
    }
}
