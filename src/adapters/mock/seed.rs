use super::{ItemCatalog, UserDirectory};
use crate::domain::{ItemId, UserId};

/// 起動時に投入するデモデータのID
#[derive(Debug, Clone, Copy)]
pub struct DemoData {
    pub owner_id: UserId,
    pub booker_id: UserId,
    pub item_ids: [ItemId; 2],
}

/// 所有者・借り手と貸出可能なアイテム2件を登録する
pub fn seed_demo_data(users: &UserDirectory, items: &ItemCatalog) -> DemoData {
    let owner_id = users.add_user("Demo Owner");
    let booker_id = users.add_user("Demo Booker");
    let drill = items.add_item(owner_id, "Drill", true);
    let tent = items.add_item(owner_id, "Tent", true);

    tracing::info!(
        owner_id = %owner_id.value(),
        booker_id = %booker_id.value(),
        drill_id = %drill.value(),
        tent_id = %tent.value(),
        "seeded demo users and items"
    );

    DemoData {
        owner_id,
        booker_id,
        item_ids: [drill, tent],
    }
}
