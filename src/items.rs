/// Collectible coins and potions.
use crate::constants::{COIN_FRAMES, ITEM_ANIMATION_COOLDOWN_MS, ITEM_SIZE, POTION_HEAL};
use crate::entities::{Character, GameEvent, Item, ItemKind};
use crate::geometry::Rect;

impl Item {
    pub fn new(kind: ItemKind, cx: f32, cy: f32, now: u64) -> Self {
        Item {
            kind,
            rect: Rect::from_center(cx, cy, ITEM_SIZE, ITEM_SIZE),
            frame_index: 0,
            update_time: now,
            pinned: false,
            collected: false,
        }
    }

    /// The coin drawn next to the score.  Same shape as a gameplay coin but
    /// fixed to the screen and never collectable.
    pub fn score_coin(cx: f32, cy: f32, now: u64) -> Self {
        Item {
            pinned: true,
            ..Item::new(ItemKind::Coin, cx, cy, now)
        }
    }

    pub fn frame_count(&self) -> usize {
        match self.kind {
            ItemKind::Coin => COIN_FRAMES,
            ItemKind::Potion => 1,
        }
    }

    pub fn animate(&mut self, now: u64) {
        if now.saturating_sub(self.update_time) > ITEM_ANIMATION_COOLDOWN_MS {
            self.frame_index += 1;
            self.update_time = now;
        }
        if self.frame_index >= self.frame_count() {
            self.frame_index = 0;
        }
    }

    /// Applies the item to an overlapping player.  Returns the event to emit
    /// if the item was consumed.  A potion is left in place while the player
    /// is at full health.
    pub fn try_collect(&mut self, player: &mut Character) -> Option<GameEvent> {
        if self.pinned || self.collected || !self.rect.intersects(&player.rect) {
            return None;
        }
        match self.kind {
            ItemKind::Coin => {
                player.score += 1;
                self.collected = true;
                Some(GameEvent::CoinCollected)
            }
            ItemKind::Potion => {
                if player.heal(POTION_HEAL) {
                    self.collected = true;
                    Some(GameEvent::PotionUsed)
                } else {
                    None
                }
            }
        }
    }
}

/// Item pass: collection, animation, then compaction of collected items.
pub fn update_items(
    items: &mut Vec<Item>,
    player: &mut Character,
    now: u64,
    events: &mut Vec<GameEvent>,
) {
    for item in items.iter_mut() {
        if let Some(event) = item.try_collect(player) {
            events.push(event);
        }
        item.animate(now);
    }
    items.retain(|item| !item.collected);
}
