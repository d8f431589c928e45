use super::ItemStack;

/// Ordered item slots with a natural capacity.
///
/// The natural capacity is what the underlying entity reports on its own
/// (chest size, backpack size). Capacity policies are applied on top of it by
/// the caller, which passes the effective slot limit to [`Inventory::add`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    slots: Vec<ItemStack>,
    natural_capacity: u32,
}

impl Inventory {
    pub fn new(natural_capacity: u32) -> Self {
        Self {
            slots: Vec::new(),
            natural_capacity,
        }
    }

    pub fn with_items(natural_capacity: u32, items: Vec<ItemStack>) -> Self {
        Self {
            slots: items,
            natural_capacity,
        }
    }

    pub fn natural_capacity(&self) -> u32 {
        self.natural_capacity
    }

    pub fn set_natural_capacity(&mut self, natural_capacity: u32) {
        self.natural_capacity = natural_capacity;
    }

    /// Number of occupied slots.
    pub fn len(&self) -> u32 {
        u32::try_from(self.slots.len()).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn items(&self) -> &[ItemStack] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter()
    }

    pub fn contains(&self, item: &ItemStack) -> bool {
        self.slots.iter().any(|slot| slot == item)
    }

    /// Object ids of every storage item held in this inventory.
    pub fn nested_storages(&self) -> impl Iterator<Item = super::ObjectId> + '_ {
        self.slots.iter().filter_map(|slot| slot.storage)
    }

    /// Adds `item`, merging into matching stacks first and then filling free
    /// slots up to `capacity`. Returns the portion that did not fit.
    pub fn add(&mut self, mut item: ItemStack, capacity: u32) -> Option<ItemStack> {
        if item.is_empty() {
            return None;
        }

        for slot in self.slots.iter_mut() {
            if !slot.can_stack_with(&item) {
                continue;
            }
            let moved = slot.space().min(item.quantity);
            slot.quantity += moved;
            item.quantity -= moved;
            if item.is_empty() {
                return None;
            }
        }

        while !item.is_empty() && self.len() < capacity {
            let moved = item.quantity.min(item.max_stack.max(1));
            let mut stack = item.clone();
            stack.quantity = moved;
            self.slots.push(stack);
            item.quantity -= moved;
        }

        (!item.is_empty()).then_some(item)
    }

    /// Removes the first slot equal to `item`.
    pub fn remove(&mut self, item: &ItemStack) -> bool {
        match self.slots.iter().position(|slot| slot == item) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the slot carrying the storage `object`.
    pub fn remove_storage(&mut self, object: super::ObjectId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.storage != Some(object));
        self.slots.len() != before
    }

    /// Removes up to `quantity` units of `item_id`, newest slots first.
    /// Returns how many units were taken.
    pub fn take(&mut self, item_id: &str, quantity: u32) -> u32 {
        let mut remaining = quantity;
        for slot in self.slots.iter_mut().rev() {
            if remaining == 0 {
                break;
            }
            if slot.item_id == item_id && slot.storage.is_none() {
                let taken = slot.quantity.min(remaining);
                slot.quantity -= taken;
                remaining -= taken;
            }
        }
        self.remove_empty_slots();
        quantity - remaining
    }

    pub fn remove_empty_slots(&mut self) {
        self.slots.retain(|slot| !slot.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ObjectId;

    fn wood(quantity: u32) -> ItemStack {
        ItemStack::new("(O)388", "Wood", quantity)
    }

    #[test]
    fn add_merges_into_existing_stacks_before_using_new_slots() {
        let mut inventory = Inventory::with_items(3, vec![wood(990)]);

        let remainder = inventory.add(wood(20), 3);

        assert_eq!(remainder, None);
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.items()[0].quantity, 999);
        assert_eq!(inventory.items()[1].quantity, 11);
    }

    #[test]
    fn add_returns_remainder_when_slots_run_out() {
        let mut inventory = Inventory::new(1);
        let stone = ItemStack::new("(O)390", "Stone", 150).with_max_stack(100);

        let remainder = inventory.add(stone, 1).expect("remainder");

        assert_eq!(remainder.quantity, 50);
        assert_eq!(inventory.items()[0].quantity, 100);
    }

    #[test]
    fn add_honours_capacity_above_natural_size() {
        let mut inventory = Inventory::new(1);
        assert_eq!(inventory.add(wood(1), 2), None);
        assert_eq!(inventory.add(ItemStack::new("(O)390", "Stone", 1), 2), None);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn remove_and_take_drop_empty_slots() {
        let chest = ItemStack::storage_item("(BC)130", "Chest", ObjectId(9));
        let mut inventory = Inventory::with_items(10, vec![wood(5), chest.clone(), wood(3)]);

        assert!(inventory.remove(&chest));
        assert!(!inventory.remove(&chest));
        assert_eq!(inventory.take("(O)388", 4), 4);
        assert_eq!(inventory.items(), &[wood(4)]);
        assert_eq!(inventory.nested_storages().count(), 0);
    }
}
