//! Uniform handle over storage-bearing entities.
//!
//! A [`Container`] never owns the entity it describes; it holds ids into the
//! [`World`] registry and checks liveness before every access. Every accessor
//! returns [`StorageError::StaleReference`] once the entity is gone.
mod base;
mod building;
mod child;
mod error;
mod farmer;
mod fridge;
mod object;

use std::rc::Rc;

use strum::{AsRefStr, Display};

use crate::env::{MenuRequest, OPEN_CHEST_SOUND, StorageEnv, keys};
use crate::options::{StorageOptionValues, StorageOptions};
use crate::policy::{Reach, effective_capacity};
use crate::state::{
    FarmerId, ItemStack, LocationId, ModData, MutexGuard, NetMutex, StorageOwner, Tile, World,
};

pub use base::BaseContainer;
pub use building::BuildingContainer;
pub use child::ChildContainer;
pub use error::StorageError;
pub use farmer::FarmerContainer;
pub use fridge::FridgeContainer;
pub use object::{ObjectContainer, ObjectSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ContainerKind {
    Object,
    Building,
    Fridge,
    Farmer,
    Child,
}

/// Result of [`Container::try_add`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    /// True when at least part of the stack moved in.
    pub added: bool,
    /// What did not fit, if anything.
    pub remainder: Option<ItemStack>,
}

impl AddOutcome {
    fn new(offered: u32, remainder: Option<ItemStack>) -> Self {
        let added = remainder
            .as_ref()
            .is_none_or(|rest| rest.quantity != offered);
        Self { added, remainder }
    }

    pub fn is_partial(&self) -> bool {
        self.added && self.remainder.is_some()
    }
}

/// The pieces of a leaf container every operation needs.
struct Facet<'c> {
    /// Owner of the inventory and mutex.
    key: StorageOwner,
    /// Owner of the ModData and of the physical position.
    data_owner: StorageOwner,
    base: &'c BaseContainer,
}

#[derive(Clone, Debug)]
pub enum Container {
    Object(ObjectContainer),
    Building(BuildingContainer),
    Fridge(FridgeContainer),
    Farmer(FarmerContainer),
    Child(ChildContainer),
}

impl Container {
    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::Object(_) => ContainerKind::Object,
            Self::Building(_) => ContainerKind::Building,
            Self::Fridge(_) => ContainerKind::Fridge,
            Self::Farmer(_) => ContainerKind::Farmer,
            Self::Child(_) => ContainerKind::Child,
        }
    }

    /// True for a player's own inventory (not for storages carried in it).
    pub fn is_farmer(&self) -> bool {
        matches!(self, Self::Farmer(_))
    }

    /// Outermost non-child container. A leaf is its own parent.
    pub fn parent(&self) -> &Container {
        match self {
            Self::Child(child) => child.parent(),
            _ => self,
        }
    }

    /// Innermost non-child container. A leaf is its own child.
    pub fn child(&self) -> &Container {
        match self {
            Self::Child(child) => child.child(),
            _ => self,
        }
    }

    fn facet(&self) -> Facet<'_> {
        match self {
            Self::Object(c) => Facet {
                key: c.key(),
                data_owner: c.data_owner(),
                base: c.base(),
            },
            Self::Building(c) => Facet {
                key: c.key(),
                data_owner: c.key(),
                base: c.base(),
            },
            Self::Fridge(c) => Facet {
                key: c.key(),
                data_owner: c.key(),
                base: c.base(),
            },
            Self::Farmer(c) => Facet {
                key: c.key(),
                data_owner: c.key(),
                base: c.base(),
            },
            Self::Child(c) => c.child().facet(),
        }
    }

    /// Identity of the storage being interacted with. Containers with equal
    /// keys are views of the same storage.
    pub fn storage_key(&self) -> StorageOwner {
        self.facet().key
    }

    pub fn is_alive(&self, world: &World) -> bool {
        match self {
            Self::Object(c) => c.is_alive(world),
            Self::Building(c) => c.is_alive(world),
            Self::Fridge(c) => c.is_alive(world),
            Self::Farmer(c) => c.is_alive(world),
            Self::Child(c) => c.direct_parent().is_alive(world) && c.direct_child().is_alive(world),
        }
    }

    fn ensure_alive(&self, world: &World) -> Result<(), StorageError> {
        if self.is_alive(world) {
            Ok(())
        } else {
            Err(StorageError::StaleReference {
                owner: self.storage_key(),
            })
        }
    }

    fn stale(&self) -> StorageError {
        StorageError::StaleReference {
            owner: self.storage_key(),
        }
    }

    pub fn display_name(&self, world: &World, env: &StorageEnv<'_>) -> Result<String, StorageError> {
        self.ensure_alive(world)?;
        if let Self::Farmer(farmer) = self.child() {
            return world
                .farmer(farmer.farmer())
                .map(|state| state.name.clone())
                .ok_or_else(|| self.stale());
        }
        let text = env.text()?;
        Ok(self.options(world)?.display_name(text))
    }

    pub fn description(&self, world: &World, env: &StorageEnv<'_>) -> Result<String, StorageError> {
        self.ensure_alive(world)?;
        let text = env.text()?;
        if matches!(self.child(), Self::Farmer(_)) {
            return Ok(text.translate_or_key(keys::FARMER_DESCRIPTION));
        }
        Ok(self.options(world)?.description(text))
    }

    /// Instance options layered over the type options. Cached until ModData
    /// is written through any handle.
    pub fn options(&self, world: &World) -> Result<Rc<dyn StorageOptions>, StorageError> {
        self.ensure_alive(world)?;
        let facet = self.facet();
        let mod_data = world.mod_data(facet.data_owner).ok_or_else(|| self.stale())?;
        Ok(facet.base.options(mod_data, world.mod_data_revision()))
    }

    pub fn items<'w>(&self, world: &'w World) -> Result<&'w [ItemStack], StorageError> {
        self.ensure_alive(world)?;
        world
            .inventory(self.storage_key())
            .map(|inventory| inventory.items())
            .ok_or_else(|| self.stale())
    }

    /// Effective slot count, with capacity overrides applied to chest-backed
    /// storages while resizing is active.
    pub fn capacity(&self, world: &World) -> Result<u32, StorageError> {
        self.ensure_alive(world)?;
        let leaf = self.child();
        let facet = leaf.facet();
        let inventory = world.inventory(facet.key).ok_or_else(|| self.stale())?;
        let natural = inventory.natural_capacity();

        if leaf.is_farmer() || !facet.base.resize_active() {
            return Ok(natural);
        }
        let options = self.options(world)?;
        Ok(effective_capacity(
            options.resize_chest(),
            options.resize_chest_capacity(),
            inventory.len(),
            natural,
        ))
    }

    /// Physical position, taken from the outermost parent.
    pub fn position(&self, world: &World) -> Result<(LocationId, Tile), StorageError> {
        self.ensure_alive(world)?;
        world
            .owner_position(self.parent().facet().data_owner)
            .ok_or(StorageError::NotPlaced {
                owner: self.storage_key(),
            })
    }

    pub fn location(&self, world: &World) -> Result<LocationId, StorageError> {
        self.position(world).map(|(location, _)| location)
    }

    pub fn tile_location(&self, world: &World) -> Result<Tile, StorageError> {
        self.position(world).map(|(_, tile)| tile)
    }

    /// Position plus the farmer carrying this storage, for range checks.
    pub fn reach(&self, world: &World) -> Result<Reach, StorageError> {
        let (location, tile) = self.position(world)?;
        Ok(Reach {
            location,
            tile,
            carrier: world.carrier(self.facet().data_owner),
        })
    }

    pub fn mod_data<'w>(&self, world: &'w World) -> Result<&'w ModData, StorageError> {
        self.ensure_alive(world)?;
        world
            .mod_data(self.facet().data_owner)
            .ok_or_else(|| self.stale())
    }

    /// Mutable ModData. Drops this container's cached options.
    pub fn mod_data_mut<'w>(&self, world: &'w mut World) -> Result<&'w mut ModData, StorageError> {
        self.ensure_alive(world)?;
        let facet = self.facet();
        facet.base.invalidate();
        let owner = facet.data_owner;
        world
            .mod_data_mut(owner)
            .ok_or(StorageError::StaleReference { owner })
    }

    /// Applies `update` to the instance option values and persists them.
    pub fn update_options(
        &self,
        world: &mut World,
        update: impl FnOnce(&mut StorageOptionValues),
    ) -> Result<(), StorageError> {
        let mod_data = self.mod_data_mut(world)?;
        let mut values = StorageOptionValues::from_mod_data(mod_data);
        update(&mut values);
        values.write_to(mod_data);
        Ok(())
    }

    /// Exclusive-access token, absent for single-actor storage.
    pub fn mutex<'w>(&self, world: &'w World) -> Result<Option<&'w NetMutex>, StorageError> {
        self.ensure_alive(world)?;
        Ok(world.mutex(self.storage_key()))
    }

    /// Acquires the mutex for `farmer`. Storage without a mutex yields
    /// `Ok(None)` and is always safe to use.
    pub fn lock(&self, world: &World, farmer: FarmerId) -> Result<Option<MutexGuard>, StorageError> {
        let Some(mutex) = self.mutex(world)? else {
            return Ok(None);
        };
        mutex
            .try_lock(farmer)
            .map(Some)
            .map_err(|holder| StorageError::Contended {
                owner: self.storage_key(),
                holder,
            })
    }

    /// Visits items in slot order until `visit` returns false.
    pub fn for_each_item(
        &self,
        world: &World,
        mut visit: impl FnMut(&ItemStack) -> bool,
    ) -> Result<(), StorageError> {
        for item in self.items(world)? {
            if !visit(item) {
                break;
            }
        }
        Ok(())
    }

    /// Opens the item menu while holding the mutex.
    pub fn show_menu(
        &self,
        world: &World,
        env: &StorageEnv<'_>,
        farmer: FarmerId,
        play_sound: bool,
    ) -> Result<(), StorageError> {
        let menu = env.menu()?;
        let _guard = self.lock(world, farmer)?;
        menu.show_menu(MenuRequest {
            target: self.storage_key(),
            farmer,
            sound: play_sound.then_some(OPEN_CHEST_SOUND),
        });
        Ok(())
    }

    /// Adds as much of `item` as the effective capacity allows.
    pub fn try_add(&self, world: &mut World, item: ItemStack) -> Result<AddOutcome, StorageError> {
        let capacity = self.capacity(world)?;
        let offered = item.quantity;
        let remainder = world.insert_item(self.storage_key(), item, capacity)?;
        Ok(AddOutcome::new(offered, remainder))
    }

    /// Removes the slot equal to `item`. False when no such slot exists.
    pub fn try_remove(&self, world: &mut World, item: &ItemStack) -> Result<bool, StorageError> {
        self.ensure_alive(world)?;
        Ok(world.remove_item(self.storage_key(), item)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{DataOracle, Env, MenuOracle, TextOracle};
    use crate::options::{ChestMenuOption, DefaultStorageOptions, StorageOptionValues};
    use crate::state::{LocationKind, ObjectKind, ObjectState};
    use std::cell::RefCell;

    struct Oracles {
        menus: RefCell<Vec<MenuRequest>>,
    }

    impl TextOracle for Oracles {
        fn parse_tokens(&self, raw: &str) -> String {
            raw.to_owned()
        }

        fn translate(&self, _key: &str) -> Option<String> {
            None
        }
    }

    impl MenuOracle for Oracles {
        fn show_menu(&self, request: MenuRequest) {
            self.menus.borrow_mut().push(request);
        }
    }

    impl DataOracle for Oracles {
        fn big_craftable(&self, _item_id: &str) -> Option<crate::env::BigCraftableData> {
            None
        }

        fn building(&self, _building_type: &str) -> Option<crate::env::BuildingData> {
            None
        }

        fn location(&self, _name: &str) -> Option<crate::env::LocationData> {
            None
        }
    }

    fn oracles() -> Oracles {
        Oracles {
            menus: RefCell::new(Vec::new()),
        }
    }

    fn base(values: StorageOptionValues) -> BaseContainer {
        BaseContainer::new(Rc::new(DefaultStorageOptions::new(values)), true)
    }

    fn resizable() -> StorageOptionValues {
        StorageOptionValues {
            resize_chest: ChestMenuOption::Large,
            resize_chest_capacity: 12,
            storage_name: "Chest".into(),
            ..StorageOptionValues::default()
        }
    }

    fn placed_chest(world: &mut World, location: LocationId, tile: Tile) -> Container {
        let id = world
            .add_object(ObjectState::new("(BC)130", "Chest", ObjectKind::Standard).with_storage(9))
            .unwrap();
        world.place_object(id, location, tile).unwrap();
        Container::Object(ObjectContainer::new(id, ObjectSource::Own, base(resizable())))
    }

    #[test]
    fn removed_entity_reports_stale_reference() {
        let mut world = World::new();
        let farm = world.add_location("Farm", LocationKind::Regular).unwrap();
        let chest = placed_chest(&mut world, farm, Tile::new(1, 1));
        let Container::Object(inner) = &chest else {
            unreachable!()
        };
        assert_eq!(chest.capacity(&world), Ok(12));

        world.remove_object(inner.object()).unwrap();

        assert!(!chest.is_alive(&world));
        assert!(chest.items(&world).unwrap_err().is_stale());
        assert!(chest.capacity(&world).unwrap_err().is_stale());
        assert!(chest.mutex(&world).unwrap_err().is_stale());
    }

    #[test]
    fn try_add_reports_partial_adds_against_effective_capacity() {
        let mut world = World::new();
        let farm = world.add_location("Farm", LocationKind::Regular).unwrap();
        let chest = placed_chest(&mut world, farm, Tile::new(0, 0));
        chest
            .update_options(&mut world, |values| values.resize_chest_capacity = 2)
            .unwrap();
        assert_eq!(chest.capacity(&world), Ok(2));

        let wood = chest
            .try_add(&mut world, ItemStack::new("(O)388", "Wood", 250).with_max_stack(100))
            .unwrap();
        assert!(wood.is_partial());
        assert_eq!(wood.remainder.map(|rest| rest.quantity), Some(50));

        let stone = chest
            .try_add(&mut world, ItemStack::new("(O)390", "Stone", 1))
            .unwrap();
        assert!(!stone.added);
        assert_eq!(stone.remainder.map(|rest| rest.quantity), Some(1));
        assert_eq!(chest.items(&world).unwrap().len(), 2);
    }

    #[test]
    fn try_remove_only_removes_present_items() {
        let mut world = World::new();
        let farm = world.add_location("Farm", LocationKind::Regular).unwrap();
        let chest = placed_chest(&mut world, farm, Tile::new(0, 0));
        let wood = ItemStack::new("(O)388", "Wood", 5);
        chest.try_add(&mut world, wood.clone()).unwrap();

        assert_eq!(chest.try_remove(&mut world, &wood), Ok(true));
        assert_eq!(chest.try_remove(&mut world, &wood), Ok(false));
        assert!(chest.items(&world).unwrap().is_empty());
    }

    #[test]
    fn writing_mod_data_rebuilds_cached_options() {
        let mut world = World::new();
        let farm = world.add_location("Farm", LocationKind::Regular).unwrap();
        let chest = placed_chest(&mut world, farm, Tile::new(0, 0));
        let oracles = oracles();
        let env: StorageEnv<'_> = Env::new(
            Some(&oracles as &dyn DataOracle),
            Some(&oracles as &dyn TextOracle),
            Some(&oracles as &dyn MenuOracle),
        );
        assert_eq!(chest.display_name(&world, &env).unwrap(), "Chest");

        chest
            .update_options(&mut world, |values| values.storage_name = "Gems".into())
            .unwrap();

        assert_eq!(chest.display_name(&world, &env).unwrap(), "Gems");
        assert_eq!(
            chest.mod_data(&world).unwrap().get("storage-options/storage_name"),
            Some("Gems")
        );
    }

    #[test]
    fn writes_through_one_handle_reach_every_other_handle() {
        let mut world = World::new();
        let farm = world.add_location("Farm", LocationKind::Regular).unwrap();
        let a = placed_chest(&mut world, farm, Tile::new(0, 0));
        let b = a.clone();
        assert_eq!(a.capacity(&world), Ok(12));
        assert_eq!(b.capacity(&world), Ok(12));

        b.update_options(&mut world, |values| values.resize_chest_capacity = 3)
            .unwrap();
        assert_eq!(a.options(&world).unwrap().resize_chest_capacity(), 3);
        assert_eq!(a.capacity(&world), Ok(3));

        let Container::Object(inner) = &a else {
            unreachable!()
        };
        world
            .object_mut(inner.object())
            .unwrap()
            .mod_data
            .insert("storage-options/resize_chest_capacity", "20");
        assert_eq!(a.capacity(&world), Ok(20));
        assert_eq!(b.capacity(&world), Ok(20));
    }

    #[test]
    fn show_menu_holds_the_mutex_only_while_the_menu_opens() {
        let mut world = World::new();
        let farm = world.add_location("Farm", LocationKind::Regular).unwrap();
        let chest = placed_chest(&mut world, farm, Tile::new(0, 0));
        let oracles = oracles();
        let env: StorageEnv<'_> = Env::new(None, None, Some(&oracles as &dyn MenuOracle));

        chest.show_menu(&world, &env, FarmerId(1), true).unwrap();
        assert!(!chest.mutex(&world).unwrap().unwrap().is_locked());

        let guard = chest.lock(&world, FarmerId(2)).unwrap();
        let err = chest.show_menu(&world, &env, FarmerId(1), false).unwrap_err();
        assert_eq!(
            err,
            StorageError::Contended {
                owner: chest.storage_key(),
                holder: FarmerId(2)
            }
        );
        drop(guard);

        let menus = oracles.menus.borrow();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].sound, Some(OPEN_CHEST_SOUND));
    }

    #[test]
    fn farmer_inventory_is_named_after_its_farmer() {
        let mut world = World::new();
        let farm = world.add_location("Farm", LocationKind::Regular).unwrap();
        let abigail = world.add_farmer("Abigail", farm, Tile::new(2, 2), 12).unwrap();
        let backpack = Container::Farmer(FarmerContainer::new(
            abigail,
            BaseContainer::new(Rc::new(DefaultStorageOptions::new(resizable())), false),
        ));
        let oracles = oracles();
        let env: StorageEnv<'_> = Env::new(None, Some(&oracles as &dyn TextOracle), None);

        assert_eq!(backpack.display_name(&world, &env).unwrap(), "Abigail");
        assert_eq!(
            backpack.description(&world, &env).unwrap(),
            keys::FARMER_DESCRIPTION
        );
        assert_eq!(backpack.capacity(&world), Ok(12));
    }

    #[test]
    fn child_takes_position_from_parent_and_everything_else_from_child() {
        let mut world = World::new();
        let l1 = world.add_location("Farm", LocationKind::Regular).unwrap();
        let l2 = world.add_location("Town", LocationKind::Regular).unwrap();
        let parent = placed_chest(&mut world, l1, Tile::new(3, 4));
        let child = placed_chest(&mut world, l2, Tile::new(8, 8));
        child
            .update_options(&mut world, |values| values.storage_name = "D".into())
            .unwrap();
        let oracles = oracles();
        let env: StorageEnv<'_> = Env::new(None, Some(&oracles as &dyn TextOracle), None);

        let composite = Container::Child(ChildContainer::new(parent.clone(), child.clone()));

        assert_eq!(composite.location(&world), Ok(l1));
        assert_eq!(composite.tile_location(&world), Ok(Tile::new(3, 4)));
        assert_eq!(composite.display_name(&world, &env).unwrap(), "D");
        assert_eq!(composite.storage_key(), child.storage_key());
        assert_eq!(composite.kind(), ContainerKind::Child);
    }

    #[test]
    fn nested_children_resolve_to_their_true_endpoints() {
        let mut world = World::new();
        let farm = world.add_location("Farm", LocationKind::Regular).unwrap();
        let outer = placed_chest(&mut world, farm, Tile::new(0, 0));
        let middle = placed_chest(&mut world, farm, Tile::new(1, 0));
        let inner = placed_chest(&mut world, farm, Tile::new(2, 0));

        let left_nested = Container::Child(ChildContainer::new(
            Container::Child(ChildContainer::new(outer.clone(), middle.clone())),
            inner.clone(),
        ));
        let right_nested = Container::Child(ChildContainer::new(
            outer.clone(),
            Container::Child(ChildContainer::new(middle.clone(), inner.clone())),
        ));

        for composite in [&left_nested, &right_nested] {
            assert_eq!(composite.parent().storage_key(), outer.storage_key());
            assert_eq!(composite.child().storage_key(), inner.storage_key());
            assert_eq!(composite.tile_location(&world), Ok(Tile::new(0, 0)));
        }
    }
}
