//! Classification of raw world handles into containers.
//!
//! [`ContainerFactory`] is the only place that decides which container
//! variant an entity maps to. Features ask it for one container or for every
//! container matching a predicate and never test entity kinds themselves.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use crate::config::StorageConfig;
use crate::container::{
    BaseContainer, BuildingContainer, ChildContainer, Container, FarmerContainer,
    FridgeContainer, ObjectContainer, ObjectSource,
};
use crate::env::{BigCraftableData, BuildingData, StorageEnv};
use crate::options::{
    BigCraftableStorageOptions, BuildingStorageOptions, DefaultStorageOptions,
    LocationStorageOptions, StorageOptions, provider_of,
};
use crate::state::{
    BuildingId, FarmerId, ItemStack, LocationId, ObjectId, Placement, StorageOwner, World,
};

/// Something a caller holds that may or may not be a storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawHandle<'h> {
    Object(ObjectId),
    Building(BuildingId),
    /// A location stands for its fridge.
    Location(LocationId),
    Farmer(FarmerId),
    /// An inventory item; only storage items classify.
    Item(&'h ItemStack),
}

/// Memoization key of the per-type options layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum TypeKey {
    BigCraftable(String),
    Building(String),
    Location(String),
}

/// Builds containers from world handles.
pub struct ContainerFactory<'a> {
    env: StorageEnv<'a>,
    config: &'a StorageConfig,
    global: Rc<DefaultStorageOptions>,
    type_options: RefCell<HashMap<TypeKey, Rc<dyn StorageOptions>>>,
}

impl<'a> ContainerFactory<'a> {
    pub fn new(env: StorageEnv<'a>, config: &'a StorageConfig) -> Self {
        Self {
            env,
            config,
            global: Rc::new(DefaultStorageOptions::new(config.default_options.clone())),
            type_options: RefCell::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &'a StorageConfig {
        self.config
    }

    pub fn env(&self) -> &StorageEnv<'a> {
        &self.env
    }

    /// Root layer shared by every container.
    pub fn global_options(&self) -> Rc<dyn StorageOptions> {
        Rc::clone(&self.global) as Rc<dyn StorageOptions>
    }

    /// Classifies `handle`. `None` when it is not a live storage.
    pub fn try_get_one(&self, world: &World, handle: RawHandle<'_>) -> Option<Container> {
        let container = match handle {
            RawHandle::Object(id) => self.classify_object(world, id, 0),
            RawHandle::Item(item) => item
                .storage
                .and_then(|id| self.classify_object(world, id, 0)),
            RawHandle::Building(id) => self.building_container(world, id),
            RawHandle::Location(id) => self.fridge_container(world, id),
            RawHandle::Farmer(id) => self.farmer_container(world, id),
        };
        if container.is_none() {
            tracing::trace!(?handle, "handle is not a storage");
        }
        container
    }

    /// Lazily walks every storage in the world, yielding each at most once.
    ///
    /// Roots are visited location by location (fridge, buildings, placed
    /// objects) and then farmer by farmer; storages found inside a yielded
    /// container's items follow as child containers.
    pub fn get_all<'s, P>(&'s self, world: &'s World, predicate: P) -> ContainerWalk<'s, 'a, P>
    where
        P: FnMut(&Container) -> bool,
    {
        let mut roots = Vec::new();
        for (id, location) in world.locations() {
            roots.push(Root::Location(id));
            roots.extend(location.buildings().iter().copied().map(Root::Building));
            roots.extend(location.objects().map(|(_, object)| Root::Object(object)));
        }
        roots.extend(world.farmers().map(|(id, _)| Root::Farmer(id)));

        ContainerWalk {
            factory: self,
            world,
            predicate,
            roots: roots.into_iter(),
            pending: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    fn classify_object(&self, world: &World, id: ObjectId, depth: usize) -> Option<Container> {
        if depth > World::MAX_NESTING_DEPTH {
            tracing::warn!(object = %id, "storage nesting too deep");
            return None;
        }
        let state = world.object(id)?;
        match state.placement() {
            Placement::Held { host } => {
                let container = self.classify_object(world, host, depth + 1)?;
                (container.storage_key() == StorageOwner::Object(id)).then_some(container)
            }
            Placement::Stored { owner } => {
                let child = self.object_container(world, id)?;
                let parent = self.classify_owner(world, owner, depth + 1)?;
                Some(Container::Child(ChildContainer::new(parent, child)))
            }
            Placement::Tile { .. } | Placement::Loose => self.object_container(world, id),
        }
    }

    fn classify_owner(&self, world: &World, owner: StorageOwner, depth: usize) -> Option<Container> {
        match owner {
            StorageOwner::Object(id) => self.classify_object(world, id, depth),
            StorageOwner::Building(id) => self.building_container(world, id),
            StorageOwner::Fridge(id) => self.fridge_container(world, id),
            StorageOwner::Farmer(id) => self.farmer_container(world, id),
        }
    }

    /// Container for an object carrying storage itself or through the
    /// object it holds.
    fn object_container(&self, world: &World, id: ObjectId) -> Option<Container> {
        let state = world.object(id)?;
        let source = if state.storage.is_some() {
            ObjectSource::Own
        } else {
            let held = state.held()?;
            world.object(held)?.storage.as_ref()?;
            ObjectSource::Held(held)
        };

        let key = TypeKey::BigCraftable(state.item_id.clone());
        let cached = self.type_options.borrow().get(&key).cloned();
        let type_options: Rc<dyn StorageOptions> = match cached {
            Some(options) => options,
            None => match self
                .env
                .data()
                .ok()
                .and_then(|data| data.big_craftable(&state.item_id))
            {
                Some(data) => self.memoized(key, || {
                    Rc::new(BigCraftableStorageOptions::new(
                        provider_of(Rc::clone(&self.global)),
                        data,
                    ))
                }),
                // Untitled layers carry the object's own name, so they are never shared.
                None => {
                    tracing::debug!(item_id = %state.item_id, "no big craftable data");
                    Rc::new(BigCraftableStorageOptions::new(
                        provider_of(Rc::clone(&self.global)),
                        BigCraftableData::untitled(state.name.clone()),
                    ))
                }
            },
        };
        let base = BaseContainer::new(type_options, self.config.resize_chest_active());
        Some(Container::Object(ObjectContainer::new(id, source, base)))
    }

    fn building_container(&self, world: &World, id: BuildingId) -> Option<Container> {
        let state = world.building(id)?;
        state.storage.as_ref()?;
        let type_options = self.memoized(TypeKey::Building(state.building_type.clone()), || {
            let data = self
                .env
                .data()
                .ok()
                .and_then(|data| data.building(&state.building_type))
                .unwrap_or_else(|| {
                    tracing::debug!(building_type = %state.building_type, "no building data");
                    BuildingData::untitled(state.building_type.clone())
                });
            Rc::new(BuildingStorageOptions::new(provider_of(Rc::clone(&self.global)), data))
        });
        let base = BaseContainer::new(type_options, self.config.resize_chest_active());
        Some(Container::Building(BuildingContainer::new(id, base)))
    }

    fn fridge_container(&self, world: &World, id: LocationId) -> Option<Container> {
        let state = world.location(id)?;
        state.fridge.as_ref()?;
        let type_options = self.memoized(TypeKey::Location(state.name.clone()), || {
            let data = self
                .env
                .data()
                .ok()
                .and_then(|data| data.location(&state.name));
            Rc::new(LocationStorageOptions::new(provider_of(Rc::clone(&self.global)), data))
        });
        let base = BaseContainer::new(type_options, self.config.resize_chest_active());
        Some(Container::Fridge(FridgeContainer::new(id, base)))
    }

    fn farmer_container(&self, world: &World, id: FarmerId) -> Option<Container> {
        world.farmer(id)?;
        let base = BaseContainer::new(self.global_options(), false);
        Some(Container::Farmer(FarmerContainer::new(id, base)))
    }

    fn memoized<O, F>(&self, key: TypeKey, build: F) -> Rc<dyn StorageOptions>
    where
        O: StorageOptions + 'static,
        F: FnOnce() -> Rc<O>,
    {
        if let Some(options) = self.type_options.borrow().get(&key) {
            return Rc::clone(options);
        }
        let options: Rc<dyn StorageOptions> = build();
        self.type_options
            .borrow_mut()
            .insert(key, Rc::clone(&options));
        options
    }
}

#[derive(Clone, Copy, Debug)]
enum Root {
    Location(LocationId),
    Building(BuildingId),
    Object(ObjectId),
    Farmer(FarmerId),
}

/// Iterator returned by [`ContainerFactory::get_all`].
pub struct ContainerWalk<'s, 'a, P> {
    factory: &'s ContainerFactory<'a>,
    world: &'s World,
    predicate: P,
    roots: std::vec::IntoIter<Root>,
    pending: VecDeque<Container>,
    seen: HashSet<StorageOwner>,
}

impl<P> ContainerWalk<'_, '_, P> {
    fn next_candidate(&mut self) -> Option<Container> {
        if let Some(container) = self.pending.pop_front() {
            return Some(container);
        }
        loop {
            let handle = match self.roots.next()? {
                Root::Location(id) => RawHandle::Location(id),
                Root::Building(id) => RawHandle::Building(id),
                Root::Object(id) => RawHandle::Object(id),
                Root::Farmer(id) => RawHandle::Farmer(id),
            };
            if let Some(container) = self.factory.try_get_one(self.world, handle) {
                return Some(container);
            }
        }
    }

    /// Queues the storages inside `container`, classified the same way
    /// [`ContainerFactory::try_get_one`] would classify them.
    fn queue_nested(&mut self, container: &Container) {
        let Ok(items) = container.items(self.world) else {
            return;
        };
        let nested = items
            .iter()
            .filter_map(|item| item.storage)
            .filter_map(|object| self.factory.classify_object(self.world, object, 0));
        self.pending.extend(nested);
    }
}

impl<P> Iterator for ContainerWalk<'_, '_, P>
where
    P: FnMut(&Container) -> bool,
{
    type Item = Container;

    fn next(&mut self) -> Option<Container> {
        loop {
            let container = self.next_candidate()?;
            if !self.seen.insert(container.storage_key()) {
                continue;
            }
            self.queue_nested(&container);
            if (self.predicate)(&container) {
                return Some(container);
            }
        }
    }
}
