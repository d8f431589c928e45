use super::BaseContainer;
use crate::state::{ObjectId, StorageOwner, World};

/// Where an object container's inventory lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectSource {
    /// The object carries the storage itself (a chest).
    Own,
    /// The object embeds another object that carries it (furniture with a drawer).
    Held(ObjectId),
}

/// Storage attached to an object.
///
/// Position and ModData come from the object; items and the mutex from
/// whichever object actually carries the storage.
#[derive(Clone, Debug)]
pub struct ObjectContainer {
    object: ObjectId,
    source: ObjectSource,
    base: BaseContainer,
}

impl ObjectContainer {
    pub fn new(object: ObjectId, source: ObjectSource, base: BaseContainer) -> Self {
        Self {
            object,
            source,
            base,
        }
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn source(&self) -> ObjectSource {
        self.source
    }

    /// Object whose inventory this container reads.
    pub fn storage_object(&self) -> ObjectId {
        match self.source {
            ObjectSource::Own => self.object,
            ObjectSource::Held(held) => held,
        }
    }

    pub fn base(&self) -> &BaseContainer {
        &self.base
    }

    pub(super) fn key(&self) -> StorageOwner {
        StorageOwner::Object(self.storage_object())
    }

    pub(super) fn data_owner(&self) -> StorageOwner {
        StorageOwner::Object(self.object)
    }

    pub(super) fn is_alive(&self, world: &World) -> bool {
        let Some(state) = world.object(self.object) else {
            return false;
        };
        let attached = match self.source {
            ObjectSource::Own => true,
            ObjectSource::Held(held) => state.held() == Some(held),
        };
        attached && world.is_alive(self.key())
    }
}
