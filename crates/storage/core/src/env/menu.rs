use crate::state::{FarmerId, StorageOwner};

/// Sound cue played when a storage menu opens with sound.
pub const OPEN_CHEST_SOUND: &str = "openChest";

/// Request to open the item menu of a storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuRequest {
    /// Storage whose items the menu shows.
    pub target: StorageOwner,
    pub farmer: FarmerId,
    pub sound: Option<&'static str>,
}

/// Menu surface. Rendering is entirely up to the implementation.
pub trait MenuOracle {
    fn show_menu(&self, request: MenuRequest);
}
