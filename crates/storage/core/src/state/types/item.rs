use super::ObjectId;

/// A stack of identical items sitting in an inventory slot.
///
/// An item that is itself a storage (a chest carried in a backpack, a chest
/// placed inside another chest) keeps a reference to the object that owns the
/// nested inventory in `storage`. Such items never stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    /// Qualified item id, also the type key for data lookups.
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub max_stack: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub context_tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub storage: Option<ObjectId>,
}

impl ItemStack {
    pub const DEFAULT_MAX_STACK: u32 = 999;

    pub fn new(item_id: impl Into<String>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            quantity,
            max_stack: Self::DEFAULT_MAX_STACK,
            context_tags: Vec::new(),
            storage: None,
        }
    }

    /// The single-slot item representing a storage object inside an inventory.
    pub fn storage_item(item_id: impl Into<String>, name: impl Into<String>, object: ObjectId) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            quantity: 1,
            max_stack: 1,
            context_tags: Vec::new(),
            storage: Some(object),
        }
    }

    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = max_stack.max(1);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    pub fn has_context_tag(&self, tag: &str) -> bool {
        self.context_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether `other` can be merged into this stack.
    pub fn can_stack_with(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id
            && self.storage.is_none()
            && other.storage.is_none()
            && self.max_stack > 1
    }

    /// Free room left in this stack.
    pub fn space(&self) -> u32 {
        self.max_stack.saturating_sub(self.quantity)
    }
}
