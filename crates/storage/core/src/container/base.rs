use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::options::{ChildStorageOptions, StorageOptionValues, StorageOptions};
use crate::state::ModData;

/// State shared by every leaf container: its per-type options layer and the
/// lazily built instance layer read from ModData.
///
/// The instance layer is tagged with the [`World::mod_data_revision`] it was
/// built at and is rebuilt once the world reports a different revision, so a
/// write through any handle reaches every other handle on its next read.
///
/// [`World::mod_data_revision`]: crate::state::World::mod_data_revision
#[derive(Clone)]
pub struct BaseContainer {
    type_options: Rc<dyn StorageOptions>,
    options: RefCell<Option<(u64, Rc<ChildStorageOptions>)>>,
    resize_active: bool,
}

impl BaseContainer {
    pub fn new(type_options: Rc<dyn StorageOptions>, resize_active: bool) -> Self {
        Self {
            type_options,
            options: RefCell::new(None),
            resize_active,
        }
    }

    pub fn type_options(&self) -> &Rc<dyn StorageOptions> {
        &self.type_options
    }

    /// Whether capacity overrides apply to this container.
    pub fn resize_active(&self) -> bool {
        self.resize_active
    }

    /// Instance layer over the type layer, rebuilt when `revision` moves on.
    pub(crate) fn options(&self, mod_data: &ModData, revision: u64) -> Rc<dyn StorageOptions> {
        let cached = self
            .options
            .borrow()
            .as_ref()
            .filter(|(built_at, _)| *built_at == revision)
            .map(|(_, options)| Rc::clone(options));
        if let Some(options) = cached {
            return options as Rc<dyn StorageOptions>;
        }

        let type_options = Rc::clone(&self.type_options);
        let options = Rc::new(ChildStorageOptions::new(
            Rc::new(move || Rc::clone(&type_options)),
            StorageOptionValues::from_mod_data(mod_data),
        ));
        *self.options.borrow_mut() = Some((revision, Rc::clone(&options)));
        options
    }

    /// Drops the cached instance layer; the next read rebuilds it.
    pub(crate) fn invalidate(&self) {
        self.options.borrow_mut().take();
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.options.borrow().is_some()
    }
}

impl fmt::Debug for BaseContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseContainer")
            .field("type_options", &self.type_options)
            .field("cached", &self.is_cached())
            .field("resize_active", &self.resize_active)
            .finish()
    }
}
