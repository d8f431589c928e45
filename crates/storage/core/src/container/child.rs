use super::Container;

/// Storage nested inside another storage.
///
/// The parent says where the storage physically is; the child is what gets
/// interacted with (name, options, items, ModData, mutex). Either side may be
/// a child container itself.
#[derive(Clone, Debug)]
pub struct ChildContainer {
    parent: Box<Container>,
    child: Box<Container>,
}

impl ChildContainer {
    pub fn new(parent: Container, child: Container) -> Self {
        Self {
            parent: Box::new(parent),
            child: Box::new(child),
        }
    }

    /// Outermost non-child ancestor.
    pub fn parent(&self) -> &Container {
        self.parent.parent()
    }

    /// Innermost non-child descendant.
    pub fn child(&self) -> &Container {
        self.child.child()
    }

    /// The parent exactly as composed, possibly a child container.
    pub fn direct_parent(&self) -> &Container {
        &self.parent
    }

    pub fn direct_child(&self) -> &Container {
        &self.child
    }
}
