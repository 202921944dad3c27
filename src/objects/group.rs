//! Object groups: recursive collections of placed object instances.
//!
//! Groups form a tree (layered/conditional object sets nest inside their
//! parent). The tree is arena-backed: groups are addressed by [`GroupId`],
//! parent links are plain arena indices, and nothing is shared or
//! reference-counted, so cycles cannot form.

use crate::error::{Result, RomError};
use crate::event::{EventHandlers, Subscription};
use crate::objects::definition::ObjectDefinition;

/// Index of a group within its owning [`ObjectGroupTree`].
///
/// Ids are minted by the tree and stay valid for its whole lifetime; an id
/// is only meaningful to the tree that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

impl GroupId {
    /// The raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The role a group plays within its object list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectGroupKind {
    /// The unconditional top-level object set.
    Main,
    /// Enemy set, cleared when the room is beaten.
    Enemy,
    /// Objects present only before the room's event has triggered.
    BeforeEvent,
    /// Objects present only after the room's event has triggered.
    AfterEvent,
}

/// One node of the group tree: an ordered object list plus child groups.
#[derive(Debug)]
pub struct ObjectGroup {
    id: GroupId,
    kind: ObjectGroupKind,
    parent: Option<GroupId>,
    children: Vec<GroupId>,
    objects: Vec<ObjectDefinition>,
}

impl ObjectGroup {
    fn new(id: GroupId, kind: ObjectGroupKind, parent: Option<GroupId>) -> Self {
        Self {
            id,
            kind,
            parent,
            children: Vec::new(),
            objects: Vec::new(),
        }
    }

    /// This group's id.
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// The group's role.
    pub fn kind(&self) -> ObjectGroupKind {
        self.kind
    }

    /// The parent group, `None` for the root.
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// Direct child groups, in order.
    pub fn children(&self) -> &[GroupId] {
        &self.children
    }

    /// Number of objects in this group's own list (not recursive).
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// This group's own objects, in order.
    pub fn objects(&self) -> &[ObjectDefinition] {
        &self.objects
    }

    /// Get one object by index.
    pub fn object(&self, index: usize) -> Option<&ObjectDefinition> {
        self.objects.get(index)
    }
}

/// An arena-backed tree of object groups.
#[derive(Debug)]
pub struct ObjectGroupTree {
    nodes: Vec<ObjectGroup>,
    objects_modified: EventHandlers<()>,
}

impl ObjectGroupTree {
    /// Create a tree with a single root group.
    pub fn new(kind: ObjectGroupKind) -> Self {
        let root = ObjectGroup::new(GroupId(0), kind, None);
        Self {
            nodes: vec![root],
            objects_modified: EventHandlers::new(),
        }
    }

    /// The root group's id.
    pub fn root(&self) -> GroupId {
        GroupId(0)
    }

    /// Borrow a group.
    pub fn group(&self, id: GroupId) -> &ObjectGroup {
        &self.nodes[id.0]
    }

    /// Append a new child group under `parent`; returns its id.
    pub fn add_child(&mut self, parent: GroupId, kind: ObjectGroupKind) -> GroupId {
        let id = GroupId(self.nodes.len());
        self.nodes.push(ObjectGroup::new(id, kind, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// All groups reachable from the root, in pre-order (each group before
    /// its children's flattenings, children in list order).
    ///
    /// The sequence is materialized fresh on every call.
    pub fn all_groups(&self) -> Vec<GroupId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.flatten(self.root(), &mut out);
        out
    }

    fn flatten(&self, id: GroupId, out: &mut Vec<GroupId>) {
        out.push(id);
        for &child in &self.nodes[id.0].children {
            self.flatten(child, out);
        }
    }

    /// Number of objects in a group's own list.
    pub fn num_objects(&self, id: GroupId) -> usize {
        self.nodes[id.0].objects.len()
    }

    /// Borrow one object by `(group, index)`.
    pub fn object(&self, id: GroupId, index: usize) -> Result<&ObjectDefinition> {
        let group = &self.nodes[id.0];
        group.objects.get(index).ok_or(RomError::ObjectOutOfRange {
            index,
            len: group.objects.len(),
        })
    }

    /// Append an object to a group's list; raises objects-modified.
    ///
    /// The object's group back-reference is set to `id`. Returns the
    /// object's index within the group.
    pub fn add_object(&mut self, id: GroupId, mut object: ObjectDefinition) -> usize {
        object.set_group(id);
        let group = &mut self.nodes[id.0];
        group.objects.push(object);
        let index = group.objects.len() - 1;
        self.objects_modified.raise(&());
        index
    }

    /// Remove and return an object; later objects shift down. Raises
    /// objects-modified.
    pub fn remove_object(&mut self, id: GroupId, index: usize) -> Result<ObjectDefinition> {
        let group = &mut self.nodes[id.0];
        if index >= group.objects.len() {
            return Err(RomError::ObjectOutOfRange {
                index,
                len: group.objects.len(),
            });
        }
        let object = group.objects.remove(index);
        self.objects_modified.raise(&());
        Ok(object)
    }

    /// Move an object to a new position in place.
    ///
    /// The object keeps its `(group, index)` identity. Raises
    /// objects-modified.
    pub fn move_object(&mut self, id: GroupId, index: usize, x: u8, y: u8) -> Result<()> {
        let group = &mut self.nodes[id.0];
        let len = group.objects.len();
        let object = group
            .objects
            .get_mut(index)
            .ok_or(RomError::ObjectOutOfRange { index, len })?;
        object.set_x(x)?;
        object.set_y(y)?;
        self.objects_modified.raise(&());
        Ok(())
    }

    /// Subscribe to the tree's objects-modified event.
    pub fn subscribe_objects_modified(
        &mut self,
        handler: impl FnMut(&()) + 'static,
    ) -> Subscription {
        self.objects_modified.subscribe(handler)
    }

    /// Unsubscribe a previously registered handler.
    pub fn unsubscribe_objects_modified(&mut self, subscription: Subscription) -> bool {
        self.objects_modified.unsubscribe(subscription)
    }
}
