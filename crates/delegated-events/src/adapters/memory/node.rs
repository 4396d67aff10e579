//! In-memory element nodes

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::domain::{Anchored, Callback};
use crate::error::EventError;

/// Which registration mechanisms a node offers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerSupport {
    pub standard: bool,
    pub legacy: bool,
}

impl ListenerSupport {
    pub const BOTH: Self = Self {
        standard: true,
        legacy: true,
    };
    pub const LEGACY_ONLY: Self = Self {
        standard: false,
        legacy: true,
    };
    pub const NONE: Self = Self {
        standard: false,
        legacy: false,
    };
}

impl Default for ListenerSupport {
    fn default() -> Self {
        Self::BOTH
    }
}

pub(crate) struct Registration {
    pub(crate) event_type: String,
    pub(crate) listener: Callback<Node>,
    pub(crate) capture: bool,
}

struct NodeData {
    tag: String,
    id: RefCell<Option<String>>,
    classes: RefCell<Vec<String>>,
    parent: RefCell<Weak<NodeData>>,
    children: RefCell<Vec<Node>>,
    support: Cell<ListenerSupport>,
    listeners: RefCell<Vec<Registration>>,
    legacy_listeners: RefCell<Vec<Registration>>,
}

/// Shared handle to an element. Clones refer to the same element.
///
/// Parents own their children; a child only holds a weak link back up. A
/// node's ancestors therefore stay in the tree only while something else
/// keeps the root alive (a [`super::MemoryDocument`] or a caller's handle).
#[derive(Clone)]
pub struct Node(Rc<NodeData>);

impl Node {
    /// Detached element with the given tag name (lowercased)
    pub fn element(tag: &str) -> Self {
        Self(Rc::new(NodeData {
            tag: tag.to_lowercase(),
            id: RefCell::new(None),
            classes: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            support: Cell::new(ListenerSupport::default()),
            listeners: RefCell::new(Vec::new()),
            legacy_listeners: RefCell::new(Vec::new()),
        }))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.set_id(Some(id));
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn id(&self) -> Option<String> {
        self.0.id.borrow().clone()
    }

    pub fn set_id(&self, id: Option<&str>) {
        *self.0.id.borrow_mut() = id.map(str::to_string);
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.classes.borrow().clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.classes.borrow_mut().push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().retain(|c| c != class);
    }

    pub fn parent(&self) -> Option<Node> {
        self.0.parent.borrow().upgrade().map(Node)
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.children.borrow().clone()
    }

    /// Append `child` as last child, detaching it from any previous parent
    ///
    /// Fails with [`EventError::HierarchyRequest`] when `child` is this node
    /// or one of its ancestors; the tree is left unchanged.
    pub fn append_child(&self, child: &Node) -> Result<(), EventError> {
        if child.contains(self) {
            return Err(EventError::HierarchyRequest {
                parent: format!("{self:?}"),
                child: format!("{child:?}"),
            });
        }
        self.attach(child);
        Ok(())
    }

    pub(crate) fn attach(&self, child: &Node) {
        child.remove();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Detach `child`; false if it was not a child of this node
    pub fn remove_child(&self, child: &Node) -> bool {
        let mut children = self.0.children.borrow_mut();
        let Some(pos) = children.iter().position(|c| c == child) else {
            return false;
        };
        children.remove(pos);
        *child.0.parent.borrow_mut() = Weak::new();
        true
    }

    /// Detach this node from its parent
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    /// Parent first, root last
    pub fn ancestors(&self) -> Vec<Node> {
        let mut ancestors = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            ancestors.push(node);
        }
        ancestors
    }

    /// All descendants in tree order, excluding this node
    pub fn descendants(&self) -> Vec<Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Node> = self.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children().into_iter().rev());
            out.push(node);
        }
        out
    }

    /// Whether `other` is this node or one of its descendants
    pub fn contains(&self, other: &Node) -> bool {
        other == self || other.ancestors().iter().any(|a| a == self)
    }

    pub fn listener_support(&self) -> ListenerSupport {
        self.0.support.get()
    }

    pub fn set_listener_support(&self, support: ListenerSupport) {
        self.0.support.set(support);
    }

    /// Standard plus legacy listeners registered for `event_type`
    pub fn listener_count(&self, event_type: &str) -> usize {
        let legacy_name = format!("{}{}", crate::LEGACY_HANDLER_PREFIX, event_type);
        let standard = self
            .0
            .listeners
            .borrow()
            .iter()
            .filter(|r| r.event_type == event_type)
            .count();
        let legacy = self
            .0
            .legacy_listeners
            .borrow()
            .iter()
            .filter(|r| r.event_type == legacy_name)
            .count();
        standard + legacy
    }

    pub(crate) fn add_listener(&self, legacy: bool, event_type: &str, listener: &Callback<Node>, capture: bool) {
        let mut list = self.registrations(legacy).borrow_mut();
        let exists = list.iter().any(|r| {
            r.event_type == event_type && r.capture == capture && r.listener.same_as(listener)
        });
        if !exists {
            list.push(Registration {
                event_type: event_type.to_string(),
                listener: listener.clone(),
                capture,
            });
        }
    }

    pub(crate) fn remove_listener(&self, legacy: bool, event_type: &str, listener: &Callback<Node>, capture: bool) {
        self.registrations(legacy).borrow_mut().retain(|r| {
            !(r.event_type == event_type && r.capture == capture && r.listener.same_as(listener))
        });
    }

    pub(crate) fn has_listener(&self, legacy: bool, event_type: &str, listener: &Callback<Node>, capture: bool) -> bool {
        self.registrations(legacy).borrow().iter().any(|r| {
            r.event_type == event_type && r.capture == capture && r.listener.same_as(listener)
        })
    }

    /// Listeners for `event_type` at the time of the call
    pub(crate) fn snapshot(&self, legacy: bool, event_type: &str, capture: Option<bool>) -> Vec<(Callback<Node>, bool)> {
        self.registrations(legacy)
            .borrow()
            .iter()
            .filter(|r| r.event_type == event_type && capture.map_or(true, |c| r.capture == c))
            .map(|r| (r.listener.clone(), r.capture))
            .collect()
    }

    fn registrations(&self, legacy: bool) -> &RefCell<Vec<Registration>> {
        if legacy {
            &self.0.legacy_listeners
        } else {
            &self.0.listeners
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl Anchored for Node {
    fn anchor(&self) -> Weak<dyn Any> {
        let weak: Weak<NodeData> = Rc::downgrade(&self.0);
        weak
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag())?;
        if let Some(id) = self.id() {
            write!(f, " id=\"{id}\"")?;
        }
        let classes = self.classes();
        if !classes.is_empty() {
            write!(f, " class=\"{}\"", classes.join(" "))?;
        }
        f.write_str(">")
    }
}
