//! Identity assignment for targets and callbacks
//!
//! Objects are never mutated to carry their identifier. Instead each object
//! exposes a weak handle to its backing allocation ([`Anchored`]) and the
//! [`IdentityMap`] keys on that allocation's address. The stored weak handle
//! keeps the allocation reserved, so an address cannot be reused by another
//! object while its slot exists.

use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Weak;

/// Process-unique identifier of a target or callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetId(u64);

impl TargetId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An object whose identity is its backing `Rc` allocation
pub trait Anchored {
    /// Weak handle to the allocation that identifies this object
    fn anchor(&self) -> Weak<dyn Any>;
}

fn address_of(anchor: &Weak<dyn Any>) -> usize {
    anchor.as_ptr().cast::<()>() as usize
}

/// True if both handles point at the same object
pub fn same_object(a: &impl Anchored, b: &impl Anchored) -> bool {
    address_of(&a.anchor()) == address_of(&b.anchor())
}

struct Slot {
    anchor: Weak<dyn Any>,
    id: TargetId,
}

/// Lazily assigns identifiers from one counter starting at 1
pub struct IdentityMap {
    next: u64,
    slots: HashMap<usize, Slot>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self {
            next: 1,
            slots: HashMap::new(),
        }
    }

    /// Identifier of `obj`, assigning the next one on first sight
    pub fn identity_of(&mut self, obj: &impl Anchored) -> TargetId {
        let anchor = obj.anchor();
        let key = address_of(&anchor);
        if let Some(slot) = self.slots.get(&key) {
            return slot.id;
        }

        let id = TargetId(self.next);
        self.next += 1;
        self.slots.insert(key, Slot { anchor, id });
        id
    }

    /// Identifier of `obj` if one was already assigned
    pub fn peek(&self, obj: &impl Anchored) -> Option<TargetId> {
        self.slots.get(&address_of(&obj.anchor())).map(|slot| slot.id)
    }

    /// Drop slots whose object is gone, returning their identifiers
    pub fn prune(&mut self) -> Vec<TargetId> {
        let mut dead = Vec::new();
        self.slots.retain(|_, slot| {
            let alive = slot.anchor.strong_count() > 0;
            if !alive {
                dead.push(slot.id);
            }
            alive
        });
        dead
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for IdentityMap {
    fn default() -> Self {
        Self::new()
    }
}
