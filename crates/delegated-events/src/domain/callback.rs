//! Listener handles
//!
//! A [`Callback`] is a shared, identity-compared handle to a listener
//! function. Clones refer to the same listener; two callbacks built from
//! identical closures are still different listeners.

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use super::event::Event;
use super::identity::Anchored;

struct Handler<N> {
    f: Box<dyn Fn(&N, &Event<N>)>,
}

/// Listener invoked with its call context (the node it fires for) and the event
pub struct Callback<N> {
    inner: Rc<Handler<N>>,
}

impl<N: 'static> Callback<N> {
    pub fn new(f: impl Fn(&N, &Event<N>) + 'static) -> Self {
        Self {
            inner: Rc::new(Handler { f: Box::new(f) }),
        }
    }

    /// Invoke the listener
    pub fn call(&self, context: &N, event: &Event<N>) {
        (self.inner.f)(context, event)
    }

    /// True if both handles refer to the same listener
    pub fn same_as(&self, other: &Callback<N>) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Non-owning handle, used by listeners that must refer to themselves
    pub fn downgrade(&self) -> WeakCallback<N> {
        WeakCallback {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<N> Clone for Callback<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<N> fmt::Debug for Callback<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.inner))
    }
}

impl<N: 'static> Anchored for Callback<N> {
    fn anchor(&self) -> Weak<dyn Any> {
        let weak: Weak<Handler<N>> = Rc::downgrade(&self.inner);
        weak
    }
}

/// Weak counterpart of [`Callback`]
pub struct WeakCallback<N> {
    inner: Weak<Handler<N>>,
}

impl<N> WeakCallback<N> {
    pub fn upgrade(&self) -> Option<Callback<N>> {
        self.inner.upgrade().map(|inner| Callback { inner })
    }
}
