//! Shared fixtures
//!
//! Builds the document used across the integration scenarios:
//!
//! ```text
//! <div id="event-test">
//!   <ul>
//!     <li class="green">hello</li>
//!     <li class="green">world</li>
//!     <li class="red">again</li>
//!     <li class="red">from</li>
//!     <li class="green">cam</li>
//!   </ul>
//! </div>
//! ```

use delegated_events::{Callback, EventRegistry, MemoryDocument, Node, RegistryConfig};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Document, registry and the nodes the scenarios poke at
pub struct Page {
    pub document: Rc<MemoryDocument>,
    pub registry: EventRegistry<MemoryDocument>,
    pub container: Node,
    pub list: Node,
}

impl Page {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let document = Rc::new(MemoryDocument::new());
        let container = Node::element("div").with_id("event-test");
        let list = Node::element("ul");
        document
            .body()
            .append_child(&container)
            .expect("fresh container");
        container.append_child(&list).expect("fresh list");
        for class in ["green", "green", "red", "red", "green"] {
            list.append_child(&Node::element("li").with_class(class))
                .expect("fresh item");
        }

        let registry = EventRegistry::with_config(document.clone(), config);
        Self {
            document,
            registry,
            container,
            list,
        }
    }

    /// First node matching `selector`; panics when absent
    pub fn find(&self, selector: &str) -> Node {
        self.document
            .query_selector(selector)
            .expect("valid selector")
            .expect("node present")
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// Callback counting its invocations
pub struct Spy {
    hits: Rc<Cell<usize>>,
    pub callback: Callback<Node>,
}

impl Spy {
    pub fn new() -> Self {
        let hits = Rc::new(Cell::new(0));
        let count = hits.clone();
        Self {
            hits,
            callback: Callback::new(move |_: &Node, _| count.set(count.get() + 1)),
        }
    }

    pub fn calls(&self) -> usize {
        self.hits.get()
    }
}

impl Default for Spy {
    fn default() -> Self {
        Self::new()
    }
}

/// Callback recording the context node of each invocation
pub struct ContextSpy {
    seen: Rc<RefCell<Vec<Node>>>,
    pub callback: Callback<Node>,
}

impl ContextSpy {
    pub fn new() -> Self {
        let seen: Rc<RefCell<Vec<Node>>> = Rc::default();
        let log = seen.clone();
        Self {
            seen,
            callback: Callback::new(move |node: &Node, _| log.borrow_mut().push(node.clone())),
        }
    }

    pub fn contexts(&self) -> Vec<Node> {
        self.seen.borrow().clone()
    }
}

impl Default for ContextSpy {
    fn default() -> Self {
        Self::new()
    }
}
