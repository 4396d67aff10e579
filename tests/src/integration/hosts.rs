//! # Host Mechanism Scenarios
//!
//! Targets that only offer the legacy `on<type>` mechanism, and targets that
//! offer none.

#[cfg(test)]
mod tests {
    use crate::fixtures::{ContextSpy, Page, Spy};
    use delegated_events::{EventApi, EventError, ListenerSupport};

    #[test]
    fn test_legacy_only_target() {
        let page = Page::new();
        page.container
            .set_listener_support(ListenerSupport::LEGACY_ONLY);
        let spy = Spy::new();

        page.registry
            .subscribe(&page.container, "click.legacy", &spy.callback)
            .unwrap();
        page.registry.dispatch(&page.container, "click", None).unwrap();
        assert_eq!(spy.calls(), 1);
        assert_eq!(page.container.listener_count("click"), 1);

        page.registry
            .unsubscribe(&page.container, "click.legacy", None)
            .unwrap();
        page.registry.dispatch(&page.container, "click", None).unwrap();
        assert_eq!(spy.calls(), 1);
        assert_eq!(page.container.listener_count("click"), 0);
    }

    #[test]
    fn test_delegation_on_legacy_only_target() {
        let page = Page::new();
        page.container
            .set_listener_support(ListenerSupport::LEGACY_ONLY);
        let spy = ContextSpy::new();
        page.registry
            .delegate(&page.container, "li.red", "click", &spy.callback)
            .unwrap();

        let item = page.find("li.red");
        page.registry.dispatch(&item, "click", None).unwrap();
        assert_eq!(spy.contexts(), vec![item]);
    }

    #[test]
    fn test_target_without_mechanism_is_rejected() {
        let page = Page::new();
        page.container.set_listener_support(ListenerSupport::NONE);
        let spy = Spy::new();

        let err = page
            .registry
            .subscribe(&page.container, "click", &spy.callback)
            .unwrap_err();
        assert!(matches!(err, EventError::NoListenerMechanism { .. }));
        assert!(page.registry.records(&page.container).is_empty());
    }

    #[test]
    fn test_mechanism_probed_per_call() {
        let page = Page::new();
        let spy = Spy::new();
        page.registry
            .subscribe(&page.container, "click", &spy.callback)
            .unwrap();

        page.container
            .set_listener_support(ListenerSupport::LEGACY_ONLY);
        page.registry
            .subscribe(&page.container, "keyup", &spy.callback)
            .unwrap();

        page.registry.dispatch(&page.container, "keyup", None).unwrap();
        assert_eq!(spy.calls(), 1);
        assert_eq!(page.container.listener_count("keyup"), 1);
    }

    #[test]
    fn test_rejected_cycle_leaves_dispatch_intact() {
        let page = Page::new();
        let spy = Spy::new();
        page.registry
            .subscribe(&page.container, "click", &spy.callback)
            .unwrap();

        let item = page.find("li.red");
        let err = item.append_child(&page.container).unwrap_err();
        assert!(matches!(err, EventError::HierarchyRequest { .. }));
        assert!(item.append_child(&item).is_err());

        page.registry.dispatch(&item, "click", None).unwrap();
        assert_eq!(spy.calls(), 1);
        assert!(page.container.contains(&item));
    }
}
