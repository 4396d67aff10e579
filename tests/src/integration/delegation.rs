//! # Delegation Scenarios
//!
//! Selector delegation on the list fixture. Matching happens when the event
//! fires, so items appended or reclassified later are picked up.

#[cfg(test)]
mod tests {
    use crate::fixtures::{ContextSpy, Page, Spy};
    use delegated_events::{EventApi, Node};

    fn items(page: &Page, class: &str) -> Vec<Node> {
        page.list
            .children()
            .into_iter()
            .filter(|item| item.has_class(class))
            .collect()
    }

    fn click_all(page: &Page) {
        for item in page.list.children() {
            page.registry.dispatch(&item, "click", None).unwrap();
        }
    }

    // =============================================================================
    // MATCHING
    // =============================================================================

    #[test]
    fn test_delegate_counts_matching_items() {
        let page = Page::new();
        let red = Spy::new();
        let green = Spy::new();
        page.registry
            .delegate(&page.container, "li.red", "click", &red.callback)
            .unwrap();
        page.registry
            .delegate(&page.container, "li.green", "click", &green.callback)
            .unwrap();

        click_all(&page);
        assert_eq!(red.calls(), 2);
        assert_eq!(green.calls(), 3);
    }

    #[test]
    fn test_context_is_matched_item() {
        let page = Page::new();
        let spy = ContextSpy::new();
        page.registry
            .delegate(&page.container, "li.red", "click", &spy.callback)
            .unwrap();

        click_all(&page);
        assert_eq!(spy.contexts(), items(&page, "red"));
    }

    #[test]
    fn test_origin_nested_inside_match() {
        let page = Page::new();
        let spy = ContextSpy::new();
        let item = page.find("li.red");
        let label = Node::element("span").with_class("label");
        item.append_child(&label).unwrap();
        page.registry
            .delegate(&page.container, "li.red", "click", &spy.callback)
            .unwrap();

        page.registry.dispatch(&label, "click", None).unwrap();
        assert_eq!(spy.contexts(), vec![item]);
    }

    #[test]
    fn test_container_itself_does_not_match() {
        let page = Page::new();
        let spy = Spy::new();
        page.registry
            .delegate(&page.container, "li", "click", &spy.callback)
            .unwrap();

        page.registry.dispatch(&page.container, "click", None).unwrap();
        page.registry.dispatch(&page.list, "click", None).unwrap();
        assert_eq!(spy.calls(), 0);
    }

    #[test]
    fn test_matching_is_evaluated_at_fire_time() {
        let page = Page::new();
        let spy = ContextSpy::new();
        page.registry
            .delegate(&page.container, "li.red", "click", &spy.callback)
            .unwrap();

        let late = Node::element("li").with_class("red");
        page.list.append_child(&late).unwrap();
        let recolored = page.find("li.green");
        recolored.remove_class("green");
        recolored.add_class("red");

        page.registry.dispatch(&late, "click", None).unwrap();
        page.registry.dispatch(&recolored, "click", None).unwrap();
        assert_eq!(spy.contexts(), vec![late, recolored]);
    }

    #[test]
    fn test_selector_combinators() {
        let page = Page::new();
        let spy = Spy::new();
        page.registry
            .delegate(&page.container, "ul > li.green", "click", &spy.callback)
            .unwrap();

        click_all(&page);
        assert_eq!(spy.calls(), 3);
    }

    #[test]
    fn test_delegated_metrics() {
        let page = Page::new();
        let spy = Spy::new();
        page.registry
            .delegate(&page.container, "li.red", "click", &spy.callback)
            .unwrap();

        click_all(&page);
        let snapshot = page.registry.metrics().snapshot();
        assert_eq!(snapshot.delegated_matches, 2);
        assert_eq!(snapshot.delegated_misses, 3);
    }

    #[test]
    fn test_invalid_selector_never_fires() {
        let page = Page::new();
        let spy = Spy::new();
        page.registry
            .delegate(&page.container, "li[", "click", &spy.callback)
            .unwrap();

        click_all(&page);
        assert_eq!(spy.calls(), 0);
    }

    // =============================================================================
    // REMOVAL
    // =============================================================================

    #[test]
    fn test_undelegate_by_selector() {
        let page = Page::new();
        let red = Spy::new();
        let green = Spy::new();
        page.registry
            .delegate(&page.container, "li.red", "click", &red.callback)
            .unwrap();
        page.registry
            .delegate(&page.container, "li.green", "click", &green.callback)
            .unwrap();

        let removed = page
            .registry
            .undelegate(&page.container, "li.red", "click", None)
            .unwrap();
        assert_eq!(removed, 1);

        click_all(&page);
        assert_eq!(red.calls(), 0);
        assert_eq!(green.calls(), 3);
    }

    #[test]
    fn test_undelegate_by_namespace() {
        let page = Page::new();
        let menu = Spy::new();
        let other = Spy::new();
        page.registry
            .delegate(&page.container, "li", "click.menu", &menu.callback)
            .unwrap();
        page.registry
            .delegate(&page.container, "li", "click.other", &other.callback)
            .unwrap();

        page.registry
            .undelegate(&page.container, "li", "click.menu", None)
            .unwrap();
        click_all(&page);
        assert_eq!(menu.calls(), 0);
        assert_eq!(other.calls(), 5);
    }

    #[test]
    fn test_unsubscribe_also_removes_delegations() {
        let page = Page::new();
        let spy = Spy::new();
        page.registry
            .delegate(&page.container, "li.red", "click", &spy.callback)
            .unwrap();

        let removed = page
            .registry
            .unsubscribe(&page.container, "click", Some(&spy.callback))
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(page.container.listener_count("click"), 0);

        click_all(&page);
        assert_eq!(spy.calls(), 0);
    }

    #[test]
    fn test_same_callback_on_two_selectors() {
        let page = Page::new();
        let spy = Spy::new();
        page.registry
            .delegate(&page.container, "li.red", "click", &spy.callback)
            .unwrap();
        page.registry
            .delegate(&page.container, "li.green", "click", &spy.callback)
            .unwrap();
        assert_eq!(page.container.listener_count("click"), 2);

        click_all(&page);
        assert_eq!(spy.calls(), 5);

        page.registry
            .undelegate(&page.container, "li.green", "click", Some(&spy.callback))
            .unwrap();
        click_all(&page);
        assert_eq!(spy.calls(), 7);
    }
}
