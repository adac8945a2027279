//! Named-event callback registry with namespace matching.
//!
//! Event names are colon-segmented (`element:p`). A listener registered for a
//! namespace prefix (`element`) fires for every event in that namespace; the
//! combined firing order across specific and namespace listeners is the
//! global registration order, so which converter "wins" a consumable is
//! deterministic.

use std::collections::HashMap;

pub struct EventRegistry<C> {
    listeners: HashMap<String, Vec<(u64, C)>>,
    next_seq: u64,
}

impl<C: Clone> EventRegistry<C> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Register a callback for an exact event name or a namespace prefix.
    pub fn on(&mut self, event: impl Into<String>, callback: C) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.listeners
            .entry(event.into())
            .or_default()
            .push((seq, callback));
    }

    /// Callbacks that fire for `event`, in global registration order.
    pub fn callbacks_for(&self, event: &str) -> Vec<C> {
        let mut hits: Vec<(u64, C)> = Vec::new();
        for name in namespace_chain(event) {
            if let Some(list) = self.listeners.get(name) {
                hits.extend(list.iter().cloned());
            }
        }
        hits.sort_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, callback)| callback).collect()
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        namespace_chain(event).any(|name| self.listeners.contains_key(name))
    }
}

impl<C: Clone> Default for EventRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// `"a:b:c"` → `"a:b:c"`, `"a:b"`, `"a"`.
fn namespace_chain(event: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(event), |current| {
        current.rfind(':').map(|split| &current[..split])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_chain() {
        let chain: Vec<&str> = namespace_chain("element:p").collect();
        assert_eq!(chain, vec!["element:p", "element"]);

        let flat: Vec<&str> = namespace_chain("text").collect();
        assert_eq!(flat, vec!["text"]);
    }

    #[test]
    fn test_registration_order_across_namespaces() {
        let mut registry: EventRegistry<&str> = EventRegistry::new();
        registry.on("element:p", "specific-1");
        registry.on("element", "generic");
        registry.on("element:p", "specific-2");

        assert_eq!(
            registry.callbacks_for("element:p"),
            vec!["specific-1", "generic", "specific-2"]
        );
        assert_eq!(registry.callbacks_for("element:div"), vec!["generic"]);
    }

    #[test]
    fn test_no_listeners() {
        let registry: EventRegistry<&str> = EventRegistry::new();
        assert!(registry.callbacks_for("element:p").is_empty());
        assert!(!registry.has_listeners("element:p"));
    }
}
