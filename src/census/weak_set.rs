use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::EngineObject;

/// Non-owning handles to a momentary enumeration of engine objects.
///
/// Holding the set never keeps an object alive. Resolving it later yields
/// only the objects the host has not destroyed in the meantime.
pub struct WeakObjectSet<T: ?Sized> {
    handles: Vec<Weak<T>>,
}

impl<T: ?Sized> Default for WeakObjectSet<T> {
    fn default() -> Self {
        WeakObjectSet {
            handles: Vec::new(),
        }
    }
}

impl<T: ?Sized> Clone for WeakObjectSet<T> {
    fn clone(&self) -> Self {
        WeakObjectSet {
            handles: self.handles.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for WeakObjectSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakObjectSet")
            .field("captured", &self.handles.len())
            .field("live", &self.live_len())
            .finish()
    }
}

impl<T: ?Sized + EngineObject> WeakObjectSet<T> {
    /// Unnamed objects are skipped; they are transient engine internals.
    pub fn capture(objects: &[Rc<T>]) -> Self {
        let handles = objects
            .iter()
            .filter(|o| !o.name().is_empty())
            .map(Rc::downgrade)
            .collect();
        WeakObjectSet { handles }
    }

    pub fn names(&self) -> Vec<String> {
        self.handles
            .iter()
            .filter_map(Weak::upgrade)
            .map(|o| o.name().to_string())
            .collect()
    }

    /// Live objects of `self` that were not alive in `older`, by identity.
    ///
    /// Objects destroyed between the two captures are not reported on
    /// either side.
    pub fn new_since(&self, older: &WeakObjectSet<T>) -> Vec<Rc<T>> {
        let previous = older.resolve();
        let seen: HashSet<*const ()> = previous.iter().map(identity).collect();
        self.resolve()
            .into_iter()
            .filter(|o| !seen.contains(&identity(o)))
            .collect()
    }
}

impl<T: ?Sized> WeakObjectSet<T> {
    pub fn resolve(&self) -> Vec<Rc<T>> {
        self.handles.iter().filter_map(Weak::upgrade).collect()
    }

    pub fn captured_len(&self) -> usize {
        self.handles.len()
    }

    pub fn live_len(&self) -> usize {
        self.handles.iter().filter(|h| h.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

// The allocation stays reserved while any Weak to it exists, so the address
// cannot be reused by a newer object during a comparison.
fn identity<T: ?Sized>(object: &Rc<T>) -> *const () {
    Rc::as_ptr(object).cast::<()>()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl EngineObject for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn runtime_memory_size(&self) -> u64 {
            0
        }
    }

    fn names_of(objects: &[Rc<Named>]) -> Vec<&'static str> {
        objects.iter().map(|o| o.0).collect()
    }

    #[test]
    fn capture_skips_unnamed() {
        let live = vec![Rc::new(Named("a")), Rc::new(Named("")), Rc::new(Named("b"))];
        let set = WeakObjectSet::capture(&live);
        assert_eq!(set.captured_len(), 2);
        assert_eq!(set.names(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn resolve_drops_destroyed_and_keeps_order() {
        let mut live = vec![
            Rc::new(Named("a")),
            Rc::new(Named("b")),
            Rc::new(Named("c")),
        ];
        let set = WeakObjectSet::capture(&live);
        live.remove(1);

        assert_eq!(names_of(&set.resolve()), vec!["a", "c"]);
        assert_eq!(set.captured_len(), 3);
        assert_eq!(set.live_len(), 2);

        live.clear();
        assert!(set.resolve().is_empty());
        assert!(set.names().is_empty());
    }

    #[test]
    fn set_does_not_keep_objects_alive() {
        let object = Rc::new(Named("held"));
        let set = WeakObjectSet::capture(std::slice::from_ref(&object));
        assert_eq!(Rc::strong_count(&object), 1);
        drop(object);
        assert_eq!(set.live_len(), 0);
    }

    #[test]
    fn new_since_is_identity_based() {
        let first = Rc::new(Named("dup"));
        let older = WeakObjectSet::capture(std::slice::from_ref(&first));

        let second = Rc::new(Named("dup"));
        let newer = WeakObjectSet::capture(&[Rc::clone(&first), Rc::clone(&second)]);

        let fresh = newer.new_since(&older);
        assert_eq!(fresh.len(), 1);
        assert!(Rc::ptr_eq(&fresh[0], &second));
    }

    #[test]
    fn new_since_unchanged_is_empty() {
        let live = vec![Rc::new(Named("a")), Rc::new(Named("b"))];
        let older = WeakObjectSet::capture(&live);
        let newer = WeakObjectSet::capture(&live);
        assert!(newer.new_since(&older).is_empty());
    }

    #[test]
    fn new_since_ignores_objects_destroyed_in_between() {
        let mut live = vec![Rc::new(Named("gone")), Rc::new(Named("kept"))];
        let older = WeakObjectSet::capture(&live);
        let newer = WeakObjectSet::capture(&live);
        live.remove(0);
        assert!(newer.new_since(&older).is_empty());
    }
}
