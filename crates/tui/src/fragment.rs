use crate::error::FacadeError;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

pub struct FragmentSlot<T> {
    name: String,
    loaded: RefCell<Option<Rc<T>>>,
}

impl<T> FragmentSlot<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loaded: RefCell::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.borrow().is_some()
    }

    pub fn get(&self) -> Option<Rc<T>> {
        self.loaded.borrow().clone()
    }

    /// Runs `load` only when the slot is empty. If another caller filled the
    /// slot while `load` was pending, the earlier instance is kept.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Rc<T>, FacadeError>
    where
        F: FnOnce(&str) -> Fut,
        Fut: Future<Output = Result<T, FacadeError>>,
    {
        if self.name.trim().is_empty() {
            return Err(FacadeError::InvalidConfig(
                "fragment name is required".to_string(),
            ));
        }
        if let Some(existing) = self.get() {
            return Ok(existing);
        }
        tracing::debug!(fragment = %self.name, "loading fragment");
        let fresh = Rc::new(load(&self.name).await?);
        let mut slot = self.loaded.borrow_mut();
        Ok(Rc::clone(slot.get_or_insert(fresh)))
    }

    pub fn dispose(&self) -> Option<Rc<T>> {
        let taken = self.loaded.borrow_mut().take();
        if taken.is_some() {
            tracing::debug!(fragment = %self.name, "fragment disposed");
        }
        taken
    }
}

impl<T> std::fmt::Debug for FragmentSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentSlot")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::FragmentSlot;
    use crate::error::FacadeError;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn loads_once_until_disposed() {
        let slot = FragmentSlot::new("DemoFragment");
        let loads = Cell::new(0);
        let load = |name: &str| {
            loads.set(loads.get() + 1);
            let name = name.to_string();
            async move { Ok::<_, FacadeError>(name) }
        };
        let first = slot.get_or_load(load).await.expect("load");
        let second = slot.get_or_load(load).await.expect("reuse");
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(loads.get(), 1);
        assert_eq!(first.as_str(), "DemoFragment");

        assert!(slot.dispose().is_some());
        assert!(!slot.is_loaded());
        assert!(slot.dispose().is_none());
        slot.get_or_load(load).await.expect("reload");
        assert_eq!(loads.get(), 2);
    }

    #[tokio::test]
    async fn failed_load_leaves_the_slot_empty() {
        let slot: FragmentSlot<String> = FragmentSlot::new("Broken");
        let result = slot
            .get_or_load(|_| async { Err(FacadeError::SurfaceUnavailable("gone".to_string())) })
            .await;
        assert!(result.is_err());
        assert!(!slot.is_loaded());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let slot: FragmentSlot<()> = FragmentSlot::new(" ");
        let result = slot.get_or_load(|_| async { Ok(()) }).await;
        assert!(matches!(result, Err(FacadeError::InvalidConfig(_))));
    }
}
