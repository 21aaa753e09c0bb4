use crate::host::HostUi;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

pub struct BusyIndicator {
    host: Rc<dyn HostUi>,
    open: Cell<usize>,
}

impl BusyIndicator {
    pub fn new(host: Rc<dyn HostUi>) -> Rc<Self> {
        Rc::new(Self {
            host,
            open: Cell::new(0),
        })
    }

    pub fn open_scopes(&self) -> usize {
        self.open.get()
    }

    pub fn is_visible(&self) -> bool {
        self.open.get() > 0
    }

    pub fn enter(self: &Rc<Self>) -> BusyGuard {
        let open = self.open.get() + 1;
        self.open.set(open);
        if open == 1 {
            tracing::debug!("busy indicator shown");
            self.host.set_busy(true);
        }
        BusyGuard {
            indicator: Rc::clone(self),
        }
    }

    fn exit(&self) {
        let open = self.open.get().saturating_sub(1);
        self.open.set(open);
        if open == 0 {
            tracing::debug!("busy indicator hidden");
            self.host.set_busy(false);
        }
    }

    /// Keeps the indicator up while `operation` runs and hands its output
    /// back untouched. The scope is released even if the returned future is
    /// dropped before completion.
    pub async fn with_busy_scope<F, T>(self: &Rc<Self>, operation: F) -> T
    where
        F: Future<Output = T>,
    {
        let _guard = self.enter();
        operation.await
    }
}

#[must_use = "the busy scope closes as soon as the guard is dropped"]
pub struct BusyGuard {
    indicator: Rc<BusyIndicator>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.indicator.exit();
    }
}
