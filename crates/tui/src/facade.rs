use crate::busy::{BusyGuard, BusyIndicator};
use crate::error::FacadeError;
use crate::export::{self, SpreadsheetWriter, TableSource};
use crate::host::HostUi;
use crate::i18n::keys;
use crate::modal::{self, ModalAction, ModalKind};
use crate::routing::{self, RouteParams, Router};
use crate::select::{self, SelectConfig, SelectableItem, SelectionResult};
use crate::service::{self, DataService, Method, RequestParams};
use crate::service_error::{normalize, RawServiceError};
use crate::signature::{self, SignatureConfig, SignatureOutcome};
use crate::storage::{self, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::rc::Rc;

pub struct Facade {
    host: Rc<dyn HostUi>,
    busy: Rc<BusyIndicator>,
    router: Option<Rc<dyn Router>>,
    data_service: Option<Rc<dyn DataService>>,
    storage: Option<Rc<dyn KeyValueStore>>,
    exporter: Option<Rc<dyn SpreadsheetWriter>>,
}

impl Facade {
    pub fn new(host: Rc<dyn HostUi>) -> Self {
        Self {
            busy: BusyIndicator::new(Rc::clone(&host)),
            host,
            router: None,
            data_service: None,
            storage: None,
            exporter: None,
        }
    }

    pub fn with_router(mut self, router: Rc<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn with_data_service(mut self, service: Rc<dyn DataService>) -> Self {
        self.data_service = Some(service);
        self
    }

    pub fn with_storage(mut self, storage: Rc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_exporter(mut self, exporter: Rc<dyn SpreadsheetWriter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn host(&self) -> &dyn HostUi {
        self.host.as_ref()
    }

    pub fn busy(&self) -> &Rc<BusyIndicator> {
        &self.busy
    }

    pub fn text(&self, key: &str, params: &[&str]) -> String {
        self.host.text(key, params)
    }

    // Messages

    pub fn show_toast(&self, message: &str) {
        tracing::debug!(message, "toast");
        self.host.toast(message);
    }

    pub fn show_modal(
        &self,
        kind: ModalKind,
        message: &str,
        title: Option<&str>,
    ) -> impl Future<Output = ModalAction> {
        modal::show_modal(self.host(), kind, message, title)
    }

    pub fn show_error(
        &self,
        error: impl fmt::Display,
        title: Option<&str>,
    ) -> impl Future<Output = ModalAction> {
        let rendered = error.to_string();
        let message = if rendered.trim().is_empty() {
            self.text(keys::ERROR_UNKNOWN, &[])
        } else {
            rendered
        };
        self.show_modal(ModalKind::Error, &message, title)
    }

    pub fn show_success(&self, message: &str, title: Option<&str>) -> impl Future<Output = ModalAction> {
        self.show_modal(ModalKind::Success, message, title)
    }

    pub fn show_info(&self, message: &str, title: Option<&str>) -> impl Future<Output = ModalAction> {
        self.show_modal(ModalKind::Info, message, title)
    }

    pub fn show_warning(&self, message: &str, title: Option<&str>) -> impl Future<Output = ModalAction> {
        self.show_modal(ModalKind::Warning, message, title)
    }

    pub fn confirm(&self, message: &str, title: Option<&str>) -> impl Future<Output = bool> {
        modal::confirm(self.host(), message, title)
    }

    pub fn show_service_error(&self, raw: &RawServiceError) -> impl Future<Output = ModalAction> {
        tracing::error!(error = %raw, "service error");
        let normalized = normalize(raw);
        let message = match normalized.headline() {
            Some(_) if normalized.is_unknown() => self.text(keys::ERROR_UNKNOWN, &[]),
            Some(headline) => headline.to_string(),
            None => String::new(),
        };
        modal::show_modal_with_details(
            self.host(),
            ModalKind::Error,
            &message,
            None,
            normalized.details,
        )
    }

    // Busy indicator

    /// The returned future does not borrow the facade.
    pub fn with_busy_scope<F>(&self, operation: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        let busy = Rc::clone(&self.busy);
        async move { busy.with_busy_scope(operation).await }
    }

    pub fn busy_scope(&self) -> BusyGuard {
        self.busy.enter()
    }

    // Dialogs

    pub fn select_from(
        &self,
        items: Vec<SelectableItem>,
        config: SelectConfig,
    ) -> impl Future<Output = SelectionResult> {
        select::select_from(self.host(), items, config)
    }

    pub fn capture_signature(
        &self,
        config: SignatureConfig,
    ) -> impl Future<Output = Result<SignatureOutcome, FacadeError>> {
        signature::capture_signature(self.host(), config)
    }

    // Collaborators

    pub fn call_service(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        params: RequestParams,
    ) -> impl Future<Output = Result<Value, FacadeError>> {
        let service = self.data_service.clone();
        let path = path.to_string();
        async move {
            let service = service.ok_or(FacadeError::MissingCollaborator("data service"))?;
            service::call_service(service.as_ref(), method, &path, payload, &params).await
        }
    }

    pub fn entity_key(&self, entity_set: &str, keys: &[(&str, Value)]) -> String {
        service::entity_key(entity_set, keys)
    }

    fn storage(&self) -> Result<&dyn KeyValueStore, FacadeError> {
        self.storage
            .as_deref()
            .ok_or(FacadeError::MissingCollaborator("key/value storage"))
    }

    pub fn save_to_storage<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), FacadeError> {
        storage::save_json(self.storage()?, key, value)
    }

    pub fn load_from_storage<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, FacadeError> {
        Ok(storage::load_json(self.storage()?, key))
    }

    pub fn export_table(&self, table: &TableSource, file_name: Option<&str>) -> Result<PathBuf, FacadeError> {
        let exporter = self
            .exporter
            .as_deref()
            .ok_or(FacadeError::MissingCollaborator("spreadsheet exporter"))?;
        export::export_table(exporter, table, file_name)
    }

    fn router(&self) -> Result<&dyn Router, FacadeError> {
        self.router
            .as_deref()
            .ok_or(FacadeError::MissingCollaborator("router"))
    }

    pub fn navigate_to(&self, route: &str, params: &RouteParams) -> Result<(), FacadeError> {
        self.router()?.navigate_to(route, params);
        Ok(())
    }

    pub fn nav_back(&self, fallback: Option<&str>) -> Result<(), FacadeError> {
        routing::nav_back(self.router()?, fallback);
        Ok(())
    }
}
