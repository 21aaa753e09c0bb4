use crate::app::screen::mock::{mock_products, mock_service_error};
use crate::app::state::{FragmentView, LogKind, LogLine, LogSpan, LogTone};
use crate::app::util::copy_text_to_clipboard;
use crate::app::AppState;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use ui_facade::export::{CellType, TableColumn, TableSource};
use ui_facade::fragment::FragmentSlot;
use ui_facade::i18n::keys;
use ui_facade::select::{items_from_records, FieldMapping, SearchField, SelectConfig, SelectionResult};
use ui_facade::service::{Method, RequestParams};
use ui_facade::signature::{SignatureConfig, SignatureOutcome};
use ui_facade::{Facade, FacadeError};

const PREFS_KEY: &str = "DEMO_USER_PREFS";
const EXPORT_FILE_NAME: &str = "Product_Inventory_Export";
const FRAGMENT_NAME: &str = "demo.DemoFragment";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeAction {
    Toast,
    Success,
    Info,
    Warning,
    Error,
    Confirm,
    Busy,
    ServiceCall,
    ServiceError,
    ServiceRead,
    LocalStorage,
    SingleSelect,
    MultiSelect,
    Signature,
    Export,
    NavigateDetail,
    NavBack,
    LoadFragment,
    CloseFragment,
}

impl HomeAction {
    pub const ALL: [HomeAction; 19] = [
        HomeAction::Toast,
        HomeAction::Success,
        HomeAction::Info,
        HomeAction::Warning,
        HomeAction::Error,
        HomeAction::Confirm,
        HomeAction::Busy,
        HomeAction::ServiceCall,
        HomeAction::ServiceError,
        HomeAction::ServiceRead,
        HomeAction::LocalStorage,
        HomeAction::SingleSelect,
        HomeAction::MultiSelect,
        HomeAction::Signature,
        HomeAction::Export,
        HomeAction::NavigateDetail,
        HomeAction::NavBack,
        HomeAction::LoadFragment,
        HomeAction::CloseFragment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeAction::Toast => "Show toast",
            HomeAction::Success => "Success message",
            HomeAction::Info => "Information message",
            HomeAction::Warning => "Warning message",
            HomeAction::Error => "Error message",
            HomeAction::Confirm => "Confirmation",
            HomeAction::Busy => "Busy indicator (5 s)",
            HomeAction::ServiceCall => "Simulated service call (2 s)",
            HomeAction::ServiceError => "Mock service error",
            HomeAction::ServiceRead => "Read products from service",
            HomeAction::LocalStorage => "Local storage round trip",
            HomeAction::SingleSelect => "Select a product",
            HomeAction::MultiSelect => "Select several products",
            HomeAction::Signature => "Capture signature",
            HomeAction::Export => "Export products to .xlsx",
            HomeAction::NavigateDetail => "Navigate to product detail",
            HomeAction::NavBack => "Navigate back",
            HomeAction::LoadFragment => "Load and open fragment",
            HomeAction::CloseFragment => "Close fragment",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserPrefs {
    theme: String,
    language: String,
    #[serde(rename = "lastAction")]
    last_action: u64,
}

/// The demo's only screen. Each menu entry runs as its own local task so
/// several can be in flight while dialogs wait for input.
pub struct HomeScreen {
    facade: Rc<Facade>,
    state: Rc<RefCell<AppState>>,
    fragment: FragmentSlot<FragmentView>,
}

impl HomeScreen {
    pub fn new(facade: Rc<Facade>, state: Rc<RefCell<AppState>>) -> Rc<Self> {
        Rc::new(Self {
            facade,
            state,
            fragment: FragmentSlot::new(FRAGMENT_NAME),
        })
    }

    fn log(&self, kind: LogKind, text: impl Into<String>) {
        self.state.borrow_mut().push_line(kind, text);
    }

    pub async fn run(self: Rc<Self>, action: HomeAction) {
        tracing::info!(action = action.label(), "home action");
        self.state.borrow_mut().push_log_line(LogLine::new_with_spans(vec![
            LogSpan::new(LogKind::Action, LogTone::Detail, "▶ "),
            LogSpan::new(LogKind::Action, LogTone::Summary, action.label()),
        ]));
        match action {
            HomeAction::Toast => {
                let title = self.facade.text(keys::INFO_TITLE, &[]);
                self.facade
                    .show_toast(&format!("{title}: This is a brief toast message!"));
            }
            HomeAction::Success => {
                let closed = self
                    .facade
                    .show_success(
                        "The operation was completed successfully!",
                        Some("Successful Operation"),
                    )
                    .await;
                self.log(LogKind::Success, format!("success dialog closed with {}", closed.label()));
            }
            HomeAction::Info => {
                self.facade
                    .show_info(
                        "Would you like to learn about the new features?",
                        Some("Important Announcement"),
                    )
                    .await;
            }
            HomeAction::Warning => {
                self.facade
                    .show_warning("Some fields were left empty in the form.", Some("Form Warning"))
                    .await;
            }
            HomeAction::Error => {
                let message = "A critical database connection error has occurred.";
                self.log(LogKind::Error, message);
                self.facade.show_error(message, None).await;
            }
            HomeAction::Confirm => self.confirm_demo().await,
            HomeAction::Busy => self.busy_demo().await,
            HomeAction::ServiceCall => self.service_call_demo().await,
            HomeAction::ServiceError => {
                self.facade.show_service_error(&mock_service_error()).await;
            }
            HomeAction::ServiceRead => self.service_read_demo().await,
            HomeAction::LocalStorage => self.local_storage_demo().await,
            HomeAction::SingleSelect => self.select_demo(false).await,
            HomeAction::MultiSelect => self.select_demo(true).await,
            HomeAction::Signature => self.signature_demo().await,
            HomeAction::Export => self.export_demo().await,
            HomeAction::NavigateDetail => {
                let mut params = Map::new();
                params.insert("ProductID".to_string(), json!(3));
                match self.facade.navigate_to("detail", &params) {
                    Ok(()) => self.facade.show_toast("Navigated to the product detail route."),
                    Err(error) => {
                        self.facade.show_error(error, None).await;
                    }
                }
            }
            HomeAction::NavBack => match self.facade.nav_back(Some("home")) {
                Ok(()) => self
                    .facade
                    .show_toast("Navigation back executed (falls back to home)."),
                Err(error) => {
                    self.facade.show_error(error, None).await;
                }
            },
            HomeAction::LoadFragment => self.load_fragment_demo().await,
            HomeAction::CloseFragment => {
                if self.fragment.dispose().is_some() {
                    self.state.borrow_mut().fragment = None;
                    self.facade.show_toast("Fragment dialog closed.");
                } else {
                    self.log(LogKind::Status, "no fragment is loaded");
                }
            }
        }
    }

    async fn confirm_demo(&self) {
        let confirmed = self
            .facade
            .confirm(
                "Are you sure you want to confirm this action? It cannot be undone.",
                Some("Confirmation Required"),
            )
            .await;
        let verdict = if confirmed { "CONFIRMED" } else { "CANCELED" };
        self.facade
            .show_toast(&format!("User {verdict} the action."));
    }

    async fn busy_demo(&self) {
        let guard = self.facade.busy_scope();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(guard);
        self.facade
            .show_toast("Busy indicator closed after 5 seconds.");
    }

    async fn service_call_demo(&self) {
        let outcome = self
            .facade
            .with_busy_scope(async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Ok::<_, FacadeError>("Simulated service call successful!")
            })
            .await;
        match outcome {
            Ok(message) => {
                self.facade.show_success(message, None).await;
            }
            Err(error) => {
                self.facade.show_error(error, None).await;
            }
        }
    }

    async fn service_read_demo(&self) {
        let read = self
            .facade
            .call_service(Method::Read, "/Products", None, RequestParams::new());
        let outcome = self.facade.with_busy_scope(read).await;
        match outcome {
            Ok(Value::Array(products)) => {
                let keys: Vec<String> = products
                    .iter()
                    .filter_map(|product| product.get("ProductID").cloned())
                    .map(|id| self.facade.entity_key("Products", &[("ProductID", id)]))
                    .collect();
                self.log(LogKind::Info, format!("entity keys: {}", keys.join(" ")));
                self.facade
                    .show_info(
                        &format!("Read {} products from the service.", products.len()),
                        Some("Service Read"),
                    )
                    .await;
            }
            Ok(other) => {
                self.log(LogKind::Warning, format!("unexpected service payload: {other}"));
            }
            Err(FacadeError::Service(raw)) => {
                self.facade.show_service_error(&raw).await;
            }
            Err(error) => {
                self.facade.show_error(error, None).await;
            }
        }
    }

    async fn local_storage_demo(&self) {
        let last_action = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        let prefs = UserPrefs {
            theme: "sap_horizon".to_string(),
            language: "EN".to_string(),
            last_action,
        };
        if let Err(error) = self.facade.save_to_storage(PREFS_KEY, &prefs) {
            self.facade.show_error(error, None).await;
            return;
        }
        self.facade
            .show_toast(&format!("Data saved to local storage with key '{PREFS_KEY}'."));
        match self.facade.load_from_storage::<UserPrefs>(PREFS_KEY) {
            Ok(Some(loaded)) => {
                let message = format!(
                    "Loaded Data:\nTheme: {}\nLanguage: {}\nLast Action: {} (unix seconds)",
                    loaded.theme, loaded.language, loaded.last_action
                );
                self.facade
                    .show_info(&message, Some("Local Storage Data"))
                    .await;
            }
            Ok(None) => self.log(LogKind::Warning, format!("nothing stored under {PREFS_KEY}")),
            Err(error) => {
                self.facade.show_error(error, None).await;
            }
        }
    }

    async fn select_demo(&self, multi_select: bool) {
        let mapping = FieldMapping {
            id: "{ProductID}".to_string(),
            title: "{Name}".to_string(),
            description: "Unit Price: {Price} USD".to_string(),
        };
        let items = items_from_records(&mock_products(), &mapping);
        let title = if multi_select {
            "Select Products (Multi Selection)"
        } else {
            "Select a Product (Single Selection)"
        };
        let config = SelectConfig {
            title: Some(title.to_string()),
            search_fields: vec![SearchField::Title, SearchField::Description],
            multi_select,
            ..SelectConfig::default()
        };
        match self.facade.select_from(items, config).await {
            SelectionResult::Single(item) => {
                self.facade
                    .show_success(&format!("Selected Item: {} (ID: {})", item.title, item.id), None)
                    .await;
            }
            SelectionResult::Multiple(items) => {
                let names: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
                self.facade
                    .show_success(
                        &format!("Selected {} item(s): {}", items.len(), names.join(", ")),
                        None,
                    )
                    .await;
            }
            SelectionResult::Cancelled => {
                self.facade.show_toast("Selection was canceled by the user.");
            }
        }
    }

    async fn signature_demo(&self) {
        let config = SignatureConfig {
            title: Some("Customer Approval Signature".to_string()),
            width: 450,
            height: 250,
            ..SignatureConfig::default()
        };
        match self.facade.capture_signature(config).await {
            Ok(SignatureOutcome::Saved(image)) => {
                let data_url = image.data_url();
                match copy_text_to_clipboard(&data_url) {
                    Ok(()) => self.log(LogKind::Status, "signature data URL copied to the clipboard"),
                    Err(error) => {
                        tracing::warn!(%error, "clipboard copy failed");
                        self.log(LogKind::Warning, format!("clipboard unavailable: {error}"));
                    }
                }
                self.facade
                    .show_success(
                        &format!(
                            "Signature captured successfully! Base64 Data Length: {} bytes.",
                            data_url.len()
                        ),
                        Some("Signature Success"),
                    )
                    .await;
            }
            Ok(SignatureOutcome::Cancelled) => {
                self.facade
                    .show_toast("Digital signature process was canceled.");
            }
            Err(error) => {
                self.facade.show_error(error, None).await;
            }
        }
    }

    async fn export_demo(&self) {
        let table = TableSource {
            id: "productsTable".to_string(),
            columns: vec![
                TableColumn::exported("Product ID", "ProductID", CellType::Number),
                TableColumn::exported("Name", "Name", CellType::String),
                TableColumn::exported("Price", "Price", CellType::Number),
                TableColumn {
                    header: "Actions".to_string(),
                    ..TableColumn::default()
                },
            ],
            rows: Some(mock_products()),
        };
        let outcome = self
            .facade
            .with_busy_scope(async {
                tokio::task::yield_now().await;
                self.facade.export_table(&table, Some(EXPORT_FILE_NAME))
            })
            .await;
        match outcome {
            Ok(path) => {
                self.log(LogKind::Status, format!("wrote {}", path.display()));
                self.facade
                    .show_success(
                        "The product table data was successfully exported to an Excel file!",
                        Some("Export Successful"),
                    )
                    .await;
            }
            Err(error) => {
                tracing::error!(%error, "export failed");
                self.facade
                    .show_error(
                        format!("An error occurred during the export process: {error}"),
                        None,
                    )
                    .await;
            }
        }
    }

    async fn load_fragment_demo(&self) {
        let guard = self.facade.busy_scope();
        let loaded = self
            .fragment
            .get_or_load(|name| {
                let name = name.to_string();
                async move {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    Ok(FragmentView {
                        title: "Demo Fragment".to_string(),
                        lines: vec![
                            format!("Loaded from {name}."),
                            "This panel stays cached until it is closed from the menu.".to_string(),
                            "Esc hides it; loading again reopens the same instance.".to_string(),
                        ],
                    })
                }
            })
            .await;
        drop(guard);
        match loaded {
            Ok(view) => {
                self.state.borrow_mut().fragment = Some(view.as_ref().clone());
                self.facade
                    .show_toast("Fragment loaded and opened successfully!");
            }
            Err(error) => {
                self.facade
                    .show_error(format!("Failed to load fragment: {error}"), None)
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HomeAction, HomeScreen, PREFS_KEY};
    use crate::app::host::TerminalHost;
    use crate::app::screen::MockProductService;
    use crate::app::state::LogKind;
    use crate::app::AppState;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;
    use ui_facade::i18n::TextBundle;
    use ui_facade::routing::Router;
    use ui_facade::storage::{KeyValueStore, MemoryStore};
    use ui_facade::{Facade, HostUi};

    struct Harness {
        state: Rc<RefCell<AppState>>,
        storage: Rc<MemoryStore>,
        screen: Rc<HomeScreen>,
    }

    fn harness() -> Harness {
        let state = Rc::new(RefCell::new(AppState::default()));
        let host = Rc::new(TerminalHost::new(state.clone(), TextBundle::default()));
        let storage = Rc::new(MemoryStore::default());
        let as_host: Rc<dyn HostUi> = host.clone();
        let as_router: Rc<dyn Router> = host;
        let facade = Facade::new(as_host)
            .with_router(as_router)
            .with_storage(storage.clone())
            .with_data_service(Rc::new(MockProductService));
        let screen = HomeScreen::new(Rc::new(facade), state.clone());
        Harness {
            state,
            storage,
            screen,
        }
    }

    /// Runs an action while closing every modal it raises; returns the
    /// messages those modals carried.
    async fn run_dismissing(harness: &Harness, action: HomeAction) -> Vec<String> {
        let done = Cell::new(false);
        let mut messages = Vec::new();
        let run = async {
            harness.screen.clone().run(action).await;
            done.set(true);
        };
        let driver = async {
            while !done.get() {
                tokio::time::sleep(Duration::from_millis(10)).await;
                let front = harness.state.borrow_mut().modals.pop_front();
                if let Some(modal) = front {
                    messages.push(modal.message.clone());
                }
            }
        };
        tokio::join!(run, driver);
        messages
    }

    fn lines_of(state: &RefCell<AppState>, kind: LogKind) -> Vec<String> {
        state
            .borrow()
            .log
            .iter()
            .filter(|line| line.kind() == kind)
            .map(|line| line.plain_text())
            .collect()
    }

    #[tokio::test]
    async fn toast_uses_the_localized_info_title() {
        let harness = harness();
        harness.screen.clone().run(HomeAction::Toast).await;
        assert_eq!(
            lines_of(&harness.state, LogKind::Toast),
            vec!["Information: This is a brief toast message!".to_string()]
        );
    }

    #[tokio::test]
    async fn dismissed_confirmation_reports_cancel() {
        let harness = harness();
        let messages = run_dismissing(&harness, HomeAction::Confirm).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(
            lines_of(&harness.state, LogKind::Toast),
            vec!["User CANCELED the action.".to_string()]
        );
    }

    #[tokio::test]
    async fn local_storage_round_trip_shows_what_was_saved() {
        let harness = harness();
        let messages = run_dismissing(&harness, HomeAction::LocalStorage).await;
        assert!(harness.storage.get(PREFS_KEY).is_some());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Theme: sap_horizon"));
    }

    #[tokio::test]
    async fn mock_service_error_shows_three_detail_rows() {
        let harness = harness();
        let done = Cell::new(false);
        let run = async {
            harness.screen.clone().run(HomeAction::ServiceError).await;
            done.set(true);
        };
        let check = async {
            tokio::task::yield_now().await;
            let details = harness.state.borrow().modals.front().map(|m| m.details.len());
            harness.state.borrow_mut().modals.clear();
            details
        };
        let ((), details) = tokio::join!(run, check);
        assert_eq!(details, Some(3));
        assert!(done.get());
    }

    #[tokio::test(start_paused = true)]
    async fn service_read_lists_entity_keys() {
        let harness = harness();
        let messages = run_dismissing(&harness, HomeAction::ServiceRead).await;
        assert_eq!(messages, vec!["Read 5 products from the service.".to_string()]);
        let info = lines_of(&harness.state, LogKind::Info);
        assert_eq!(
            info,
            vec!["entity keys: /Products(1) /Products(2) /Products(3) /Products(4) /Products(5)"
                .to_string()]
        );
        assert!(!harness.state.borrow().busy);
    }

    #[tokio::test(start_paused = true)]
    async fn fragment_loads_once_and_closes() {
        let harness = harness();
        harness.screen.clone().run(HomeAction::LoadFragment).await;
        assert!(harness.state.borrow().fragment.is_some());
        harness.state.borrow_mut().fragment = None;

        harness.screen.clone().run(HomeAction::LoadFragment).await;
        assert!(harness.state.borrow().fragment.is_some());

        harness.screen.clone().run(HomeAction::CloseFragment).await;
        assert!(harness.state.borrow().fragment.is_none());
        assert!(!harness.screen.fragment.is_loaded());
    }

    #[tokio::test]
    async fn navigation_tracks_the_route() {
        let harness = harness();
        harness.screen.clone().run(HomeAction::NavigateDetail).await;
        assert_eq!(harness.state.borrow().route, "detail");
        harness.screen.clone().run(HomeAction::NavBack).await;
        assert_eq!(harness.state.borrow().route, "home");
    }
}
