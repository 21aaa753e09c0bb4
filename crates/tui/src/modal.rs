use crate::host::HostUi;
use crate::i18n::keys;
use crate::promise::{pending, Resolver};
use crate::service_error::ServiceErrorDetail;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Error,
    Success,
    Info,
    Warning,
    Confirm,
}

impl ModalKind {
    pub fn title_key(self) -> &'static str {
        match self {
            ModalKind::Error => keys::ERROR_TITLE,
            ModalKind::Success => keys::SUCCESS_TITLE,
            ModalKind::Info => keys::INFO_TITLE,
            ModalKind::Warning => keys::WARNING_TITLE,
            ModalKind::Confirm => keys::CONFIRMATION_TITLE,
        }
    }

    pub fn actions(self) -> &'static [ModalAction] {
        match self {
            ModalKind::Confirm => &[ModalAction::Ok, ModalAction::Cancel],
            _ => &[ModalAction::Ok],
        }
    }

    /// Outcome when the surface closes without a button press.
    pub fn dismiss_action(self) -> ModalAction {
        match self {
            ModalKind::Confirm => ModalAction::Cancel,
            _ => ModalAction::Ok,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Ok,
    Cancel,
}

impl ModalAction {
    pub fn label(self) -> &'static str {
        match self {
            ModalAction::Ok => "OK",
            ModalAction::Cancel => "Cancel",
        }
    }

    fn text_key(self) -> &'static str {
        match self {
            ModalAction::Ok => keys::DIALOG_OK,
            ModalAction::Cancel => keys::DIALOG_CANCEL,
        }
    }
}

#[derive(Debug)]
pub struct ModalDialog {
    pub kind: ModalKind,
    pub title: String,
    pub message: String,
    pub details: Vec<ServiceErrorDetail>,
    pub button_labels: Vec<String>,
    pub selected: usize,
    resolver: Resolver<ModalAction>,
}

impl ModalDialog {
    pub fn actions(&self) -> &'static [ModalAction] {
        self.kind.actions()
    }

    pub fn selected_action(&self) -> ModalAction {
        let actions = self.actions();
        actions[self.selected.min(actions.len() - 1)]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.actions().len();
    }

    pub fn select_previous(&mut self) {
        let len = self.actions().len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn dismiss(&mut self, action: ModalAction) -> bool {
        let action = if self.actions().contains(&action) {
            action
        } else {
            self.kind.dismiss_action()
        };
        let settled = self.resolver.resolve(action);
        if settled {
            tracing::debug!(kind = ?self.kind, ?action, "modal dismissed");
        }
        settled
    }

    pub fn is_settled(&self) -> bool {
        self.resolver.is_settled()
    }
}

pub fn show_modal(
    host: &dyn HostUi,
    kind: ModalKind,
    message: &str,
    title: Option<&str>,
) -> impl Future<Output = ModalAction> {
    show_modal_with_details(host, kind, message, title, Vec::new())
}

pub(crate) fn show_modal_with_details(
    host: &dyn HostUi,
    kind: ModalKind,
    message: &str,
    title: Option<&str>,
    details: Vec<ServiceErrorDetail>,
) -> impl Future<Output = ModalAction> {
    let (resolver, pending) = pending();
    let title = match title {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => host.text(kind.title_key(), &[]),
    };
    tracing::debug!(?kind, %title, "presenting modal");
    let button_labels = kind
        .actions()
        .iter()
        .map(|action| match action {
            ModalAction::Ok if kind == ModalKind::Error && !details.is_empty() => {
                host.text(keys::ERROR_CLOSE, &[])
            }
            other => host.text(other.text_key(), &[]),
        })
        .collect();
    host.present_modal(ModalDialog {
        kind,
        title,
        message: message.to_string(),
        details,
        button_labels,
        selected: 0,
        resolver,
    });
    async move { pending.await.unwrap_or(kind.dismiss_action()) }
}

pub fn confirm(host: &dyn HostUi, message: &str, title: Option<&str>) -> impl Future<Output = bool> {
    let action = show_modal(host, ModalKind::Confirm, message, title);
    async move { action.await == ModalAction::Ok }
}
