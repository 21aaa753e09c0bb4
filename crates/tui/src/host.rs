use crate::error::FacadeError;
use crate::modal::ModalDialog;
use crate::select::SelectDialog;
use crate::signature::SignaturePad;

/// Capabilities the facade needs from whatever UI runtime hosts it.
///
/// Presented surfaces are moved into the host, which owns them until a
/// terminating event and drops them afterwards. Dropping a surface that was
/// never settled resolves its caller with that surface's dismiss outcome.
pub trait HostUi {
    fn text(&self, key: &str, params: &[&str]) -> String;

    fn present_modal(&self, dialog: ModalDialog);

    fn present_select(&self, dialog: SelectDialog);

    fn present_signature(&self, pad: SignaturePad) -> Result<(), FacadeError>;

    /// Called only on visibility transitions, never once per scope.
    fn set_busy(&self, visible: bool);

    fn toast(&self, message: &str);
}
