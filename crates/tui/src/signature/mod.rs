mod pointer;
mod raster;

pub use pointer::{EventDisposition, PointerEvent, PointerKind, PointerPhase, PointerPosition};
pub use raster::{LineCap, Pen, Raster, Rgba};

use crate::error::FacadeError;
use crate::host::HostUi;
use crate::i18n::keys;
use crate::promise::{pending, Pending, Resolver};
use base64::Engine;
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureConfig {
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    pub stroke_width: f32,
    pub stroke_color: String,
    pub background_color: String,
    pub line_cap: LineCap,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: 350,
            height: 350,
            stroke_width: 2.0,
            stroke_color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            line_cap: LineCap::Round,
        }
    }
}

impl SignatureConfig {
    fn validate(&self) -> Result<(Pen, Rgba), FacadeError> {
        if self.width == 0 || self.height == 0 {
            return Err(FacadeError::InvalidConfig(format!(
                "signature surface must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(FacadeError::InvalidConfig(format!(
                "stroke width must be positive, got {}",
                self.stroke_width
            )));
        }
        let pen = Pen {
            color: self.stroke_color.parse()?,
            width: self.stroke_width,
            cap: self.line_cap,
        };
        Ok((pen, self.background_color.parse()?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureOutcome {
    Saved(EncodedImage),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadState {
    Blank,
    Drawing { last: (f32, f32) },
    IdleWithContent,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadLabels {
    pub clear: String,
    pub save: String,
    pub cancel: String,
}

type PadResult = Result<SignatureOutcome, FacadeError>;

#[derive(Debug)]
pub struct SignaturePad {
    pub title: String,
    pub labels: PadLabels,
    pen: Pen,
    background: Rgba,
    raster: Raster,
    state: PadState,
    origin: (f32, f32),
    resolver: Resolver<PadResult>,
}

impl SignaturePad {
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn state(&self) -> PadState {
        self.state
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn has_content(&self) -> bool {
        matches!(
            self.state,
            PadState::Drawing { .. } | PadState::IdleWithContent
        )
    }

    pub fn is_settled(&self) -> bool {
        self.resolver.is_settled()
    }

    /// Where the surface's top-left corner sits in client coordinates.
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = (x, y);
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> EventDisposition {
        if self.is_settled() {
            return EventDisposition::Ignored;
        }
        let point = event.position.to_local(self.origin);
        let consumed = match (event.phase, self.state) {
            (PointerPhase::Down, _) => {
                self.raster.stamp_dot(point.0, point.1, &self.pen);
                self.state = PadState::Drawing { last: point };
                true
            }
            (PointerPhase::Move, PadState::Drawing { last }) => {
                self.raster.draw_segment(last, point, &self.pen);
                self.state = PadState::Drawing { last: point };
                true
            }
            (
                PointerPhase::Up | PointerPhase::Leave | PointerPhase::Cancel,
                PadState::Drawing { .. },
            ) => {
                self.state = PadState::IdleWithContent;
                true
            }
            _ => false,
        };
        match (event.kind, consumed) {
            (PointerKind::Touch, _) => EventDisposition::PreventDefault,
            (PointerKind::Mouse, true) => EventDisposition::Handled,
            (PointerKind::Mouse, false) => EventDisposition::Ignored,
        }
    }

    pub fn clear(&mut self) {
        if self.is_settled() {
            return;
        }
        self.raster.fill(self.background);
        self.state = PadState::Blank;
    }

    pub fn save(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }
        let result = self.raster.encode_png().map(|bytes| {
            SignatureOutcome::Saved(EncodedImage {
                mime_type: "image/png".to_string(),
                width: self.raster.width(),
                height: self.raster.height(),
                bytes,
            })
        });
        if let Err(error) = &result {
            tracing::warn!(%error, "signature could not be encoded");
        }
        self.state = PadState::Closed;
        self.resolver.resolve(result)
    }

    pub fn cancel(&mut self) -> bool {
        if self.is_settled() {
            return false;
        }
        self.state = PadState::Closed;
        self.resolver.resolve(Ok(SignatureOutcome::Cancelled))
    }
}

fn present_pad(host: &dyn HostUi, config: SignatureConfig) -> Result<Pending<PadResult>, FacadeError> {
    let (pen, background) = config.validate()?;
    let (resolver, pending) = pending();
    let title = config
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| host.text(keys::DIGITAL_SIGNATURE_TITLE, &[]));
    let labels = PadLabels {
        clear: host.text(keys::DIGITAL_SIGNATURE_CLEAR, &[]),
        save: host.text(keys::DIGITAL_SIGNATURE_SAVE, &[]),
        cancel: host.text(keys::DIGITAL_SIGNATURE_CANCEL, &[]),
    };
    tracing::debug!(%title, width = config.width, height = config.height, "presenting signature pad");
    host.present_signature(SignaturePad {
        title,
        labels,
        pen,
        background,
        raster: Raster::new(config.width, config.height, background),
        state: PadState::Blank,
        origin: (0.0, 0.0),
        resolver,
    })?;
    Ok(pending)
}

pub fn capture_signature(
    host: &dyn HostUi,
    config: SignatureConfig,
) -> impl Future<Output = Result<SignatureOutcome, FacadeError>> {
    let presented = present_pad(host, config);
    async move {
        let pending = presented?;
        pending.await.unwrap_or(Ok(SignatureOutcome::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        capture_signature, EventDisposition, PadState, PointerEvent, PointerPhase, Rgba,
        SignatureConfig, SignatureOutcome,
    };
    use crate::error::FacadeError;
    use crate::host::testing::RecordingHost;

    fn small() -> SignatureConfig {
        SignatureConfig {
            width: 40,
            height: 20,
            ..SignatureConfig::default()
        }
    }

    fn saved_bytes(outcome: Result<SignatureOutcome, FacadeError>) -> Vec<u8> {
        match outcome {
            Ok(SignatureOutcome::Saved(image)) => image.bytes,
            other => panic!("expected a saved image, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_and_cleared_saves_encode_identically() {
        let host = RecordingHost::default();
        let blank = capture_signature(&host, small());
        host.take_pad().save();
        let blank = saved_bytes(blank.await);

        let cleared = capture_signature(&host, small());
        let mut pad = host.take_pad();
        pad.handle_pointer(PointerEvent::mouse(PointerPhase::Down, 5.0, 5.0));
        pad.handle_pointer(PointerEvent::mouse(PointerPhase::Move, 30.0, 12.0));
        pad.handle_pointer(PointerEvent::mouse(PointerPhase::Up, 30.0, 12.0));
        assert!(pad.has_content());
        pad.clear();
        assert_eq!(pad.state(), PadState::Blank);
        pad.save();
        assert_eq!(saved_bytes(cleared.await), blank);
    }

    #[tokio::test]
    async fn drawn_signature_differs_from_blank_and_has_a_data_url() {
        let host = RecordingHost::default();
        let outcome = capture_signature(&host, small());
        let mut pad = host.take_pad();
        pad.handle_pointer(PointerEvent::mouse(PointerPhase::Down, 2.0, 2.0));
        pad.handle_pointer(PointerEvent::mouse(PointerPhase::Move, 20.0, 10.0));
        assert_eq!(pad.raster().pixel(11, 6), Some(Rgba::BLACK));
        pad.save();
        match outcome.await {
            Ok(SignatureOutcome::Saved(image)) => {
                assert_eq!((image.width, image.height), (40, 20));
                assert!(image.data_url().starts_with("data:image/png;base64,iVBOR"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn save_then_cancel_resolves_once_with_the_save() {
        let host = RecordingHost::default();
        let outcome = capture_signature(&host, small());
        let mut pad = host.take_pad();
        assert!(pad.save());
        assert!(!pad.cancel());
        assert_eq!(
            pad.handle_pointer(PointerEvent::mouse(PointerPhase::Down, 1.0, 1.0)),
            EventDisposition::Ignored
        );
        assert!(matches!(outcome.await, Ok(SignatureOutcome::Saved(_))));
    }

    #[tokio::test]
    async fn cancel_and_teardown_are_cancelled() {
        let host = RecordingHost::default();
        let cancelled = capture_signature(&host, small());
        host.take_pad().cancel();
        assert!(matches!(cancelled.await, Ok(SignatureOutcome::Cancelled)));

        let dropped = capture_signature(&host, small());
        drop(host.take_pad());
        assert!(matches!(dropped.await, Ok(SignatureOutcome::Cancelled)));
    }

    #[test]
    fn touch_uses_client_coordinates_and_prevents_default() {
        let host = RecordingHost::default();
        let _outcome = capture_signature(&host, small());
        let mut pad = host.take_pad();
        pad.set_origin(100.0, 50.0);
        let disposition = pad.handle_pointer(PointerEvent::touch(PointerPhase::Down, 110.0, 55.0));
        assert_eq!(disposition, EventDisposition::PreventDefault);
        assert_eq!(pad.raster().pixel(10, 5), Some(Rgba::BLACK));
        assert_eq!(
            pad.handle_pointer(PointerEvent::touch(PointerPhase::Cancel, 0.0, 0.0)),
            EventDisposition::PreventDefault
        );
        assert_eq!(pad.state(), PadState::IdleWithContent);
    }

    #[test]
    fn moves_without_a_press_do_not_draw() {
        let host = RecordingHost::default();
        let _outcome = capture_signature(&host, small());
        let mut pad = host.take_pad();
        let disposition = pad.handle_pointer(PointerEvent::mouse(PointerPhase::Move, 10.0, 10.0));
        assert_eq!(disposition, EventDisposition::Ignored);
        assert_eq!(pad.raster().pixel(10, 10), Some(Rgba::WHITE));
        assert_eq!(pad.state(), PadState::Blank);
    }

    #[tokio::test]
    async fn invalid_config_and_missing_surface_fail_fast() {
        let host = RecordingHost::default();
        let zero = SignatureConfig {
            width: 0,
            ..SignatureConfig::default()
        };
        assert!(matches!(
            capture_signature(&host, zero).await,
            Err(FacadeError::InvalidConfig(_))
        ));
        let bad_color = SignatureConfig {
            stroke_color: "blue-ish".to_string(),
            ..SignatureConfig::default()
        };
        assert!(matches!(
            capture_signature(&host, bad_color).await,
            Err(FacadeError::InvalidConfig(_))
        ));
        assert!(host.pads.borrow().is_empty());

        let refusing = RecordingHost {
            refuse_surfaces: true,
            ..RecordingHost::default()
        };
        assert!(matches!(
            capture_signature(&refusing, SignatureConfig::default()).await,
            Err(FacadeError::SurfaceUnavailable(_))
        ));
    }

    #[test]
    fn labels_and_title_come_from_the_bundle() {
        let host = RecordingHost::default();
        let _outcome = capture_signature(&host, small());
        let pad = host.take_pad();
        assert_eq!(pad.title, "Digital Signature");
        assert_eq!(
            (pad.labels.clear.as_str(), pad.labels.save.as_str(), pad.labels.cancel.as_str()),
            ("Clear", "Save", "Cancel")
        );
    }
}
