use wgpu::{CompositeAlphaMode, PresentMode, SurfaceError, TextureFormat};

/// What the runtime should do after failing to acquire a surface texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated; the surface was configured again.
    Reconfigured,
    /// Timeout or unspecified error; drop this frame.
    SkipFrame,
    /// Out of memory; stop rendering.
    Fatal,
}

pub(super) fn choose_surface_format(
    formats: &[TextureFormat],
    prefer_srgb: bool,
) -> Option<TextureFormat> {
    if prefer_srgb {
        if let Some(f) = formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(f);
        }
    }
    formats.first().copied()
}

pub(super) fn choose_alpha_mode(
    modes: &[CompositeAlphaMode],
    requested: Option<CompositeAlphaMode>,
) -> CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(CompositeAlphaMode::Auto)
}

pub(super) fn choose_present_mode(modes: &[PresentMode], requested: PresentMode) -> PresentMode {
    match requested {
        // Auto modes are resolved by wgpu itself.
        PresentMode::AutoVsync | PresentMode::AutoNoVsync => requested,
        m if modes.contains(&m) => m,
        m => {
            log::warn!("present mode {m:?} unsupported; falling back to Fifo");
            PresentMode::Fifo
        }
    }
}

pub(super) fn classify_surface_error(err: &SurfaceError) -> SurfaceErrorAction {
    match err {
        SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_srgb_when_asked() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_alpha_mode_is_replaced() {
        let modes = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    #[test]
    fn present_mode_fallback() {
        let modes = [PresentMode::Fifo, PresentMode::Mailbox];
        assert_eq!(choose_present_mode(&modes, PresentMode::Mailbox), PresentMode::Mailbox);
        assert_eq!(choose_present_mode(&modes, PresentMode::Immediate), PresentMode::Fifo);
        assert_eq!(choose_present_mode(&[], PresentMode::AutoVsync), PresentMode::AutoVsync);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(classify_surface_error(&SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(classify_surface_error(&SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
