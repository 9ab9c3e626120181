// Small helpers shared across components.

/// Fraction of the scrollable document height that has been scrolled,
/// clamped to [0, 1]. A document no taller than the viewport counts as 0.
pub fn scroll_fraction(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}

#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_fraction_clamps_and_scales() {
        assert_eq!(scroll_fraction(0.0, 2000.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(600.0, 2000.0, 800.0), 0.5);
        assert_eq!(scroll_fraction(1200.0, 2000.0, 800.0), 1.0);
        assert_eq!(scroll_fraction(5000.0, 2000.0, 800.0), 1.0);
        assert_eq!(scroll_fraction(-10.0, 2000.0, 800.0), 0.0);
    }

    #[test]
    fn short_documents_never_report_progress() {
        assert_eq!(scroll_fraction(100.0, 700.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(100.0, 800.0, 800.0), 0.0);
    }
}
