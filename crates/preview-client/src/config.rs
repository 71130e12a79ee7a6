//! Configuration types for the preview client.

use std::time::Duration;

/// Complete preview configuration: endpoint, density, and timing.
///
/// Defaults target the public Labelary rendering service at 8 dots/mm
/// (203 dpi), the common direct-thermal printer density.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreviewConfig {
    /// Base URL of the rendering service, without a trailing slash.
    pub endpoint: String,
    /// Print density in dots per millimeter. Part of the request URL.
    pub dpmm: u32,
    /// Dots per inch used to convert canvas dots to the label size the
    /// service expects. 203 dpi corresponds to 8 dots/mm.
    pub dpi: u32,
    /// Debounce window: a submission only reaches the network after this
    /// long with no newer submission.
    pub debounce: Duration,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.labelary.com/v1/printers".to_string(),
            dpmm: 8,
            dpi: 203,
            debounce: Duration::from_secs(1),
            timeout: Duration::from_secs(10),
        }
    }
}

impl PreviewConfig {
    /// Request URL for a label of the given canvas size in dots.
    ///
    /// The service addresses labels by size in whole inches; fractional
    /// sizes round up so the canvas always fits.
    pub fn render_url(&self, width_dots: u32, height_dots: u32) -> String {
        let w_in = width_dots.div_ceil(self.dpi.max(1));
        let h_in = height_dots.div_ceil(self.dpi.max(1));
        format!(
            "{}/{}dpmm/labels/{}x{}/0/",
            self.endpoint, self.dpmm, w_in, h_in
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_url_rounds_canvas_up_to_whole_inches() {
        let config = PreviewConfig::default();
        assert_eq!(
            config.render_url(800, 600),
            "https://api.labelary.com/v1/printers/8dpmm/labels/4x3/0/"
        );
    }

    #[test]
    fn render_url_exact_inch_does_not_round() {
        let config = PreviewConfig::default();
        assert_eq!(
            config.render_url(203, 406),
            "https://api.labelary.com/v1/printers/8dpmm/labels/1x2/0/"
        );
    }

    #[test]
    fn render_url_honors_custom_endpoint_and_density() {
        let config = PreviewConfig {
            endpoint: "http://localhost:8080/v1/printers".to_string(),
            dpmm: 12,
            dpi: 300,
            ..PreviewConfig::default()
        };
        assert_eq!(
            config.render_url(600, 300),
            "http://localhost:8080/v1/printers/12dpmm/labels/2x1/0/"
        );
    }
}
