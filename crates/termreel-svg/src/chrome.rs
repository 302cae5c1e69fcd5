//! Window chrome: margin fill, window background, bar decorations and
//! title.

use termreel_core::RenderOptions;
use termreel_encoder::format_coord;

use crate::escape::{escape_attr, escape_text};
use crate::writer::DocWriter;

/// Traffic-light colors, left to right.
const LIGHT_COLORS: [&str; 3] = ["#ff5f57", "#febc2e", "#28c840"];

/// Approximate advance width of a monospaced glyph relative to font size.
const GLYPH_ADVANCE: f64 = 0.6;

/// Emits the static decoration around the terminal content.
pub(crate) struct WindowChrome<'a> {
    options: &'a RenderOptions,
}

impl<'a> WindowChrome<'a> {
    pub(crate) fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Vertical space the bar takes away from the content area.
    pub(crate) fn bar_height(&self) -> f64 {
        if self.options.window_bar.is_visible() {
            self.options.window_bar_size
        } else {
            0.0
        }
    }

    pub(crate) fn emit(&self, doc: &mut DocWriter) {
        let o = self.options;

        if o.margin > 0.0 && !o.margin_fill.is_empty() {
            doc.line(&format!(
                r#"<rect width="100%" height="100%" fill="{}"/>"#,
                escape_attr(&o.margin_fill)
            ));
        }

        doc.line(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{} fill="{}"/>"#,
            format_coord(o.margin),
            format_coord(o.margin),
            format_coord(o.width),
            format_coord(o.height),
            rx_attr(o.border_radius),
            escape_attr(&o.theme.background)
        ));

        if o.window_bar.is_visible() {
            self.emit_bar(doc);
        }
    }

    fn emit_bar(&self, doc: &mut DocWriter) {
        let o = self.options;
        let bar = o.window_bar_size;
        let color = escape_attr(&o.window_bar_color);

        doc.line(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{} fill="{color}"/>"#,
            format_coord(o.margin),
            format_coord(o.margin),
            format_coord(o.width),
            format_coord(bar),
            rx_attr(o.border_radius),
        ));
        if o.border_radius > 0.0 {
            // Square the bar's bottom corners; only the top pair rounds.
            doc.line(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{color}"/>"#,
                format_coord(o.margin),
                format_coord(o.margin + bar / 2.0),
                format_coord(o.width),
                format_coord(bar / 2.0),
            ));
        }

        let radius = bar * 0.15;
        let spacing = bar * 0.5;
        let cy = o.margin + bar / 2.0;
        for (i, light) in LIGHT_COLORS.iter().enumerate() {
            let cx = if o.window_bar.is_right_aligned() {
                o.margin + o.width - bar / 2.0 - i as f64 * spacing
            } else {
                o.margin + bar / 2.0 + i as f64 * spacing
            };
            if o.window_bar.is_outlined() {
                doc.line(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                    format_coord(cx),
                    format_coord(cy),
                    format_coord(radius),
                    escape_attr(&o.theme.bright_black),
                    format_coord(radius / 3.0),
                ));
            } else {
                doc.line(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{light}"/>"#,
                    format_coord(cx),
                    format_coord(cy),
                    format_coord(radius),
                ));
            }
        }

        if !o.window_title.is_empty() {
            self.emit_title(doc);
        }
    }

    fn emit_title(&self, doc: &mut DocWriter) {
        let o = self.options;
        // Keep the title clear of the decorations on either side.
        let reserve = o.window_bar_size * 2.2;
        let usable = (o.width - 2.0 * reserve).max(0.0);
        let max_chars = (usable / (o.font_size * GLYPH_ADVANCE)) as usize;
        let title = ellipsize(&o.window_title, max_chars);
        if title.is_empty() {
            return;
        }

        doc.line(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle">{}</text>"#,
            format_coord(o.margin + o.width / 2.0),
            format_coord(o.margin + o.window_bar_size / 2.0 + o.font_size / 3.0),
            escape_text(&title)
        ));
    }
}

/// Rounded-corner attribute, omitted entirely for square corners.
fn rx_attr(radius: f64) -> String {
    if radius > 0.0 {
        format!(r#" rx="{}""#, format_coord(radius))
    } else {
        String::new()
    }
}

/// Truncate to `max_chars`, marking the cut with an ellipsis.
fn ellipsize(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use termreel_core::WindowBar;

    fn render_chrome(options: &RenderOptions) -> String {
        let mut doc = DocWriter::new(false);
        WindowChrome::new(options).emit(&mut doc);
        doc.finish()
    }

    fn bar_options(bar: WindowBar) -> RenderOptions {
        RenderOptions {
            window_bar: bar,
            ..Default::default()
        }
        .resolved(&[])
    }

    #[test]
    fn test_window_rect_uses_theme_background() {
        let options = RenderOptions::default().resolved(&[]);
        let markup = render_chrome(&options);
        assert!(markup.contains(r#"width="1200" height="600""#));
        assert!(markup.contains(&format!(r#"fill="{}""#, options.theme.background)));
        assert!(!markup.contains("circle"));
    }

    #[test]
    fn test_margin_fill_needs_a_margin() {
        let mut options = RenderOptions::default().resolved(&[]);
        options.margin_fill = "#ff00ff".to_string();
        assert!(!render_chrome(&options).contains("#ff00ff"));

        options.margin = 30.0;
        let markup = render_chrome(&options);
        assert!(markup.contains(r##"<rect width="100%" height="100%" fill="#ff00ff"/>"##));
    }

    #[test]
    fn test_colorful_bar_draws_three_lights() {
        let markup = render_chrome(&bar_options(WindowBar::Colorful));
        for color in LIGHT_COLORS {
            assert!(markup.contains(color));
        }
        // Lights at half-bar spacing from the left edge
        assert!(markup.contains(r#"cx="20""#));
        assert!(markup.contains(r#"cx="40""#));
        assert!(markup.contains(r#"cx="60""#));
    }

    #[test]
    fn test_right_aligned_bar_mirrors_positions() {
        let markup = render_chrome(&bar_options(WindowBar::ColorfulRight));
        assert!(markup.contains(r#"cx="1180""#));
        assert!(markup.contains(r#"cx="1160""#));
        assert!(markup.contains(r#"cx="1140""#));
    }

    #[test]
    fn test_rings_are_stroked_not_filled() {
        let options = bar_options(WindowBar::Rings);
        let markup = render_chrome(&options);
        assert!(markup.contains(r#"fill="none""#));
        assert!(markup.contains(&format!(r#"stroke="{}""#, options.theme.bright_black)));
        for color in LIGHT_COLORS {
            assert!(!markup.contains(color));
        }
    }

    #[test]
    fn test_rounded_bar_squares_its_bottom_edge() {
        let mut options = bar_options(WindowBar::Colorful);
        options.border_radius = 8.0;
        let markup = render_chrome(&options);
        assert!(markup.contains(r#"rx="8""#));
        // The squaring strip covers the bar's lower half
        assert!(markup.contains(r#"y="20" width="1200" height="20""#));

        let flat = render_chrome(&bar_options(WindowBar::Colorful));
        assert!(!flat.contains("rx="));
        assert!(!flat.contains(r#"height="20""#));
    }

    #[test]
    fn test_title_is_centered_and_escaped() {
        let mut options = bar_options(WindowBar::Colorful);
        options.window_title = "a < b".to_string();
        let markup = render_chrome(&options);
        assert!(markup.contains(r#"<text x="600""#));
        assert!(markup.contains("text-anchor=\"middle\""));
        assert!(markup.contains("a &lt; b"));
    }

    #[test]
    fn test_long_title_gets_ellipsis() {
        let mut options = bar_options(WindowBar::Colorful);
        options.window_title = "x".repeat(500);
        let markup = render_chrome(&options);
        assert!(markup.contains('…'));
        assert!(!markup.contains(&"x".repeat(200)));
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("exactly", 7), "exactly");
        assert_eq!(ellipsize("too long here", 8), "too lon…");
        assert_eq!(ellipsize("anything", 0), "");
    }
}
