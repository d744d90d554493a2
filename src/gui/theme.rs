use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub frame: Srgba<f64>,
    pub disk: Srgba<f64>,
    pub ring: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "orbit_background",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
            ),
            frame: Self::lookup_color(context, "orbit_frame", Srgba::new(1.0, 1.0, 1.0, 1.0)),
            disk: Self::lookup_color(
                context,
                "orbit_disk",
                Srgba::new(20.0 / 255.0, 20.0 / 255.0, 40.0 / 255.0, 1.0),
            ),
            ring: Self::lookup_color(
                context,
                "orbit_ring",
                Srgba::new(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.orbit-window, .orbit-drawing-area {
    background: none;
    background-color: black;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
