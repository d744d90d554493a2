use super::FALLBACK_SCREEN;
use crate::geometry::Point;
use crate::home::LaunchSurface;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, Layer, LayerShell};

/// Covers the whole output: an overlay layer surface where the compositor
/// supports it, a plain fullscreen window otherwise.
pub fn init_fullscreen(window: &gtk::ApplicationWindow) {
    if gtk4_layer_shell::is_supported() {
        window.init_layer_shell();
        window.set_layer(Layer::Overlay);
        window.set_namespace(Some("orbit"));
        window.set_exclusive_zone(-1);
        for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
            window.set_anchor(edge, true);
        }
        window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
    } else {
        log::debug!("Layer shell unavailable, falling back to fullscreen");
        window.fullscreen();
    }
}

/// Size of the first monitor, used until the drawing area reports its own size.
pub fn screen_size() -> (f64, f64) {
    gdk::Display::default()
        .and_then(|display| display.monitors().item(0))
        .and_then(|item| item.downcast::<gdk::Monitor>().ok())
        .map(|m| {
            let geometry = m.geometry();
            (geometry.width() as f64, geometry.height() as f64)
        })
        .unwrap_or(FALLBACK_SCREEN)
}

pub fn screen_center((width, height): (f64, f64)) -> Point {
    Point::new(width / 2.0, height / 2.0)
}

/// Unmaps the home screen while an external program runs. The main loop is
/// blocked during the launch, so pending work is flushed before it starts.
impl LaunchSurface for gtk::ApplicationWindow {
    fn suspend(&self) {
        self.set_visible(false);
        let context = glib::MainContext::default();
        while context.pending() {
            context.iteration(false);
        }
    }

    fn resume(&self) {
        self.set_visible(true);
        self.present();
    }
}

/// Resizes that keep the hub in place do not need a new layout.
pub fn center_moved(old: (f64, f64), new: (f64, f64)) -> bool {
    screen_center(old).distance(screen_center(new)) >= 0.5
}
