use crate::config::{self, AssetConfig, Config};
use crate::events::AppEvent;
use crate::geometry::Point;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::{view, window};
use crate::home::{CircleEntity, Home, Registry, layout};
use crate::sys::assets;
use crate::sys::audio::{CuePlayer, MediaCuePlayer, SilentCuePlayer};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub struct AppModel {
    pub home: Rc<RefCell<Home>>,
    pub registry: Registry<gtk::ApplicationWindow>,
    pub cues: Box<dyn CuePlayer>,
    pub config: Config,
    pub screen: (f64, f64),
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    frame_timer: Option<glib::SourceId>,
}

#[derive(Debug)]
pub enum AppMsg {
    Tick,
    Press(Point),
    Motion(Point),
    Resize(f64, f64),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::Quit => AppMsg::Quit,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Home Screen"),
            add_css_class: "orbit-window",
            set_decorated: false,

            connect_close_request[sender] => move |_| {
                sender.input(AppMsg::Quit);
                glib::Propagation::Stop
            },

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "orbit-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width as f64, height as f64));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::Motion(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 0, // touch and every mouse button
                    connect_pressed[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Press(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();
        window::init_fullscreen(&root);

        let screen = window::screen_size();
        let home = Home::new(build_entities(&config, screen), config.timing.clone());

        let model = AppModel {
            home: Rc::new(RefCell::new(home)),
            registry: Registry::from_config(&config.apps, config.layout.satellites),
            cues: cue_player(&config.assets),
            config,
            screen,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            frame_timer: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.frame_timer = Some(start_frame_timer(
            &sender,
            model.config.timing.frame_interval,
        ));

        let home_draw = model.home.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                // an app may spin its own main loop while the home state is borrowed
                let Ok(home) = home_draw.try_borrow() else {
                    return;
                };
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                if let Err(e) = view::draw(cr, &home, &colors, (width as f64, height as f64)) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        log::info!(
            "Home screen ready: {}x{}, {} app(s) registered",
            model.screen.0,
            model.screen.1,
            model.registry.len()
        );

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Tick => {
                self.home
                    .borrow_mut()
                    .tick(Instant::now(), self.cues.as_ref());
                self.drawing_area.queue_draw();
            }
            AppMsg::Press(point) => {
                let outcome = self.home.borrow_mut().press(
                    point,
                    Instant::now(),
                    self.cues.as_ref(),
                    &self.registry,
                    &self.root,
                );
                log::debug!("Press at ({:.0}, {:.0}): {:?}", point.x, point.y, outcome);
                self.drawing_area.queue_draw();
            }
            AppMsg::Motion(point) => {
                self.home.borrow_mut().pointer_moved(point, Instant::now());
            }
            AppMsg::Resize(width, height) => {
                let moved = window::center_moved(self.screen, (width, height));
                self.screen = (width, height);
                if moved {
                    self.rebuild_layout();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let interval_changed =
                        new_config.timing.frame_interval != self.config.timing.frame_interval;
                    self.registry =
                        Registry::from_config(&new_config.apps, new_config.layout.satellites);
                    self.cues = cue_player(&new_config.assets);
                    self.config = new_config;
                    self.rebuild_layout();

                    if interval_changed {
                        if let Some(timer) = self.frame_timer.take() {
                            timer.remove();
                        }
                        self.frame_timer = Some(start_frame_timer(
                            &sender,
                            self.config.timing.frame_interval,
                        ));
                    }
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => {
                self.home.borrow_mut().quit();
                if let Some(timer) = self.frame_timer.take() {
                    timer.remove();
                }
                log::info!("Exiting home screen");
                relm4::main_application().quit();
            }
        }
    }
}

impl AppModel {
    fn rebuild_layout(&mut self) {
        let entities = build_entities(&self.config, self.screen);
        self.home
            .borrow_mut()
            .rebuild(entities, self.config.timing.clone());
        self.drawing_area.queue_draw();
    }
}

fn build_entities(config: &Config, screen: (f64, f64)) -> Vec<CircleEntity> {
    let mut entities = layout::build(&config.layout, window::screen_center(screen));
    assets::attach_images(&mut entities, &config.assets, &config.apps);
    entities
}

fn cue_player(assets: &AssetConfig) -> Box<dyn CuePlayer> {
    if assets.sound {
        Box::new(MediaCuePlayer::new(assets.root.join(&assets.audio_dir)))
    } else {
        Box::new(SilentCuePlayer)
    }
}

fn start_frame_timer(sender: &ComponentSender<AppModel>, interval: Duration) -> glib::SourceId {
    let sender = sender.clone();
    glib::timeout_add_local(interval, move || {
        sender.input(AppMsg::Tick);
        glib::ControlFlow::Continue
    })
}
