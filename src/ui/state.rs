use std::collections::HashMap;
use std::sync::Arc;

use gtk4 as gtk;
use gtk4::gdk;

use crate::config::Settings;
use crate::game::Game;
use crate::photos::{ImageOrigin, PhotoSearch};

pub const BOARD_COLUMNS: i32 = 4;

#[derive(Clone, Debug)]
pub enum Thumbnail {
    Loading,
    Ready(gdk::Texture),
    Failed,
}

pub struct AppState {
    pub view_stack: Option<gtk::Stack>,
    pub restart_button: Option<gtk::Button>,
    pub title_subtitle: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub message_label: Option<gtk::Label>,
    pub turns_label: Option<gtk::Label>,
    pub play_again_button: Option<gtk::Button>,
    pub credits_label: Option<gtk::Label>,

    pub settings: Settings,
    pub source: Option<Arc<dyn PhotoSearch>>,
    pub http_agent: ureq::Agent,

    // Game state
    pub game: Option<Game>,
    pub theme: String,
    pub origin: ImageOrigin,
    pub card_buttons: Vec<gtk::Button>,
    pub thumbnails: HashMap<String, Thumbnail>,
    pub load_generation: u64,
    pub load_cancellable: Option<gio::Cancellable>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let source = crate::photos::source_from_settings(&settings);
        let http_agent = crate::photos::unsplash::http_agent(settings.timeout());
        AppState {
            view_stack: None,
            restart_button: None,
            title_subtitle: None,
            board_container: None,
            message_label: None,
            turns_label: None,
            play_again_button: None,
            credits_label: None,
            settings,
            source,
            http_agent,
            game: None,
            theme: String::new(),
            origin: ImageOrigin::Fallback,
            card_buttons: Vec::new(),
            thumbnails: HashMap::new(),
            load_generation: 0,
            load_cancellable: None,
        }
    }

    pub fn thumbnail_for(&self, url: &str) -> Option<&Thumbnail> {
        self.thumbnails.get(url)
    }

    pub fn grid_rows(&self) -> i32 {
        let cards = self.game.as_ref().map_or(0, |game| game.cards().len()) as i32;
        (cards + BOARD_COLUMNS - 1) / BOARD_COLUMNS
    }

    /// Starts a new load and returns its generation; older loads become stale.
    pub fn begin_load(&mut self) -> (u64, gio::Cancellable) {
        if let Some(previous) = self.load_cancellable.take() {
            previous.cancel();
        }
        self.load_generation = self.load_generation.wrapping_add(1);
        let cancellable = gio::Cancellable::new();
        self.load_cancellable = Some(cancellable.clone());
        (self.load_generation, cancellable)
    }

    pub fn cancel_load(&mut self) {
        if let Some(cancellable) = self.load_cancellable.take() {
            cancellable.cancel();
        }
    }
}
