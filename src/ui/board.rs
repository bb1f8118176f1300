use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;

use super::app::handle_card_click;
use super::state::{AppState, BOARD_COLUMNS, Thumbnail};
use crate::game::{Card, CardFace};
use crate::photos::ImageFormat;

pub const CONTENT_MARGIN: i32 = 12;
pub const TILE_GAP: i32 = 8;

const PAGE_BACK: &str = "back";
const PAGE_FRONT: &str = "front";
const PAGE_LOADING: &str = "loading";
const PAGE_MISSING: &str = "missing";

fn build_card_back() -> gtk::DrawingArea {
    let drawing_area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .build();
    drawing_area.add_css_class("card-back");
    drawing_area.set_draw_func(move |area, cr, width, height| {
        let min_dim = width.min(height) as f64;

        cr.set_antialias(cairo::Antialias::Best);

        let layout = pangocairo::functions::create_layout(cr);
        let mut font_desc = pango::FontDescription::new();
        font_desc.set_family("Cantarell, Noto Sans, sans");
        font_desc.set_weight(pango::Weight::Bold);
        font_desc.set_size((min_dim * 0.34 * pango::SCALE as f64) as i32);
        layout.set_font_description(Some(&font_desc));
        layout.set_text("?");

        #[allow(deprecated)]
        let fg = area.style_context().color();
        cr.set_source_rgba(
            fg.red() as f64,
            fg.green() as f64,
            fg.blue() as f64,
            fg.alpha() as f64,
        );

        let (text_width, text_height) = layout.pixel_size();
        cr.move_to(
            (width as f64 - text_width as f64) / 2.0,
            (height as f64 - text_height as f64) / 2.0,
        );

        pangocairo::functions::show_layout(cr, &layout);
    });
    drawing_area
}

fn build_card_faces() -> gtk::Stack {
    let faces = gtk::Stack::new();
    faces.set_transition_type(gtk::StackTransitionType::Crossfade);
    faces.set_transition_duration(160);
    faces.set_hexpand(true);
    faces.set_vexpand(true);

    faces.add_named(&build_card_back(), Some(PAGE_BACK));

    let picture = gtk::Picture::new();
    picture.set_content_fit(gtk::ContentFit::Cover);
    picture.set_can_shrink(true);
    picture.add_css_class("card-photo");
    faces.add_named(&picture, Some(PAGE_FRONT));

    let spinner = gtk::Spinner::new();
    spinner.set_spinning(true);
    spinner.set_halign(gtk::Align::Center);
    spinner.set_valign(gtk::Align::Center);
    faces.add_named(&spinner, Some(PAGE_LOADING));

    let missing = gtk::Label::new(Some(&missing_text(None)));
    missing.set_wrap(true);
    missing.set_justify(gtk::Justification::Center);
    missing.add_css_class("card-missing");
    faces.add_named(&missing, Some(PAGE_MISSING));

    faces.set_visible_child_name(PAGE_BACK);
    faces
}

fn missing_text(photo_number: Option<usize>) -> String {
    match photo_number {
        Some(number) => gettext("Photo {} unavailable").replace("{}", &number.to_string()),
        None => gettext("Photo unavailable"),
    }
}

fn show_front(faces: &gtk::Stack, thumbnail: Option<&Thumbnail>, photo_number: Option<usize>) {
    match thumbnail {
        Some(Thumbnail::Ready(texture)) => {
            if let Some(picture) = faces.child_by_name(PAGE_FRONT).and_downcast::<gtk::Picture>() {
                picture.set_paintable(Some(texture));
            }
            faces.set_visible_child_name(PAGE_FRONT);
        }
        Some(Thumbnail::Failed) => {
            if let Some(label) = faces.child_by_name(PAGE_MISSING).and_downcast::<gtk::Label>() {
                label.set_text(&missing_text(photo_number));
            }
            faces.set_visible_child_name(PAGE_MISSING);
        }
        Some(Thumbnail::Loading) | None => faces.set_visible_child_name(PAGE_LOADING),
    }
}

/// Renders one card from its face; never reads anything but its inputs.
pub(super) fn render_card(
    button: &gtk::Button,
    card: &Card,
    thumbnail: Option<&Thumbnail>,
    photo_number: Option<usize>,
    pending: bool,
) {
    let Some(faces) = button.child().and_downcast::<gtk::Stack>() else {
        return;
    };

    for format in [ImageFormat::Landscape, ImageFormat::Portrait] {
        button.remove_css_class(format.css_class());
    }
    button.add_css_class(card.image.format.css_class());
    if pending {
        button.add_css_class("pending");
    } else {
        button.remove_css_class("pending");
    }

    match card.face() {
        CardFace::Back => {
            button.remove_css_class("flipped");
            button.remove_css_class("matched");
            faces.set_visible_child_name(PAGE_BACK);
        }
        CardFace::Front => {
            button.add_css_class("flipped");
            button.remove_css_class("matched");
            show_front(&faces, thumbnail, photo_number);
        }
        CardFace::Matched => {
            button.add_css_class("flipped");
            button.add_css_class("matched");
            show_front(&faces, thumbnail, photo_number);
        }
    }
}

pub(super) fn render_board(st: &AppState) {
    let Some(game) = &st.game else {
        return;
    };
    let pending_id = game.pending().map(|card| card.id);
    for (button, card) in st.card_buttons.iter().zip(game.cards()) {
        render_card(
            button,
            card,
            st.thumbnail_for(&card.image.url),
            game.photo_number(card),
            pending_id == Some(card.id),
        );
    }
}

pub fn build_board_grid(state: &Rc<RefCell<AppState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("board");
    grid.set_row_spacing(TILE_GAP as u32);
    grid.set_column_spacing(TILE_GAP as u32);
    grid.set_row_homogeneous(true);
    grid.set_column_homogeneous(true);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let card_ids: Vec<u32> = {
        let st = state.borrow();
        st.game
            .as_ref()
            .map(|game| game.cards().iter().map(|card| card.id).collect())
            .unwrap_or_default()
    };

    let mut buttons = Vec::with_capacity(card_ids.len());

    for (i, id) in card_ids.into_iter().enumerate() {
        let index = i as i32;
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder()
            .css_classes(vec!["card"])
            .focusable(true)
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);
        let label = gettext("Select card {}").replace("{}", &id.to_string());
        button.set_tooltip_text(Some(&label));
        button.update_property(&[gtk::accessible::Property::Label(&label)]);
        button.set_child(Some(&build_card_faces()));

        let state_clone = state.clone();
        button.connect_clicked(move |_| {
            handle_card_click(&state_clone, i);
        });

        aspect_frame.set_child(Some(&button));

        let x = index % BOARD_COLUMNS;
        let y = index / BOARD_COLUMNS;
        grid.attach(&aspect_frame, x, y, 1, 1);
        buttons.push(button);
    }

    let mut st = state.borrow_mut();
    st.card_buttons = buttons;
    render_board(&st);

    grid
}
