use std::collections::HashSet;

use gettextrs::gettext;
use gtk4::glib;
use gtk4::prelude::*;

use super::state::AppState;
use crate::photos::{Attribution, ImageDescriptor, ImageOrigin};

const FOUND_PAIR_CLASS: &str = "found-pair";
const MISSED_PAIR_CLASS: &str = "missed-pair";

/// Style for the message after a turn; none while a pick is pending.
fn outcome_class(found_pair: Option<bool>) -> Option<&'static str> {
    match found_pair {
        Some(true) => Some(FOUND_PAIR_CLASS),
        Some(false) => Some(MISSED_PAIR_CLASS),
        None => None,
    }
}

pub(super) fn update_subtitle(st: &AppState) {
    let Some(subtitle) = &st.title_subtitle else {
        return;
    };
    if st.game.is_none() {
        subtitle.set_text(&gettext("Finding photos…"));
        return;
    }
    let mut text = format!("{} {}", gettext("Theme:"), st.theme);
    if st.origin == ImageOrigin::Fallback {
        text.push_str(" | ");
        text.push_str(&gettext("offline set"));
    }
    subtitle.set_text(&text);
}

pub(super) fn update_result(st: &AppState) {
    let Some(game) = &st.game else {
        return;
    };
    let game_over = game.is_game_over();

    if let Some(label) = &st.message_label {
        label.set_text(&gettext(game.message()));
        for class in [FOUND_PAIR_CLASS, MISSED_PAIR_CLASS] {
            label.remove_css_class(class);
        }
        if let Some(class) = outcome_class(game.found_pair()) {
            label.add_css_class(class);
        }
    }
    if let Some(label) = &st.turns_label {
        label.set_markup(&format!(
            "<b>{}</b> {}",
            glib::markup_escape_text(&gettext("Turns:")),
            game.clicks()
        ));
    }
    if let Some(button) = &st.play_again_button {
        button.set_visible(game_over);
        if game_over {
            button.grab_focus();
        }
    }
    if let Some(label) = &st.credits_label {
        label.set_markup(&credits_markup(game.images()));
    }
}

fn distinct_credits(images: &[ImageDescriptor]) -> Vec<&Attribution> {
    let mut seen = HashSet::new();
    images
        .iter()
        .filter_map(|image| image.attribution.as_ref())
        .filter(|credit| seen.insert(credit.link.as_str()))
        .collect()
}

fn credits_markup(images: &[ImageDescriptor]) -> String {
    let links: Vec<String> = distinct_credits(images)
        .into_iter()
        .map(|credit| {
            format!(
                "<a href=\"{}\">{}</a>",
                glib::markup_escape_text(&credit.link),
                glib::markup_escape_text(&credit.name)
            )
        })
        .collect();
    if links.is_empty() {
        return String::new();
    }
    format!(
        "{} {}",
        glib::markup_escape_text(&gettext("Photos by")),
        links.join(", ")
    )
}
