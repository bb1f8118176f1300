use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Photo Pairs")
        .application_icon("io.basshift.PhotoPairs")
        .developer_name("Basshift")
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext(
            "Flip two cards at a time and find every matching photo.",
        ))
        .build();
    dialog.add_credit_section(Some(&gettext("Photos")), &["Unsplash https://unsplash.com"]);
    dialog.add_legal_section(
        "Photo Pairs",
        None,
        gtk::License::MitX11,
        None,
    );
    dialog.present(app.active_window().as_ref());
    dialog
}
