use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use gio::SimpleAction;

use super::board::{CONTENT_MARGIN, render_board};
use super::dialogs::show_about_dialog;
use super::hud::update_result;
use super::scene::{show_game, show_loading};
use super::state::AppState;
use super::textures::load_thumbnails;
use crate::config::load_settings;
use crate::game::{Game, Selection};
use crate::photos::{fetch_images, pick_theme};

const APP_ID: &str = "io.basshift.PhotoPairs";
const STYLE_CSS: &str = include_str!("style.css");

/// Fetches a photo set for a random theme and deals a game from it.
fn start_new_theme(state: &Rc<RefCell<AppState>>) {
    let (generation, cancellable, source, theme, timeout) = {
        let mut st = state.borrow_mut();
        let (generation, cancellable) = st.begin_load();
        let theme = pick_theme(&st.settings.themes(), &mut rand::rng());
        st.game = None;
        st.card_buttons.clear();
        st.thumbnails.clear();
        st.theme = theme.clone();
        (
            generation,
            cancellable,
            st.source.clone(),
            theme,
            st.settings.timeout(),
        )
    };
    log::info!("starting a game with theme \"{theme}\"");
    show_loading(state);

    let state = state.clone();
    glib::spawn_future_local(async move {
        let set = fetch_images(source, theme, timeout, &cancellable).await;
        {
            let mut st = state.borrow_mut();
            if st.load_generation != generation {
                log::debug!("dropping stale photo set for \"{}\"", set.theme);
                return;
            }
            st.load_cancellable = None;
            st.theme = set.theme;
            st.origin = set.origin;
            st.game = Some(Game::new(set.images, &mut rand::rng()));
        }
        show_game(&state);
        load_thumbnails(&state);
    });
}

fn restart_game(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    let Some(game) = st.game.as_mut() else {
        return;
    };
    game.restart(&mut rand::rng());
    log::info!("restarted with the same {} photos", game.images().len());
    render_board(&st);
    update_result(&st);
}

pub fn handle_card_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let mut st = state.borrow_mut();
    let Some(game) = st.game.as_mut() else {
        return;
    };
    let Some(id) = game.cards().get(index).map(|card| card.id) else {
        return;
    };

    match game.select(id) {
        Selection::Ignored => return,
        Selection::Pending => {}
        Selection::Turn { found_pair } => {
            log::debug!("turn {} finished, pair found: {found_pair}", game.clicks());
            if game.is_game_over() {
                log::info!("board cleared in {} turns", game.clicks());
            }
        }
    }

    render_board(&st);
    update_result(&st);
}

fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_loading_view() -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_halign(gtk::Align::Center);
    root.set_valign(gtk::Align::Center);

    let spinner = gtk::Spinner::new();
    spinner.set_spinning(true);
    spinner.set_size_request(48, 48);

    let label = gtk::Label::new(Some(&gettext("Finding photos…")));
    label.add_css_class("title-4");

    root.append(&spinner);
    root.append(&label);
    root
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(CONTENT_MARGIN);
    root.set_margin_bottom(CONTENT_MARGIN);
    root.set_margin_start(CONTENT_MARGIN);
    root.set_margin_end(CONTENT_MARGIN);
    root.set_hexpand(true);
    root.set_vexpand(true);

    let board_container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_container.add_css_class("board-box");
    board_container.set_hexpand(true);
    board_container.set_vexpand(true);

    let result_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
    result_box.add_css_class("result-box");
    result_box.set_halign(gtk::Align::Center);

    let message = gtk::Label::new(None);
    message.add_css_class("title-3");

    let turns = gtk::Label::new(None);

    let play_again = gtk::Button::with_label(&gettext("Play again!"));
    play_again.add_css_class("suggested-action");
    play_again.add_css_class("pill");
    play_again.set_halign(gtk::Align::Center);
    play_again.set_visible(false);
    play_again.connect_clicked({
        let state = state.clone();
        move |_| {
            restart_game(&state);
        }
    });

    let credits = gtk::Label::new(None);
    credits.add_css_class("caption");
    credits.add_css_class("dim-label");
    credits.set_wrap(true);
    credits.set_justify(gtk::Justification::Center);

    result_box.append(&message);
    result_box.append(&turns);
    result_box.append(&play_again);
    result_box.append(&credits);

    root.append(&board_container);
    root.append(&result_box);

    {
        let mut st = state.borrow_mut();
        st.board_container = Some(board_container);
        st.message_label = Some(message);
        st.turns_label = Some(turns);
        st.play_again_button = Some(play_again);
        st.credits_label = Some(credits);
    }

    root
}

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder()
        .application_id(APP_ID)
        .build();

    app.connect_activate(move |app| {
        if let Some(window) = app.active_window() {
            window.present();
            return;
        }
        load_css();

        let state = Rc::new(RefCell::new(AppState::new(load_settings())));

        let new_theme_action = SimpleAction::new("new-theme", None);
        new_theme_action.connect_activate({
            let state = state.clone();
            move |_, _| start_new_theme(&state)
        });
        app.add_action(&new_theme_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);
        app.set_accels_for_action("app.quit", &["<Control>q"]);
        app.set_accels_for_action("app.new-theme", &["<Control>n"]);

        let title_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title_box.set_valign(gtk::Align::Center);
        title_box.set_halign(gtk::Align::Center);

        let title_main = gtk::Label::builder()
            .label("Photo Pairs")
            .halign(gtk::Align::Center)
            .css_classes(vec!["title"])
            .build();
        let title_subtitle = gtk::Label::builder()
            .label("")
            .halign(gtk::Align::Center)
            .css_classes(vec!["subtitle", "caption"])
            .build();
        title_box.append(&title_main);
        title_box.append(&title_subtitle);

        let header = adw::HeaderBar::builder()
            .title_widget(&title_box)
            .build();
        header.add_css_class("flat");

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some(&gettext("New Game")));
        restart_button.connect_clicked({
            let state = state.clone();
            move |_| {
                restart_game(&state);
            }
        });
        header.pack_start(&restart_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some(&gettext("New Theme")), Some("app.new-theme"));
        menu_model.append(Some(&gettext("About Photo Pairs")), Some("app.about"));
        menu_model.append(Some(&gettext("Quit")), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();
        header.pack_end(&menu_button);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_transition_duration(300);

        view_stack.add_named(&build_loading_view(), Some("loading"));
        view_stack.add_named(&build_game_view(&state), Some("game"));
        view_stack.set_visible_child_name("loading");

        let toolbar = adw::ToolbarView::new();
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Photo Pairs")
            .default_width(720)
            .default_height(820)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 520);

        {
            let mut st = state.borrow_mut();
            st.view_stack = Some(view_stack);
            st.restart_button = Some(restart_button);
            st.title_subtitle = Some(title_subtitle);
        }

        win.connect_close_request({
            let state = state.clone();
            move |_| {
                state.borrow_mut().cancel_load();
                glib::Propagation::Proceed
            }
        });

        win.present();
        start_new_theme(&state);
    });

    app.run()
}
