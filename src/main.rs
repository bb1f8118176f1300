mod config;
mod game;
mod photos;
mod ui;

use gtk4::glib;

const GETTEXT_PACKAGE: &str = "photo-pairs";

static GLIB_LOGGER: glib::GlibLogger = glib::GlibLogger::new(
    glib::GlibLoggerFormat::Plain,
    glib::GlibLoggerDomain::CrateTarget,
);

fn init_logging() {
    if log::set_logger(&GLIB_LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}

fn init_translations() {
    gettextrs::setlocale(gettextrs::LocaleCategory::LcAll, "");
    if let Err(err) = gettextrs::textdomain(GETTEXT_PACKAGE) {
        log::debug!("no translations bound: {err}");
    }
}

fn main() -> glib::ExitCode {
    init_logging();
    init_translations();
    ui::app::run()
}
