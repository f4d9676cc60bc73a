mod ui;

use gettextrs::{LocaleCategory, bind_textdomain_codeset, bindtextdomain, setlocale, textdomain};
use gtk4::glib;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use ui::settings::{Settings, debug_mode_enabled};

const GETTEXT_PACKAGE: &str = "glowgrid";
const LOCALEDIR: &str = match option_env!("GLOWGRID_LOCALEDIR") {
    Some(dir) => dir,
    None => "/usr/share/locale",
};

fn init_logging() {
    let default_filter = if debug_mode_enabled() {
        "glowgrid=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn init_i18n() {
    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = bindtextdomain(GETTEXT_PACKAGE, LOCALEDIR) {
        warn!(%err, "unable to bind text domain");
        return;
    }
    if let Err(err) = bind_textdomain_codeset(GETTEXT_PACKAGE, "UTF-8") {
        warn!(%err, "unable to set text domain codeset");
    }
    if let Err(err) = textdomain(GETTEXT_PACKAGE) {
        warn!(%err, "unable to switch text domain");
    }
}

fn main() -> glib::ExitCode {
    init_logging();
    init_i18n();
    let settings = Settings::load();
    ui::app::run(settings)
}
