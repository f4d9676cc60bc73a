use std::cell::Cell;

use adw::prelude::*;
use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

/// Modal message with a single "READY TO PLAY" response. `on_ack` runs once,
/// whether the player clicks the button or dismisses the dialog.
pub fn show_acknowledgment(
    parent: &impl IsA<gtk::Widget>,
    message: &str,
    on_ack: Box<dyn FnOnce()>,
) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(None, Some(message));
    dialog.add_response("ack", &gettext("READY TO PLAY"));
    dialog.set_response_appearance("ack", adw::ResponseAppearance::Suggested);
    dialog.set_default_response(Some("ack"));
    dialog.set_close_response("ack");

    let on_ack = Cell::new(Some(on_ack));
    dialog.connect_response(None, move |_, _| {
        if let Some(on_ack) = on_ack.take() {
            on_ack();
        }
    });
    dialog.present(Some(parent));
    dialog
}

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some(&gettext("Instructions")),
        Some(&gettext(
            "Press READY TO PLAY and watch the bulbs light up.\n\
Click the same bulbs in the same order.\n\
Every correct sequence makes the next one harder.",
        )),
    );
    dialog.add_response("ok", &gettext("Got it"));
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Glowgrid")
        .application_icon("io.glowgrid.Glowgrid")
        .developer_name("Glowgrid developers")
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext("Repeat the sequence of lit bulbs."))
        .license_type(gtk::License::MitX11)
        .build();
    dialog.present(app.active_window().as_ref());
    dialog
}
