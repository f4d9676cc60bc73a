use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

/// Header widgets the game writes to: the start/stop control and the
/// difficulty readout.
#[derive(Clone, Debug)]
pub struct Hud {
    pub status_button: gtk::Button,
    pub title: gtk::Box,
    grid_label: gtk::Label,
    length_label: gtk::Label,
}

impl Hud {
    pub fn new() -> Self {
        let status_button = gtk::Button::builder()
            .css_classes(vec!["status-button", "suggested-action", "pill"])
            .build();

        let title = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title.set_valign(gtk::Align::Center);
        title.set_halign(gtk::Align::Center);
        title.set_hexpand(true);

        let title_main = gtk::Label::builder()
            .label("Glowgrid")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-main"])
            .build();

        let readout = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        readout.set_halign(gtk::Align::Center);
        let grid_label = gtk::Label::builder()
            .css_classes(vec!["game-title-subtitle", "caption"])
            .build();
        let length_label = gtk::Label::builder()
            .css_classes(vec!["game-title-subtitle", "caption"])
            .build();
        readout.append(&grid_label);
        readout.append(&length_label);

        title.append(&title_main);
        title.append(&readout);

        Hud {
            status_button,
            title,
            grid_label,
            length_label,
        }
    }

    pub fn set_status(&self, label: &str) {
        self.status_button.set_label(label);
    }

    pub fn set_difficulty(&self, grid_size: usize, sequence_length: usize) {
        self.grid_label.set_text(&format!(
            "{} {}x{}",
            gettext("Grid"),
            grid_size,
            grid_size
        ));
        self.length_label
            .set_text(&format!("{} {}", gettext("Sequence"), sequence_length));
    }
}
