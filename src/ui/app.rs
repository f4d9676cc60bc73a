use adw::prelude::*;
use gettextrs::gettext;
use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use tracing::info;

use super::board::{CONTENT_MARGIN, GtkBoard};
use super::controller::GameController;
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::Hud;
use super::settings::Settings;
use super::state::Phase;
use super::timers::GlibScheduler;

pub const APP_ID: &str = "io.glowgrid.Glowgrid";
const STYLE_CSS: &str = include_str!("style.css");

type Controller = GameController<GtkBoard, GlibScheduler>;

fn load_css() {
    let Some(display) = gdk::Display::default() else {
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

fn build_game_view() -> (gtk::Box, gtk::Box) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let board_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    board_frame.set_halign(gtk::Align::Fill);
    board_frame.set_valign(gtk::Align::Fill);
    board_frame.set_hexpand(true);
    board_frame.set_vexpand(true);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("bulb-board-container");

    board_frame.set_child(Some(&board_card));
    content.append(&board_frame);
    root.append(&content);

    (root, board_card)
}

fn install_actions(app: &adw::Application) {
    let instructions_action = SimpleAction::new("instructions", None);
    instructions_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_instructions_dialog(&app);
        }
    });
    app.add_action(&instructions_action);

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
}

fn build_header(hud: &Hud, controller: &Controller) -> adw::HeaderBar {
    let header = adw::HeaderBar::builder().title_widget(&hud.title).build();
    header.add_css_class("app-header");
    header.add_css_class("flat");

    hud.status_button.connect_clicked({
        let controller = controller.clone();
        move |_| controller.toggle()
    });
    header.pack_start(&hud.status_button);

    let menu_model = gio::Menu::new();
    menu_model.append(Some(&gettext("Instructions")), Some("app.instructions"));
    menu_model.append(Some(&gettext("About Glowgrid")), Some("app.about"));
    menu_model.append(Some(&gettext("Quit")), Some("app.quit"));
    let menu_button = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu_model)
        .build();

    let restart_button = gtk::Button::builder()
        .icon_name("view-refresh-symbolic")
        .build();
    restart_button.set_tooltip_text(Some(&gettext("Start Over")));
    restart_button.connect_clicked({
        let controller = controller.clone();
        move |_| controller.restart()
    });

    let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    end_box.append(&restart_button);
    end_box.append(&menu_button);
    header.pack_end(&end_box);
    header
}

fn build_window(app: &adw::Application, settings: Settings) {
    load_css();

    let hud = Hud::new();
    let (game_view, board_card) = build_game_view();
    let board = GtkBoard::new(board_card, hud.clone());
    let controller = GameController::new(board, GlibScheduler, settings.timings);

    let header = build_header(&hud, &controller);
    let toolbar = adw::ToolbarView::new();
    toolbar.set_hexpand(true);
    toolbar.set_vexpand(true);
    toolbar.add_top_bar(&header);
    toolbar.set_content(Some(&game_view));

    let win = adw::ApplicationWindow::builder()
        .application(app)
        .title("Glowgrid")
        .icon_name(APP_ID)
        .default_width(560)
        .default_height(640)
        .content(&toolbar)
        .build();
    win.set_size_request(360, 460);
    win.add_css_class("app-window");

    let style_manager = adw::StyleManager::default();
    if style_manager.is_dark() {
        win.add_css_class("theme-dark");
    } else {
        win.add_css_class("theme-light");
    }
    style_manager.connect_notify_local(Some("dark"), {
        let win = win.clone();
        move |manager, _| {
            if manager.is_dark() {
                win.remove_css_class("theme-light");
                win.add_css_class("theme-dark");
            } else {
                win.remove_css_class("theme-dark");
                win.add_css_class("theme-light");
            }
        }
    });

    let global_key = gtk::EventControllerKey::new();
    global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
    global_key.connect_key_pressed({
        let controller = controller.clone();
        move |_, key, _, _| {
            if key == gdk::Key::Escape && controller.phase() != Phase::Idle {
                controller.request_stop();
                return glib::Propagation::Stop;
            }
            glib::Propagation::Proceed
        }
    });
    win.add_controller(global_key);

    win.connect_close_request({
        let controller = controller.clone();
        move |_| {
            let difficulty = controller.difficulty();
            info!(
                step = controller.step(),
                grid = %difficulty.grid_label(),
                "closing"
            );
            controller.shutdown();
            glib::Propagation::Proceed
        }
    });

    win.present();
}

pub fn run(settings: Settings) -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        if let Some(window) = app.active_window() {
            window.present();
            return;
        }
        install_actions(app);
        build_window(app, settings);
        info!(
            lit_ms = settings.timings.lit_ms,
            gap_ms = settings.timings.gap_ms,
            "window ready"
        );
    });

    app.run()
}
