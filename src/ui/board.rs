use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;
use tracing::{debug, warn};

use super::dialogs::show_acknowledgment;
use super::display::{Board, CellHandler};
use super::hud::Hud;

pub const CONTENT_MARGIN: i32 = 12;
pub const TILE_GAP: i32 = 6;
const BULB_GLYPH: &str = "💡";

struct BulbCell {
    button: gtk::Button,
    area: gtk::DrawingArea,
    lit: Rc<Cell<bool>>,
}

/// GTK rendition of the game board: a square grid of bulb buttons inside
/// `container`, plus the header widgets in `hud`.
pub struct GtkBoard {
    container: gtk::Box,
    hud: Hud,
    cells: RefCell<Vec<BulbCell>>,
}

impl GtkBoard {
    pub fn new(container: gtk::Box, hud: Hud) -> Self {
        GtkBoard {
            container,
            hud,
            cells: RefCell::new(Vec::new()),
        }
    }
}

fn draw_glow(cr: &cairo::Context, width: f64, height: f64) -> Result<(), cairo::Error> {
    let (cx, cy) = (width / 2.0, height / 2.0);
    let radius = width.min(height) * 0.48;
    let glow = cairo::RadialGradient::new(cx, cy, 0.0, cx, cy, radius);
    glow.add_color_stop_rgba(0.0, 1.0, 0.9, 0.45, 0.95);
    glow.add_color_stop_rgba(0.6, 1.0, 0.78, 0.2, 0.45);
    glow.add_color_stop_rgba(1.0, 1.0, 0.7, 0.1, 0.0);
    cr.set_source(&glow)?;
    cr.arc(cx, cy, radius, 0.0, std::f64::consts::TAU);
    cr.fill()
}

fn build_bulb_area(lit: Rc<Cell<bool>>) -> gtk::DrawingArea {
    let area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .build();
    area.add_css_class("bulb-glyph");

    area.set_draw_func(move |area, cr, width, height| {
        cr.set_antialias(gtk::cairo::Antialias::Best);
        let is_lit = lit.get();
        if is_lit && let Err(err) = draw_glow(cr, width as f64, height as f64) {
            warn!(%err, "bulb glow failed to draw");
        }

        let layout = pangocairo::functions::create_layout(cr);
        let mut font_desc = pango::FontDescription::new();
        font_desc.set_family("Noto Color Emoji, Apple Color Emoji, Segoe UI Emoji, sans");
        let font_size = width.min(height) as f64 * 0.42;
        font_desc.set_size((font_size * pango::SCALE as f64) as i32);
        layout.set_font_description(Some(&font_desc));
        layout.set_text(BULB_GLYPH);

        let fg = area.style_context().color();
        let alpha = if is_lit { 1.0 } else { 0.35 };
        cr.set_source_rgba(
            fg.red() as f64,
            fg.green() as f64,
            fg.blue() as f64,
            fg.alpha() as f64 * alpha,
        );
        let (text_width, text_height) = layout.pixel_size();
        cr.move_to(
            (width as f64 - text_width as f64) / 2.0,
            (height as f64 - text_height as f64) / 2.0,
        );
        if is_lit {
            pangocairo::functions::show_layout(cr, &layout);
        } else {
            // Emoji fonts ignore the source alpha, so dim through a group.
            cr.push_group();
            pangocairo::functions::show_layout(cr, &layout);
            if let Err(err) = cr.pop_group_to_source().and_then(|_| cr.paint_with_alpha(alpha)) {
                warn!(%err, "bulb failed to draw");
            }
        }
    });
    area
}

impl Board for GtkBoard {
    fn render_grid(&self, grid_size: usize, on_activate: CellHandler) {
        while let Some(child) = self.container.first_child() {
            self.container.remove(&child);
        }

        let grid = gtk::Grid::new();
        grid.add_css_class("bulb-board");
        grid.set_row_spacing(TILE_GAP as u32);
        grid.set_column_spacing(TILE_GAP as u32);
        grid.set_row_homogeneous(true);
        grid.set_column_homogeneous(true);
        grid.set_hexpand(true);
        grid.set_vexpand(true);

        let mut cells = Vec::with_capacity(grid_size * grid_size);
        for index in 0..grid_size * grid_size {
            let aspect_frame = gtk::AspectFrame::builder()
                .ratio(1.0)
                .obey_child(false)
                .halign(gtk::Align::Fill)
                .valign(gtk::Align::Fill)
                .hexpand(true)
                .vexpand(true)
                .build();

            let button = gtk::Button::builder()
                .css_classes(vec!["bulb-cell"])
                .build();
            button.set_hexpand(true);
            button.set_vexpand(true);

            let lit = Rc::new(Cell::new(false));
            let area = build_bulb_area(lit.clone());
            button.set_child(Some(&area));

            let on_activate = on_activate.clone();
            button.connect_clicked(move |_| on_activate(index));

            aspect_frame.set_child(Some(&button));
            let x = (index % grid_size) as i32;
            let y = (index / grid_size) as i32;
            grid.attach(&aspect_frame, x, y, 1, 1);
            cells.push(BulbCell { button, area, lit });
        }

        let grid_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
        grid_frame.set_halign(gtk::Align::Fill);
        grid_frame.set_valign(gtk::Align::Fill);
        grid_frame.set_hexpand(true);
        grid_frame.set_vexpand(true);
        grid_frame.set_child(Some(&grid));
        self.container.append(&grid_frame);

        *self.cells.borrow_mut() = cells;
        debug!(grid_size, "grid rebuilt");
    }

    fn set_cell_lit(&self, index: usize, lit: bool) {
        let cells = self.cells.borrow();
        let Some(cell) = cells.get(index) else {
            return;
        };
        cell.lit.set(lit);
        if lit {
            cell.button.add_css_class("lit");
        } else {
            cell.button.remove_css_class("lit");
        }
        cell.area.queue_draw();
    }

    fn set_status_text(&self, label: &str) {
        self.hud.set_status(label);
    }

    fn set_difficulty_display(&self, grid_size: usize, sequence_length: usize) {
        self.hud.set_difficulty(grid_size, sequence_length);
    }

    fn prompt_acknowledgment(&self, message: &str, on_ack: Box<dyn FnOnce()>) {
        show_acknowledgment(&self.container, message, on_ack);
    }
}
