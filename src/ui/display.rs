use std::rc::Rc;

/// Click handler registered on every cell when the grid is built.
pub type CellHandler = Rc<dyn Fn(usize)>;

/// Everything the game core needs from the screen.
pub trait Board {
    /// Rebuild a `grid_size` x `grid_size` grid. Cells start unlit and report
    /// clicks through `on_activate`.
    fn render_grid(&self, grid_size: usize, on_activate: CellHandler);

    fn set_cell_lit(&self, index: usize, lit: bool);

    fn set_status_text(&self, label: &str);

    fn set_difficulty_display(&self, grid_size: usize, sequence_length: usize);

    /// Show `message` with a single acknowledgment action. Returns
    /// immediately; `on_ack` runs once the player acknowledges.
    fn prompt_acknowledgment(&self, message: &str, on_ack: Box<dyn FnOnce()>);
}
