//! Board and scheduler doubles for driving the game core without GTK.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use super::display::{Board, CellHandler};
use super::timers::Scheduler;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    Grid(usize),
    Lit(usize, bool),
    Status(String),
    Difficulty(usize, usize),
    Prompt(String),
}

#[derive(Default)]
struct BoardLog {
    events: Vec<BoardEvent>,
    handler: Option<CellHandler>,
    prompts: Vec<(String, Box<dyn FnOnce()>)>,
}

/// Records every call and keeps acknowledgment prompts open until the test
/// answers them.
#[derive(Clone, Default)]
pub struct RecordingBoard {
    log: Rc<RefCell<BoardLog>>,
}

impl RecordingBoard {
    pub fn events(&self) -> Vec<BoardEvent> {
        self.log.borrow().events.clone()
    }

    pub fn mark(&self) -> usize {
        self.log.borrow().events.len()
    }

    pub fn events_since(&self, mark: usize) -> Vec<BoardEvent> {
        self.log.borrow().events[mark..].to_vec()
    }

    pub fn lit_events_since(&self, mark: usize) -> Vec<(usize, bool)> {
        self.events_since(mark)
            .into_iter()
            .filter_map(|event| match event {
                BoardEvent::Lit(index, lit) => Some((index, lit)),
                _ => None,
            })
            .collect()
    }

    /// Cells currently lit, replaying events since the last grid rebuild.
    pub fn lit_cells(&self) -> Vec<usize> {
        let mut lit = BTreeSet::new();
        for event in self.log.borrow().events.iter() {
            match event {
                BoardEvent::Grid(_) => lit.clear(),
                BoardEvent::Lit(index, true) => {
                    lit.insert(*index);
                }
                BoardEvent::Lit(index, false) => {
                    lit.remove(index);
                }
                _ => {}
            }
        }
        lit.into_iter().collect()
    }

    pub fn grid_sizes(&self) -> Vec<usize> {
        self.log
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                BoardEvent::Grid(size) => Some(*size),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<String> {
        self.log.borrow().events.iter().rev().find_map(|event| match event {
            BoardEvent::Status(label) => Some(label.clone()),
            _ => None,
        })
    }

    pub fn last_difficulty(&self) -> Option<(usize, usize)> {
        self.log.borrow().events.iter().rev().find_map(|event| match event {
            BoardEvent::Difficulty(grid, length) => Some((*grid, *length)),
            _ => None,
        })
    }

    pub fn pending_prompts(&self) -> Vec<String> {
        self.log
            .borrow()
            .prompts
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    /// Answers the oldest open prompt.
    pub fn acknowledge(&self) {
        let on_ack = {
            let mut log = self.log.borrow_mut();
            if log.prompts.is_empty() {
                panic!("no prompt to acknowledge");
            }
            log.prompts.remove(0).1
        };
        on_ack();
    }

    pub fn click(&self, index: usize) {
        let handler = self.log.borrow().handler.clone();
        if let Some(handler) = handler {
            handler(index);
        }
    }
}

impl Board for RecordingBoard {
    fn render_grid(&self, grid_size: usize, on_activate: CellHandler) {
        let mut log = self.log.borrow_mut();
        log.events.push(BoardEvent::Grid(grid_size));
        log.handler = Some(on_activate);
    }

    fn set_cell_lit(&self, index: usize, lit: bool) {
        self.log.borrow_mut().events.push(BoardEvent::Lit(index, lit));
    }

    fn set_status_text(&self, label: &str) {
        self.log
            .borrow_mut()
            .events
            .push(BoardEvent::Status(label.to_string()));
    }

    fn set_difficulty_display(&self, grid_size: usize, sequence_length: usize) {
        self.log
            .borrow_mut()
            .events
            .push(BoardEvent::Difficulty(grid_size, sequence_length));
    }

    fn prompt_acknowledgment(&self, message: &str, on_ack: Box<dyn FnOnce()>) {
        let mut log = self.log.borrow_mut();
        log.events.push(BoardEvent::Prompt(message.to_string()));
        log.prompts.push((message.to_string(), on_ack));
    }
}

struct Scheduled {
    id: u64,
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    queue: Vec<Scheduled>,
    cancelled: Vec<Scheduled>,
    peak_live: usize,
}

/// Virtual clock; time only moves when the test advances it.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn live_count(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    pub fn peak_live_count(&self) -> usize {
        self.clock.borrow().peak_live
    }

    /// Runs every callback due within `by`, in due order.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let earliest = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(_, entry)| (entry.due, entry.id))
                    .map(|(position, _)| position);
                earliest.map(|position| {
                    let entry = clock.queue.remove(position);
                    clock.now = entry.due;
                    entry.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn run_until_idle(&self) {
        loop {
            let next_due = self.clock.borrow().queue.iter().map(|entry| entry.due).min();
            let Some(due) = next_due else {
                break;
            };
            let now = self.clock.borrow().now;
            self.advance(due.saturating_sub(now));
        }
    }

    /// Fires callbacks that were cancelled, as a late timer would. Returns
    /// how many ran.
    pub fn fire_cancelled(&self) -> usize {
        let cancelled = std::mem::take(&mut self.clock.borrow_mut().cancelled);
        let count = cancelled.len();
        for entry in cancelled {
            (entry.callback)();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> u64 {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + delay;
        clock.queue.push(Scheduled { id, due, callback });
        clock.peak_live = clock.peak_live.max(clock.queue.len());
        id
    }

    fn cancel(&self, handle: u64) {
        let mut clock = self.clock.borrow_mut();
        if let Some(position) = clock.queue.iter().position(|entry| entry.id == handle) {
            let entry = clock.queue.remove(position);
            clock.cancelled.push(entry);
        }
    }
}
