use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gettextrs::gettext;
use tracing::{debug, error, info};

use super::display::{Board, CellHandler};
use super::error::GameError;
use super::progression::StepDifficulty;
use super::settings::Timings;
use super::state::{InputOutcome, Phase, Round, Session};
use super::timers::Scheduler;

fn ready_label() -> String {
    gettext("READY TO PLAY")
}

fn stop_label() -> String {
    gettext("STOP")
}

fn win_message() -> String {
    gettext("Correct! Memorize the next sequence")
}

fn loss_message() -> String {
    gettext("Wrong sequence! Try again!")
}

struct Pending<H> {
    id: u64,
    handle: H,
    /// Cell this timer is due to switch off, if any.
    unlights: Option<usize>,
}

pub struct Game<B: Board, S: Scheduler> {
    this: Weak<RefCell<Game<B, S>>>,
    session: Session,
    round: Round,
    is_playing: bool,
    can_click: bool,
    should_stop: bool,
    round_id: u64,
    next_timer_id: u64,
    pending: Option<Pending<S::Handle>>,
    timings: Timings,
    board: B,
    scheduler: S,
}

impl<B: Board + 'static, S: Scheduler + 'static> Game<B, S> {
    fn phase(&self) -> Phase {
        match (self.is_playing, self.can_click) {
            (false, _) => Phase::Idle,
            (true, false) => Phase::Showing,
            (true, true) => Phase::AwaitingInput,
        }
    }

    fn cell_handler(&self) -> CellHandler {
        let this = self.this.clone();
        Rc::new(move |index| {
            let Some(inner) = this.upgrade() else {
                return;
            };
            if let Err(err) = (GameController { inner }).handle_input(index) {
                error!(%err, "cell activation rejected");
            }
        })
    }

    /// Cancels the outstanding timer and switches off the cell it would
    /// have switched off.
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.handle);
            if let Some(cell) = pending.unlights {
                self.board.set_cell_lit(cell, false);
            }
            debug!(timer_id = pending.id, "cancelled pending timer");
        }
    }

    /// Replaces the single pending timer. The callback is dropped unless the
    /// timer is still the pending one when it fires.
    fn defer(
        &mut self,
        delay: Duration,
        unlights: Option<usize>,
        step: impl FnOnce(&GameController<B, S>) + 'static,
    ) {
        self.cancel_pending();
        self.next_timer_id = self.next_timer_id.wrapping_add(1);
        let timer_id = self.next_timer_id;
        let this = self.this.clone();
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                let Some(inner) = this.upgrade() else {
                    return;
                };
                {
                    let mut game = inner.borrow_mut();
                    if game.pending.as_ref().map(|pending| pending.id) != Some(timer_id) {
                        debug!(timer_id, "stale timer ignored");
                        return;
                    }
                    game.pending = None;
                }
                step(&GameController { inner });
            }),
        );
        self.pending = Some(Pending {
            id: timer_id,
            handle,
            unlights,
        });
    }

    fn refresh_board(&mut self) {
        self.board.set_difficulty_display(
            self.session.grid_size(),
            self.session.sequence_length(),
        );
        let handler = self.cell_handler();
        self.board.render_grid(self.session.grid_size(), handler);
    }

    /// Drops the round and its timer but keeps the difficulty reached.
    fn partial_reset(&mut self) {
        self.cancel_pending();
        self.end_round();
        self.refresh_board();
    }

    fn end_round(&mut self) {
        self.is_playing = false;
        self.can_click = false;
        self.round.clear();
        self.round_id = self.round_id.wrapping_add(1);
        self.board.set_status_text(&ready_label());
    }
}

/// Drives rounds: generation, playback, input checking and progression.
pub struct GameController<B: Board, S: Scheduler> {
    inner: Rc<RefCell<Game<B, S>>>,
}

impl<B: Board, S: Scheduler> Clone for GameController<B, S> {
    fn clone(&self) -> Self {
        GameController {
            inner: self.inner.clone(),
        }
    }
}

impl<B: Board + 'static, S: Scheduler + 'static> GameController<B, S> {
    pub fn new(board: B, scheduler: S, timings: Timings) -> Self {
        let inner = Rc::new_cyclic(|this| {
            RefCell::new(Game {
                this: this.clone(),
                session: Session::default(),
                round: Round::default(),
                is_playing: false,
                can_click: false,
                should_stop: false,
                round_id: 0,
                next_timer_id: 0,
                pending: None,
                timings,
                board,
                scheduler,
            })
        });
        {
            let mut game = inner.borrow_mut();
            game.board.set_status_text(&ready_label());
            game.refresh_board();
        }
        GameController { inner }
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase()
    }

    pub fn step(&self) -> u32 {
        self.inner.borrow().session.step
    }

    pub fn difficulty(&self) -> StepDifficulty {
        self.inner.borrow().session.difficulty
    }

    pub fn is_playing(&self) -> bool {
        self.inner.borrow().is_playing
    }

    /// Start/stop control.
    pub fn toggle(&self) {
        if self.is_playing() {
            self.request_stop();
        } else {
            self.start();
        }
    }

    pub fn start(&self) {
        let round = {
            let game = self.inner.borrow();
            if game.is_playing {
                debug!("start ignored, round already running");
                return;
            }
            Round::generate(game.session.difficulty, &mut rand::rng())
        };
        self.begin_round(round);
    }

    fn begin_round(&self, round: Round) {
        let round_id = {
            let mut game = self.inner.borrow_mut();
            if game.is_playing {
                return;
            }
            game.cancel_pending();
            game.should_stop = false;
            game.is_playing = true;
            game.can_click = false;
            game.round = round;
            game.round_id = game.round_id.wrapping_add(1);
            game.board.set_status_text(&stop_label());
            info!(
                step = game.session.step,
                grid_size = game.session.grid_size(),
                sequence_length = game.session.sequence_length(),
                "round started"
            );
            game.round_id
        };
        self.show_step(round_id, 0);
    }

    /// Lights the cell at `position`, or opens input once the whole
    /// sequence has been shown.
    fn show_step(&self, round_id: u64, position: usize) {
        let mut game = self.inner.borrow_mut();
        if game.round_id != round_id || game.should_stop {
            debug!(position, "playback aborted");
            return;
        }
        let Some(&cell) = game.round.sequence.get(position) else {
            game.can_click = true;
            debug!("playback finished, awaiting input");
            return;
        };
        debug!(position, cell, "showing cell");
        game.board.set_cell_lit(cell, true);
        let delay = game.timings.lit();
        game.defer(delay, Some(cell), move |controller| {
            controller.finish_step(round_id, position, cell);
        });
    }

    fn finish_step(&self, round_id: u64, position: usize, cell: usize) {
        let mut game = self.inner.borrow_mut();
        if game.round_id != round_id {
            return;
        }
        game.board.set_cell_lit(cell, false);
        let delay = game.timings.gap();
        game.defer(delay, None, move |controller| {
            controller.show_step(round_id, position + 1);
        });
    }

    /// Stops the running round right away. The difficulty reached is kept.
    pub fn request_stop(&self) {
        let mut game = self.inner.borrow_mut();
        game.should_stop = true;
        game.partial_reset();
        info!(step = game.session.step, "stop requested");
    }

    pub fn handle_input(&self, index: usize) -> Result<InputOutcome, GameError> {
        let outcome = {
            let mut game = self.inner.borrow_mut();
            let cells = game.session.cell_count();
            if index >= cells {
                return Err(GameError::CellOutOfRange { index, cells });
            }
            if !game.is_playing || !game.can_click {
                return Ok(InputOutcome::Ignored);
            }
            game.cancel_pending();
            game.board.set_cell_lit(index, true);
            let flash = game.timings.flash();
            game.defer(flash, Some(index), move |controller| {
                controller.inner.borrow().board.set_cell_lit(index, false);
            });
            game.round.record(index)
        };
        match outcome {
            InputOutcome::Lost => self.lose(),
            InputOutcome::Won => self.win(),
            InputOutcome::Accepted | InputOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    fn lose(&self) {
        let mut game = self.inner.borrow_mut();
        game.end_round();
        info!(step = game.session.step, "round lost");
        let round_id = game.round_id;
        let this = game.this.clone();
        game.board.prompt_acknowledgment(
            &loss_message(),
            Box::new(move || {
                if let Some(inner) = this.upgrade() {
                    (GameController { inner }).acknowledge_loss(round_id);
                }
            }),
        );
    }

    fn acknowledge_loss(&self, round_id: u64) {
        let mut game = self.inner.borrow_mut();
        if game.round_id != round_id {
            debug!("loss acknowledged after a newer round began");
            return;
        }
        game.partial_reset();
    }

    fn win(&self) {
        let mut game = self.inner.borrow_mut();
        game.cancel_pending();
        game.end_round();
        game.session.advance();
        info!(
            step = game.session.step,
            grid_size = game.session.grid_size(),
            sequence_length = game.session.sequence_length(),
            "round won"
        );
        game.refresh_board();
        let round_id = game.round_id;
        let this = game.this.clone();
        game.board.prompt_acknowledgment(
            &win_message(),
            Box::new(move || {
                if let Some(inner) = this.upgrade() {
                    (GameController { inner }).acknowledge_win(round_id);
                }
            }),
        );
    }

    fn acknowledge_win(&self, round_id: u64) {
        let proceed = {
            let game = self.inner.borrow();
            game.round_id == round_id && !game.should_stop && !game.is_playing
        };
        if proceed {
            self.start();
        } else {
            debug!("auto-continue suppressed");
        }
    }

    /// Back to the first step with an idle 3x3 grid.
    pub fn restart(&self) {
        let mut game = self.inner.borrow_mut();
        game.session = Session::default();
        game.partial_reset();
        info!("restarted from the first step");
    }

    pub fn shutdown(&self) {
        let mut game = self.inner.borrow_mut();
        game.cancel_pending();
        game.round_id = game.round_id.wrapping_add(1);
    }
}
