//! Extrusion-axis integration.
//!
//! Replays the motion commands of a document and accumulates the filament
//! length pushed forward through the extruder. Retractions never count:
//! a negative delta is neither added nor subtracted.
//!
//! Handled commands:
//! - `M82` / `M83` switch between absolute and relative E values
//! - `G92 E<v>` re-zeroes the E coordinate without feeding filament
//! - `G0` / `G1` with an `E` word feed (or retract) filament

use log::{debug, trace};

use crate::parser::{parse_line, CommandCode, ParsedLine};

/// Interpretation of E values on move commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtrusionMode {
    /// E is a position on the extrusion axis (`M82`)
    #[default]
    Absolute,
    /// E is an increment (`M83`)
    Relative,
}

/// Simulation state for a single pass over one document.
#[derive(Debug, Clone, Default)]
pub struct ExtrusionState {
    mode: ExtrusionMode,
    position: f64,
    total: f64,
    extruding_moves: usize,
}

impl ExtrusionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ExtrusionMode {
        self.mode
    }

    /// Current E coordinate
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Forward-extruded length so far, in millimeters
    pub fn total_mm(&self) -> f64 {
        self.total.max(0.0)
    }

    /// Number of moves that fed filament forward
    pub fn extruding_moves(&self) -> usize {
        self.extruding_moves
    }

    /// Apply one parsed line to the state
    pub fn apply(&mut self, line: &ParsedLine<'_>) {
        let ParsedLine::Command(cmd) = line else {
            return;
        };
        let Some(code) = cmd.code() else {
            return;
        };

        match code {
            CommandCode::ABSOLUTE_EXTRUSION => {
                trace!("extrusion mode -> absolute");
                self.mode = ExtrusionMode::Absolute;
            }
            CommandCode::RELATIVE_EXTRUSION => {
                trace!("extrusion mode -> relative");
                self.mode = ExtrusionMode::Relative;
            }
            CommandCode::SET_POSITION => {
                if let Some(e) = cmd.param('E') {
                    trace!("extruder position reset {} -> {}", self.position, e);
                    self.position = e;
                }
            }
            CommandCode::RAPID_MOVE | CommandCode::LINEAR_MOVE => {
                if let Some(e) = cmd.param('E') {
                    self.feed(e);
                }
            }
            _ => {}
        }
    }

    fn feed(&mut self, e: f64) {
        let delta = match self.mode {
            ExtrusionMode::Absolute => {
                let delta = e - self.position;
                self.position = e;
                delta
            }
            ExtrusionMode::Relative => {
                self.position += e;
                e
            }
        };

        if delta > 0.0 {
            self.total += delta;
            self.extruding_moves += 1;
        }
    }
}

/// Total forward filament length (mm) fed by the moves of `document`.
pub fn integrate_extrusion(document: &str) -> f64 {
    let mut state = ExtrusionState::new();
    for line in document.lines() {
        state.apply(&parse_line(line));
    }

    debug!(
        "integrated {:.3} mm of filament over {} extruding moves",
        state.total_mm(),
        state.extruding_moves()
    );

    state.total_mm()
}
