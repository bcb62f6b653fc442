//! Replay scripts: recorded game states fed to the actuator one step at a time.
//!
//! A script is JSON lines. Blank lines and lines starting with `#` are
//! skipped; every other line is one [`ReplayStep`] tagged by `op`:
//!
//! ```text
//! {"op":"actuate","grid":{"size":4,"cells":[...]},"metadata":{"score":0,"bestScore":0}}
//! {"op":"updateGrid","grid":{...},"metadata":{...,"numeralType":2}}
//! {"op":"continue"}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::actuator::{ActuatorError, HtmlActuator};
use crate::dom::Surface;
use crate::types::{Grid, Metadata, NumeralType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ReplayStep {
    Actuate { grid: Grid, metadata: Metadata },
    UpdateGrid { grid: Grid, metadata: Metadata },
    Continue,
}

/// A step and the script line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: ReplayStep,
}

/// A parsed replay script plus a cursor into it.
#[derive(Debug, Clone, Default)]
pub struct Replay {
    steps: Vec<ScriptLine>,
    next: usize,
    /// Last grid and metadata handed to the actuator.
    current: Option<(Grid, Metadata)>,
}

impl Replay {
    pub fn new(steps: Vec<ScriptLine>) -> Self {
        Self {
            steps,
            next: 0,
            current: None,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("replay: cannot open {}", path.display()))?;
        let replay = Self::from_reader(file)
            .with_context(|| format!("replay: cannot parse {}", path.display()))?;
        info!(
            "loaded {} replay steps from {}",
            replay.len(),
            path.display()
        );
        Ok(replay)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut steps = Vec::new();
        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line_no = idx + 1;
            let line = line.with_context(|| format!("line {}: read failed", line_no))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let step = serde_json::from_str::<ReplayStep>(trimmed)
                .map_err(|e| anyhow!("line {}: {}", line_no, e))?;
            steps.push(ScriptLine {
                line: line_no,
                step,
            });
        }
        Ok(Self::new(steps))
    }

    pub fn parse_str(script: &str) -> Result<Self> {
        Self::from_reader(script.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[ScriptLine] {
        &self.steps
    }

    /// Number of steps already applied.
    pub fn position(&self) -> usize {
        self.next
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.steps.len()
    }

    pub fn current(&self) -> Option<&(Grid, Metadata)> {
        self.current.as_ref()
    }

    /// Apply the next step. Returns `Ok(false)` once the script is exhausted.
    pub fn apply_next<S: Surface>(&mut self, actuator: &mut HtmlActuator<S>) -> Result<bool> {
        let Some(entry) = self.steps.get(self.next) else {
            return Ok(false);
        };
        let line = entry.line;
        debug!("replay step {} (line {})", self.next + 1, line);

        match &entry.step {
            ReplayStep::Actuate { grid, metadata } => {
                actuator.actuate(grid, metadata);
                self.current = Some((grid.clone(), *metadata));
            }
            ReplayStep::UpdateGrid { grid, metadata } => {
                actuator
                    .update_grid(grid, metadata)
                    .with_context(|| format!("line {}: updateGrid failed", line))?;
                self.current = Some((grid.clone(), *metadata));
            }
            ReplayStep::Continue => actuator.continue_game(),
        }

        self.next += 1;
        Ok(true)
    }

    /// Redraw the current state in another numeral mode, in place.
    ///
    /// Returns `Ok(false)` when nothing has been shown yet, or when the
    /// rendered tiles no longer match the current grid (a render is still
    /// queued); the next render picks up the mode either way.
    pub fn set_numerals<S: Surface>(
        &mut self,
        actuator: &mut HtmlActuator<S>,
        numeral_type: NumeralType,
    ) -> Result<bool> {
        let Some((grid, metadata)) = self.current.as_mut() else {
            return Ok(false);
        };
        metadata.numeral_type = numeral_type;

        match actuator.update_grid(grid, metadata) {
            Ok(()) => Ok(true),
            Err(err @ ActuatorError::EmptyCell { .. }) => {
                warn!("numeral switch skipped: {}", err);
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Apply every remaining step, draining animation frames after each one.
    pub fn run_to_end<S: Surface>(&mut self, actuator: &mut HtmlActuator<S>) -> Result<usize> {
        let mut applied = 0;
        while self.apply_next(actuator)? {
            actuator.flush_frames();
            applied += 1;
        }
        Ok(applied)
    }
}
