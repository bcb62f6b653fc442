//! HtmlActuator: projects grid + metadata onto a display surface.
//!
//! Rendering is deferred: [`HtmlActuator::actuate`] snapshots its inputs and
//! queues a render task, and the host runs queued work by calling
//! [`HtmlActuator::run_animation_frame`] once per repaint. Sliding tiles are
//! first drawn at their previous position and moved one frame later, which is
//! what lets a stylesheet transition animate the slide.

use std::collections::BTreeMap;

use log::{debug, trace};

use kanji_2048_dom::{Document, ElementId, FrameQueue, FrameRequestId, Surface};
use kanji_2048_types::{
    classes, Grid, Metadata, NumeralType, Position, Tile, SUPER_TILE_THRESHOLD,
};

use crate::error::ActuatorError;
use crate::message::MessageState;
use crate::numerals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorConfig {
    /// Numeral mode used until the first actuation or grid refresh.
    pub initial_numeral_type: NumeralType,
}

/// Regions of the page the actuator writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Containers {
    /// Bound for layout parity; nothing is written here.
    pub header: ElementId,
    pub tiles: ElementId,
    pub score: ElementId,
    pub best: ElementId,
    pub message: ElementId,
    /// The `<p>` inside the message region.
    pub message_text: ElementId,
}

impl Containers {
    fn locate<S: Surface>(surface: &S) -> Result<Self, ActuatorError> {
        let find = |class: &'static str| {
            surface
                .query_selector(&format!(".{}", class))
                .ok_or(ActuatorError::MissingContainer(class))
        };
        let message = find(classes::GAME_MESSAGE)?;
        let message_text = surface
            .find_descendant(message, "p")
            .ok_or(ActuatorError::MissingMessageText)?;
        Ok(Self {
            header: find(classes::HEADER_CONTAINER)?,
            tiles: find(classes::TILE_CONTAINER)?,
            score: find(classes::SCORE_CONTAINER)?,
            best: find(classes::BEST_CONTAINER)?,
            message,
            message_text,
        })
    }
}

/// Values captured when an actuation is requested.
#[derive(Debug, Clone)]
struct RenderSnapshot {
    tiles: Vec<Tile>,
    metadata: Metadata,
}

#[derive(Debug, Clone)]
enum FrameTask {
    Render(RenderSnapshot),
    /// Rewrite a tile's classes so it moves to its current position.
    Slide {
        wrapper: ElementId,
        classes: Vec<String>,
    },
}

#[derive(Debug)]
pub struct HtmlActuator<S: Surface = Document> {
    surface: S,
    containers: Containers,
    /// Last score written by `update_score`; the base for `+delta`.
    score: u64,
    numeral_type: NumeralType,
    message: MessageState,
    frames: FrameQueue<FrameTask>,
    /// `tile-inner` elements by the tile's current position.
    tile_index: BTreeMap<Position, Vec<ElementId>>,
}

impl<S: Surface> HtmlActuator<S> {
    pub fn new(surface: S, config: ActuatorConfig) -> Result<Self, ActuatorError> {
        let containers = Containers::locate(&surface)?;
        Ok(Self {
            surface,
            containers,
            score: 0,
            numeral_type: config.initial_numeral_type,
            message: MessageState::Hidden,
            frames: FrameQueue::new(),
            tile_index: BTreeMap::new(),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn containers(&self) -> &Containers {
        &self.containers
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn numeral_type(&self) -> NumeralType {
        self.numeral_type
    }

    pub fn message_state(&self) -> MessageState {
        self.message
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn pending_frame_tasks(&self) -> usize {
        self.frames.len()
    }

    /// Rendered `tile-inner` elements whose tile currently sits at `pos`.
    pub fn tile_elements_at(&self, pos: Position) -> &[ElementId] {
        self.tile_index.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Queue a full re-render of `grid` and `metadata` for the next frame.
    ///
    /// Both are copied now, so later changes by the caller do not leak into
    /// the queued render.
    pub fn actuate(&mut self, grid: &Grid, metadata: &Metadata) -> FrameRequestId {
        let snapshot = RenderSnapshot {
            tiles: grid.tiles().cloned().collect(),
            metadata: *metadata,
        };
        debug!(
            "actuate queued: {} tiles, score {}, numerals {}",
            snapshot.tiles.len(),
            metadata.score,
            metadata.numeral_type.as_str()
        );
        self.frames.request(FrameTask::Render(snapshot))
    }

    /// Run the work queued before this frame. Returns the number of tasks run.
    pub fn run_animation_frame(&mut self) -> usize {
        let tasks = self.frames.begin_frame();
        let ran = tasks.len();
        for task in tasks {
            match task {
                FrameTask::Render(snapshot) => self.render(snapshot),
                FrameTask::Slide { wrapper, classes } => self.apply_classes(wrapper, &classes),
            }
        }
        if ran > 0 {
            debug!("frame {} ran {} tasks", self.frames.frames_run(), ran);
        }
        ran
    }

    /// Run frames until nothing is queued. Returns the number of frames run.
    pub fn flush_frames(&mut self) -> usize {
        let mut frames = 0;
        while self.has_pending_frames() {
            self.run_animation_frame();
            frames += 1;
        }
        frames
    }

    /// Hide the end-of-game message (restart or keep playing).
    pub fn continue_game(&mut self) {
        self.clear_message();
    }

    /// Render one tile (and, for merges, its sources) into the tile layer.
    pub fn add_tile(&mut self, tile: &Tile) {
        trace!("add_tile {} at ({}, {})", tile.value, tile.x, tile.y);
        let wrapper = self.surface.create_element("div");
        let inner = self.surface.create_element("div");
        let position = tile.previous_position.unwrap_or_else(|| tile.position());

        let mut tile_classes = vec![
            classes::TILE.to_string(),
            classes::value_class(tile.value),
            classes::position_class(position),
        ];
        if tile.value > SUPER_TILE_THRESHOLD {
            tile_classes.push(classes::TILE_SUPER.to_string());
        }
        self.apply_classes(wrapper, &tile_classes);

        self.surface.add_class(inner, classes::TILE_INNER);
        let text = self.translate_kanji(u64::from(tile.value));
        self.surface.set_text_content(inner, &text);

        if tile.previous_position.is_some() {
            // Drawn at the old position first; the move lands next frame.
            tile_classes[2] = classes::position_class(tile.position());
            self.frames.request(FrameTask::Slide {
                wrapper,
                classes: tile_classes,
            });
        } else if let Some(sources) = &tile.merged_from {
            tile_classes.push(classes::TILE_MERGED.to_string());
            self.apply_classes(wrapper, &tile_classes);
            for source in sources.iter() {
                self.add_tile(source);
            }
        } else {
            tile_classes.push(classes::TILE_NEW.to_string());
            self.apply_classes(wrapper, &tile_classes);
        }

        self.surface.append_child(wrapper, inner);
        self.surface.append_child(self.containers.tiles, wrapper);
        self.tile_index
            .entry(tile.position())
            .or_default()
            .push(inner);
    }

    /// Show `score`, with a `+delta` marker when it went up.
    pub fn update_score(&mut self, score: u64) {
        let container = self.containers.score;
        self.surface.clear_children(container);

        let previous = self.score;
        self.score = score;

        let text = self.translate_kanji(score);
        self.surface.set_text_content(container, &text);

        if score > previous {
            let addition = self.surface.create_element("div");
            self.surface.add_class(addition, classes::SCORE_ADDITION);
            let delta = format!("+{}", self.translate_kanji(score - previous));
            self.surface.set_text_content(addition, &delta);
            self.surface.append_child(container, addition);
        }
    }

    pub fn update_best_score(&mut self, best_score: u64) {
        let text = self.translate_kanji(best_score);
        self.surface.set_text_content(self.containers.best, &text);
    }

    /// Show the win (`true`) or loss (`false`) message.
    ///
    /// A different outcome already on screen is replaced, so at most one of
    /// `game-won` / `game-over` is ever set.
    pub fn message(&mut self, won: bool) {
        let next = MessageState::for_outcome(won);
        if self.message.is_visible() && self.message != next {
            self.clear_message();
        }
        if let (Some(class), Some(text)) = (next.class(), next.text()) {
            self.surface.add_class(self.containers.message, class);
            self.surface.set_text_content(self.containers.message_text, text);
        }
        self.message = next;
    }

    pub fn clear_message(&mut self) {
        // One class per call.
        self.surface
            .remove_class(self.containers.message, classes::GAME_WON);
        self.surface
            .remove_class(self.containers.message, classes::GAME_OVER);
        self.message = MessageState::Hidden;
    }

    /// Rewrite the text of every rendered tile and both scores in place.
    ///
    /// Element structure and positions are left alone, so this is meant for
    /// value-only changes such as switching numeral mode. If any rendered
    /// position is empty in `grid`, nothing is written.
    pub fn update_grid(&mut self, grid: &Grid, metadata: &Metadata) -> Result<(), ActuatorError> {
        let mut values = Vec::with_capacity(self.tile_index.len());
        for &pos in self.tile_index.keys() {
            let tile = grid
                .cell(pos)
                .ok_or(ActuatorError::EmptyCell { x: pos.x, y: pos.y })?;
            values.push((pos, tile.value));
        }

        self.numeral_type = metadata.numeral_type;
        debug!(
            "update_grid: {} positions, numerals {}",
            values.len(),
            self.numeral_type.as_str()
        );

        for (pos, value) in values {
            let text = self.translate_kanji(u64::from(value));
            if let Some(inners) = self.tile_index.get(&pos) {
                for &inner in inners {
                    self.surface.set_text_content(inner, &text);
                }
            }
        }

        let score = self.translate_kanji(metadata.score);
        self.surface.set_text_content(self.containers.score, &score);
        let best = self.translate_kanji(metadata.best_score);
        self.surface.set_text_content(self.containers.best, &best);
        Ok(())
    }

    /// Render `number` in the current numeral mode.
    pub fn translate_kanji(&self, number: u64) -> String {
        numerals::translate(number, self.numeral_type)
    }

    fn render(&mut self, snapshot: RenderSnapshot) {
        let RenderSnapshot { tiles, metadata } = snapshot;
        debug!("render: {} tiles, score {}", tiles.len(), metadata.score);

        self.numeral_type = metadata.numeral_type;
        self.surface.clear_children(self.containers.tiles);
        self.tile_index.clear();

        for tile in &tiles {
            self.add_tile(tile);
        }

        self.update_score(metadata.score);
        self.update_best_score(metadata.best_score);

        if metadata.terminated {
            if metadata.over {
                self.message(false);
            } else if metadata.won {
                self.message(true);
            }
        }
    }

    fn apply_classes(&mut self, el: ElementId, tile_classes: &[String]) {
        self.surface.set_class_name(el, &tile_classes.join(" "));
    }
}
