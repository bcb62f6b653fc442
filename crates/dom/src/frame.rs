//! Repaint scheduling.
//!
//! `FrameQueue` stands in for `requestAnimationFrame`: tasks requested now
//! run when the host next calls [`FrameQueue::begin_frame`]. Tasks requested
//! while a frame is running land in the following frame.

/// Identifier returned by [`FrameQueue::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(u64);

#[derive(Debug, Clone)]
pub struct FrameQueue<T> {
    pending: Vec<T>,
    next_request: u64,
    frames_run: u64,
}

impl<T> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_request: 1,
            frames_run: 0,
        }
    }

    pub fn request(&mut self, task: T) -> FrameRequestId {
        let id = FrameRequestId(self.next_request);
        self.next_request += 1;
        self.pending.push(task);
        id
    }

    /// Take every task due in this frame, in request order.
    pub fn begin_frame(&mut self) -> Vec<T> {
        self.frames_run += 1;
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}
