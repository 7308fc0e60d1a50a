//=========================================================================
// Stream Window
//=========================================================================
//
// Resident sliding set of placed segments, oldest first.
//
//   front ──► [seg 0][seg 1] ... [seg n-1] ◄── back (cursor)
//
// The front is retired once the player passes its retirement threshold;
// new segments are appended at the cursor. Thresholds are non-decreasing
// from front to back as long as templates only advance forward.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use super::SegmentTemplate;

/// Share of a segment's own offset used as the retirement lookahead.
pub const RETIREMENT_LOOKAHEAD: f32 = 0.2;

//=== PlacedSegment =======================================================

/// A template instance living in a window.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSegment {
    pub template: Arc<SegmentTemplate>,
    /// World-space origin of the segment.
    pub origin: Vec3,
    /// Forward position past which the segment is retired.
    pub retire_at: f32,
}

//=== StreamWindow ========================================================

#[derive(Debug, Clone)]
pub struct StreamWindow {
    segments: VecDeque<PlacedSegment>,
    cursor: Vec3,
    target_len: usize,
}

impl StreamWindow {
    pub fn new(target_len: usize) -> Self {
        Self {
            segments: VecDeque::with_capacity(target_len),
            cursor: Vec3::ZERO,
            target_len,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Where the next segment will be placed.
    pub fn cursor(&self) -> Vec3 {
        self.cursor
    }

    pub fn front(&self) -> Option<&PlacedSegment> {
        self.segments.front()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PlacedSegment> {
        self.segments.iter()
    }

    /// True once the player has passed the front segment's threshold.
    pub fn front_consumed(&self, forward: f32) -> bool {
        self.front().map_or(false, |seg| forward >= seg.retire_at)
    }

    //--- Mutation ---------------------------------------------------------

    /// Drops every segment and moves the cursor to `cursor`.
    pub fn reset(&mut self, cursor: Vec3) {
        self.segments.clear();
        self.cursor = cursor;
    }

    /// Places `template` at the cursor and advances the cursor by `offset`.
    ///
    /// `offset` is the template's offset after any spacing adjustment.
    pub fn place(&mut self, template: Arc<SegmentTemplate>, offset: Vec3) -> &PlacedSegment {
        let origin = self.cursor;
        self.cursor += offset;
        let retire_at = (self.cursor + offset * RETIREMENT_LOOKAHEAD).z;

        self.segments.push_back(PlacedSegment {
            template,
            origin,
            retire_at,
        });
        // Just pushed
        &self.segments[self.segments.len() - 1]
    }

    /// Removes and returns the oldest segment.
    pub fn retire_front(&mut self) -> Option<PlacedSegment> {
        self.segments.pop_front()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
