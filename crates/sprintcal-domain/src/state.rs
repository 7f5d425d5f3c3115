//! Point-in-time capture of the sprint store.
//!
//! `StoreState` is what gets persisted: every sprint plus the color cursor, so
//! rotation continues where it left off after a reload.

use crate::Sprint;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    pub sprints: Vec<Sprint>,
    pub color_index: usize,
}

impl StoreState {
    pub fn new(sprints: Vec<Sprint>, color_index: usize) -> Self {
        Self {
            sprints,
            color_index,
        }
    }
}
