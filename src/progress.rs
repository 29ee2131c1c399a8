// src/progress.rs
/// Progress reporting for a collection run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of pages the vote count implies.
    fn begin(&mut self, _pages: u32) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// About to fetch `page` of `pages`; `votes` rows collected so far.
    fn page_start(&mut self, _page: u32, _pages: u32, _votes: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
