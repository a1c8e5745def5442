// src/progress.rs
/// Lightweight progress reporting used by long-running operations (sync/update).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One logical unit completed (e.g. a target's observer list was updated).
    fn item_done(&mut self, _name: &str) {}

    /// One logical unit failed; the message has already been recorded.
    fn item_failed(&mut self, _name: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
