/// ProgressReporter port for user-facing progress output
///
/// Progress goes to the user, not to the log: implementations write to stderr
/// so stdout stays reserved for the rendered notice.
pub trait ProgressReporter {
    /// Reports a single status line
    fn report(&self, message: &str);

    /// Reports that `current` of `total` items are done
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a failure the run recovered from
    fn report_error(&self, message: &str);

    /// Reports the end of an operation
    fn report_completion(&self, message: &str);
}
