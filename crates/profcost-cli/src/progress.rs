//! Terminal progress display.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress over a fixed list of professions.
pub struct ProfessionProgress {
    bar: ProgressBar,
}

impl ProfessionProgress {
    pub fn new(phase: &str, total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid template")
                .progress_chars("##-"),
        );
        bar.set_prefix(phase.to_string());
        Self { bar }
    }

    /// Mark one profession done.
    pub fn done(&self, profession: &str) {
        self.bar.set_message(profession.to_string());
        self.bar.inc(1);
    }

    /// Print a line without tearing the bar.
    pub fn println(&self, line: &str) {
        self.bar.println(line);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
