use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Progress for one report run: a terminal bar, or a single log line in CI.
pub enum Progress {
    Bar(ProgressBar),
    Log,
}

impl Progress {
    pub fn start(total: u64, ci: bool, label: &str) -> Self {
        if ci {
            info!("{} ...", label);
            return Progress::Log;
        }

        let pb = ProgressBar::new(total);
        let template = format!(
            " {:<24} [{{bar:40}}] {{percent:>3}}%     Remaining: {{eta}}     Time: {{elapsed}}",
            label
        );
        match ProgressStyle::default_bar().template(&template) {
            Ok(style) => pb.set_style(style.progress_chars("= ")),
            Err(e) => tracing::warn!("Bad progress template: {}", e),
        }
        Progress::Bar(pb)
    }

    pub fn tick(&self) {
        if let Progress::Bar(pb) = self {
            pb.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Progress::Bar(pb) = self {
            pb.finish_and_clear();
        }
    }
}
