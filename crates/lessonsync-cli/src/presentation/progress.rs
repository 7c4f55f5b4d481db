//! Progress rendering: an indicatif bar on a terminal, dots otherwise.

use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use lessonsync_core::{SyncEvent, SyncEventEmitterPort, SyncPhase};
use lessonsync_download::ProgressThrottle;

/// Width dot progress fills, message included.
pub const CONSOLE_COLUMN_COUNT: usize = 80;

// ============================================================================
// Console Progress
// ============================================================================

/// Renders [`SyncEvent`]s for one phase at a time.
pub struct ConsoleProgress {
    inner: ProgressRender,
    throttle: ProgressThrottle,
}

enum ProgressRender {
    Bar(Option<ProgressBar>),
    Dots(DotProgress),
}

impl ConsoleProgress {
    /// Pick bar or dot output depending on whether stdout is a terminal.
    pub fn new() -> Self {
        if io::stdout().is_terminal() {
            Self::with_render(ProgressRender::Bar(None))
        } else {
            Self::plain()
        }
    }

    /// Dot output regardless of the terminal.
    pub fn plain() -> Self {
        Self::with_render(ProgressRender::Dots(DotProgress::default()))
    }

    fn with_render(inner: ProgressRender) -> Self {
        Self {
            inner,
            throttle: ProgressThrottle::default(),
        }
    }

    pub fn handle(&mut self, event: &SyncEvent) {
        match *event {
            SyncEvent::PhaseStarted { phase, total } => {
                self.throttle.reset();
                self.start(&phase_message(phase, total));
            }
            SyncEvent::Progress {
                finished, total, ..
            } => {
                if self.throttle.should_emit(finished, total) {
                    self.update(finished, total);
                }
            }
            SyncEvent::PhaseFinished { .. } => self.finish(),
        }
    }

    fn start(&mut self, message: &str) {
        match &mut self.inner {
            ProgressRender::Bar(slot) => {
                let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
                bar.set_style(bar_style());
                bar.set_message(message.to_string());
                *slot = Some(bar);
            }
            ProgressRender::Dots(dots) => dots.start(message),
        }
    }

    fn update(&mut self, finished: u64, total: u64) {
        match &mut self.inner {
            ProgressRender::Bar(Some(bar)) => {
                bar.set_length(total);
                bar.set_position(finished.min(total));
            }
            ProgressRender::Bar(None) => {}
            ProgressRender::Dots(dots) => dots.update(finished, total),
        }
    }

    fn finish(&mut self) {
        match &mut self.inner {
            ProgressRender::Bar(slot) => {
                if let Some(bar) = slot.take() {
                    bar.finish();
                }
            }
            ProgressRender::Dots(dots) => dots.finish(),
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} {bar:30.cyan/blue} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn phase_message(phase: SyncPhase, total: u64) -> String {
    match phase {
        SyncPhase::TopicList => phase.label().to_string(),
        SyncPhase::TopicContent | SyncPhase::Images => format!("{} ({total})", phase.label()),
    }
}

// ============================================================================
// Dot Progress (non-terminal)
// ============================================================================

#[derive(Default)]
struct DotProgress {
    message_len: usize,
    printed: usize,
}

impl DotProgress {
    fn start(&mut self, message: &str) {
        self.message_len = message.chars().count();
        self.printed = 0;
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{message}");
        let _ = stdout.flush();
    }

    fn update(&mut self, finished: u64, total: u64) {
        let target = dot_count(self.message_len, finished, total);
        if target > self.printed {
            let mut stdout = io::stdout().lock();
            let _ = write!(stdout, "{}", ".".repeat(target - self.printed));
            let _ = stdout.flush();
            self.printed = target;
        }
    }

    fn finish(&mut self) {
        println!();
        self.printed = 0;
    }
}

/// Dots shown once `finished` of `total` items are done.
pub fn dot_count(message_len: usize, finished: u64, total: u64) -> usize {
    if total == 0 {
        return 0;
    }
    let room = CONSOLE_COLUMN_COUNT.saturating_sub(message_len) as u64;
    usize::try_from(room * finished.min(total) / total).unwrap_or(0)
}

// ============================================================================
// Emitter
// ============================================================================

/// Renders events as they are emitted, so output stays ordered with the
/// summaries printed between phases.
#[derive(Clone)]
pub struct ConsoleSyncEmitter {
    progress: Arc<Mutex<ConsoleProgress>>,
}

impl ConsoleSyncEmitter {
    pub fn new(progress: ConsoleProgress) -> Self {
        Self {
            progress: Arc::new(Mutex::new(progress)),
        }
    }
}

impl SyncEventEmitterPort for ConsoleSyncEmitter {
    fn emit(&self, event: SyncEvent) {
        if let Ok(mut progress) = self.progress.lock() {
            progress.handle(&event);
        }
    }

    fn clone_box(&self) -> Box<dyn SyncEventEmitterPort> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_count_fills_remaining_columns() {
        assert_eq!(dot_count(30, 0, 10), 0);
        assert_eq!(dot_count(30, 5, 10), 25);
        assert_eq!(dot_count(30, 10, 10), 50);
    }

    #[test]
    fn test_dot_count_edge_cases() {
        assert_eq!(dot_count(30, 3, 0), 0);
        assert_eq!(dot_count(100, 1, 1), 0);
        assert_eq!(dot_count(30, 20, 10), 50);
    }

    #[test]
    fn test_phase_message_includes_totals() {
        assert_eq!(
            phase_message(SyncPhase::TopicContent, 12),
            "Downloading topic content (12)"
        );
        assert_eq!(
            phase_message(SyncPhase::TopicList, 1),
            "Downloading topic list"
        );
    }
}
