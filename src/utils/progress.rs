//! Terminal progress indicators

use core::time::Duration;
use indicatif::ProgressBar;
use std::borrow::Cow;

/// Ticking spinner for a blocking step; hidden when stderr is not a terminal
pub fn spinner<M: Into<Cow<'static, str>>>(message: M) -> ProgressBar {
    let progress = ProgressBar::new_spinner().with_message(message);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
