use marrow_core::search::termination::StopFlag;

use crate::result::MarrowResult;

/// The signals to listen to for termination.
const TERMINATION_SIGNALS: &[std::ffi::c_int] =
    &[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM];

/// Create a [`StopFlag`] which is raised when the process receives SIGINT or SIGTERM.
pub(crate) fn install() -> MarrowResult<StopFlag> {
    let stop = StopFlag::new();

    for &signal in TERMINATION_SIGNALS {
        let _ = signal_hook::flag::register(signal, stop.as_atomic())?;
    }

    Ok(stop)
}
