//! Opt-in logging initializer.
//!
//! A library should not install a global logger on its caller's behalf,
//! so this is only reachable behind the `cli` feature, for the
//! standalone `play` binary. Library code elsewhere just emits
//! `log::trace!`/`log::debug!`/`log::warn!` at the seams called out in
//! §4.5 and leaves subscription to the caller.

#![cfg(feature = "cli")]

/// Combined terminal + file logger, modeled on the teacher crate's own
/// `simplelog` setup (`init` in its top-level `lib.rs`).
pub fn init(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(level, config, simplelog::TerminalMode::Mixed, simplelog::ColorChoice::Auto);
    if simplelog::CombinedLogger::init(vec![term]).is_err() {
        log::warn!("logger already initialized");
    }
}
