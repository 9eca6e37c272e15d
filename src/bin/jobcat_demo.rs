use std::{env, process, sync::Arc};

use jobcat::{
    cat_error, cat_info,
    config::LogConfig,
    log::{self, CaptureSink, ChannelSink, Logger},
};

fn main() {
    // --- Parse CLI args ----------------------------------------------------
    //
    // Supported:
    //   cargo run --bin jobcat_demo
    //      -> default console settings (stderr, enabled)
    //
    //   cargo run --bin jobcat_demo -- jobcat.conf
    //      -> reads the [Logging] section of jobcat.conf
    let args: Vec<String> = env::args().collect();

    let config = match args.len() {
        1 => LogConfig::default(),
        2 => match LogConfig::load(&args[1]) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("[jobcat_demo] {e}");
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage:");
            eprintln!("  {}            # default console settings", args[0]);
            eprintln!("  {} [CONFIG]   # e.g. jobcat.conf", args[0]);
            process::exit(1);
        }
    };
    let config = config.with_env_overrides();
    log::init_global(&config);

    // --- Register host sinks -----------------------------------------------
    let capture = Arc::new(CaptureSink::new());
    let (channel, rx) = ChannelSink::bounded(16);
    log::global().add_sink(capture.clone());
    log::global().add_sink(Arc::new(channel));

    let cat = Logger::new("Demo");
    cat_info!(cat, "console sink enabled: {}", log::global().is_default_enabled());
    cat.debug("scheduling job 1");

    let err = std::io::Error::other("storage unavailable");
    cat_error!(cat, err: &err; "job {} failed", 1);

    // Silence the console; host sinks keep receiving.
    log::global().set_default_enabled(false);
    cat.warn("console is off now");

    println!("captured {} messages:", capture.len());
    for m in capture.records() {
        match m.error {
            Some(e) => println!("  [{}] {}: {} ({e})", m.level, m.tag, m.text),
            None => println!("  [{}] {}: {}", m.level, m.tag, m.text),
        }
    }
    println!("channel received {} messages", rx.try_iter().count());
}
