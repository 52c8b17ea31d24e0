use settrigger::args::decode_args;
use settrigger::error::TriggerError;
use std::env;
use trigger_hal::{CardLayout, IoPortBackend};

fn main() {
    env_logger::init();

    let mut args = env::args_os();
    let program = args
        .next()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "settrigger".to_string());

    // Arguments are checked inside `run` before any port is touched.
    let result = decode_args(args).and_then(|args| {
        let mut backend = IoPortBackend::new();
        settrigger::run(&args, &mut backend, &CardLayout::default())
    });
    if let Err(e) = result {
        report(&program, &e);
        std::process::exit(e.exit_code());
    }
}

fn report(program: &str, err: &TriggerError) {
    match err {
        TriggerError::Usage => eprintln!("Usage: {program} <base_addr_hex> [pin]..."),
        _ => eprintln!("{program}: {err}"),
    }
}
