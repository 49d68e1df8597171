use hsh::error::USAGE_ERROR_STATUS;
use hsh::flags::Flags;
use hsh::shell::Shell;
use std::{env, io, process};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(flags: &Flags) {
    let filter = if flags.is_set("debug") {
        EnvFilter::new("debug")
    } else {
        let fallback = if flags.is_set("quiet") { "error" } else { "warn" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let name = args.first().cloned().unwrap_or_else(|| "hsh".to_string());

    let mut flags = Flags::new();
    if let Err(e) = flags.parse(args.get(1..).unwrap_or_default()) {
        eprintln!("{name}: {e}");
        eprint!("{}", flags.usage());
        process::exit(USAGE_ERROR_STATUS);
    }

    if flags.is_set("help") {
        flags.print_help();
        return;
    }

    if flags.is_set("version") {
        println!("hsh {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_tracing(&flags);

    let mut shell_args = vec![name.clone()];
    shell_args.extend(flags.positionals().iter().cloned());

    let code = match Shell::new(shell_args, &flags).and_then(|mut shell| shell.run()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{name}: 0: {e}");
            e.status()
        }
    };
    process::exit(code);
}
