use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use termcolor::{Color, ColorSpec, WriteColor};

pub use log::{debug, error, info, trace, warn};

/// Installs the colored `[LEVEL][module] message` logger. Safe to call more
/// than once; later calls are ignored.
pub fn init_logger() {
    init_with_target(termcolor::BufferWriter::stdout);
}

/// Same as [`init_logger`] but writes to stderr. Used by helper processes
/// whose stdout carries protocol data.
pub fn init_stderr_logger() {
    init_with_target(termcolor::BufferWriter::stderr);
}

fn init_with_target(
    make_writer: fn(termcolor::ColorChoice) -> termcolor::BufferWriter,
) {
    let mut builder =
        Builder::from_env(Env::default().default_filter_or("easel=info"));
    builder.filter_module("winit", LevelFilter::Warn);
    builder.filter_module("softbuffer", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Warn);

    builder.format(move |_buf, record| {
        let writer = make_writer(termcolor::ColorChoice::Auto);
        let mut buffer = writer.buffer();
        let mut spec = ColorSpec::new();

        spec.set_fg(Some(match record.level() {
            log::Level::Trace => Color::Cyan,
            log::Level::Debug => Color::Blue,
            log::Level::Info => Color::Green,
            log::Level::Warn => Color::Yellow,
            log::Level::Error => Color::Red,
        }));

        buffer.set_color(&spec)?;
        let module_path = record.module_path().unwrap_or("<unknown>");
        write!(buffer, "[{}][{}]", record.level(), module_path)?;
        buffer.reset()?;
        writeln!(buffer, " {}", record.args())?;
        writer.print(&buffer)?;
        Ok(())
    });

    let _ = builder.try_init();
}
