#![expect(missing_docs, reason = "tests")]

use std::collections::HashSet;
use std::sync::Arc;

use pipelog::sink::MemorySink;
use pipelog::{CallSite, Config, Logger, Severities, Severity};
use pretty_assertions::assert_eq;
use serial_test::serial;
use test_case::test_case;
use time::OffsetDateTime;
use time::macros::datetime;

fn fixed_now() -> OffsetDateTime {
    datetime!(2015-12-21 17:50:22.615673 UTC)
}

fn fixed_call_site(_: CallSite) -> CallSite {
    CallSite::new("yourfunc", "test.go", 24)
}

fn fixed_logger(sink: &MemorySink, config: &Config) -> Logger {
    Logger::builder()
        .config(config)
        .output(sink.clone())
        .process_id(1234)
        .clock(fixed_now)
        .caller_resolver(fixed_call_site)
        .build()
}

fn uncolored() -> Config {
    Config {
        color: false,
        ..Config::default()
    }
}

mod default {
    use std::sync::LazyLock;

    use pipelog::sink::MemorySink;
    use pipelog::{Logger, Severities};

    /// Installs a default logger writing into memory, once per test binary.
    pub fn install() -> MemorySink {
        static SINK: LazyLock<MemorySink> = LazyLock::new(|| {
            let sink = MemorySink::new();
            pipelog::set_default(
                Logger::builder()
                    .config(&super::uncolored())
                    .output(sink.clone())
                    .process_id(1234)
                    .clock(super::fixed_now)
                    .build(),
            )
            .expect("default logger was not set yet");
            sink
        });

        // Installing has to happen before anything touches the default logger.
        let sink = LazyLock::force(&SINK);

        pipelog::set_allowed_severities(Severities::ALL);
        pipelog::set_output(sink.clone());
        sink.take();
        sink.clone()
    }
}

#[test]
fn writes_exact_line() {
    let sink = MemorySink::new();
    let logger = fixed_logger(&sink, &uncolored());

    pipelog::debug!(logger: &logger, "Hello World");

    assert_eq!(
        sink.contents(),
        "DEBUG|17:50:22.615673|1234|test.go|yourfunc|24|Hello World\n"
    );
}

#[test]
fn does_not_write_when_not_allowed() {
    let sink = MemorySink::new();
    let logger = fixed_logger(
        &sink,
        &Config {
            allowed: Severities::INFO | Severities::WARN,
            ..uncolored()
        },
    );

    pipelog::debug!(logger: &logger, "Hello World");

    assert_eq!(sink.contents(), "");
}

#[test_case(Severities::ALL)]
#[test_case(Severities::empty())]
#[test_case(Severities::INFO | Severities::WARN)]
#[test_case(Severities::ERROR | Severities::FATAL)]
#[test_case(Severities::DEBUG)]
fn writes_iff_severity_intersects_allowed(allowed: Severities) {
    let sink = MemorySink::new();
    let logger = fixed_logger(&sink, &uncolored());
    logger.set_allowed_severities(allowed);

    let candidates = Severity::ALL
        .into_iter()
        .map(Severities::from)
        .chain([
            Severities::ERROR | Severities::DEBUG,
            Severities::ALL,
            Severities::from_bits_retain(32),
        ]);

    for severity in candidates {
        sink.take();
        pipelog::log!(logger: &logger, severity, "message");
        assert_eq!(
            !sink.contents().is_empty(),
            severity.intersects(allowed),
            "{severity} with {allowed:?}"
        );
    }
}

#[test]
fn concatenates_message_parts_without_separator() {
    let sink = MemorySink::new();
    let logger = fixed_logger(&sink, &uncolored());

    pipelog::info!(logger: &logger, "Incoming request from path ", "/index", " took ", 12, "ms");
    pipelog::info!(logger: &logger, "Hello", "World");

    assert_eq!(
        sink.contents(),
        indoc::indoc! {"
            INFO|17:50:22.615673|1234|test.go|yourfunc|24|Incoming request from path /index took 12ms
            INFO|17:50:22.615673|1234|test.go|yourfunc|24|HelloWorld
        "}
    );
}

#[test]
fn trims_file_to_source_root() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .config(&uncolored())
        .output(sink.clone())
        .process_id(1234)
        .clock(fixed_now)
        .caller_resolver(|_| {
            CallSite::new("ourpackage.handler", "/path/to/gopath/src/ourpackage/test.go", 24)
        })
        .build();

    pipelog::info!(logger: &logger, "Hello World");

    assert_eq!(
        sink.contents(),
        "INFO|17:50:22.615673|1234|ourpackage/test.go|ourpackage.handler|24|Hello World\n"
    );
}

#[test]
fn colors_whole_line_unless_disabled() {
    let colored = MemorySink::new();
    let config = Config::default().with_lookup(|_| None).unwrap();
    pipelog::debug!(logger: &fixed_logger(&colored, &config), "Hello World");

    let plain = MemorySink::new();
    let config = Config::default()
        .with_lookup(|name| (name == "PIPELOG_NO_COLOR").then(|| "1".to_owned()))
        .unwrap();
    pipelog::debug!(logger: &fixed_logger(&plain, &config), "Hello World");

    assert_eq!(
        colored.contents(),
        "\x1b[31mDEBUG|17:50:22.615673|1234|test.go|yourfunc|24|Hello World\x1b[0m\n"
    );
    assert_eq!(
        plain.contents(),
        "DEBUG|17:50:22.615673|1234|test.go|yourfunc|24|Hello World\n"
    );
}

#[test]
fn macros_capture_function_path() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .config(&uncolored())
        .output(sink.clone())
        .process_id(1234)
        .clock(fixed_now)
        .build();

    let line = line!() + 1;
    pipelog::warn!(logger: &logger, "captured");

    let contents = sink.contents();
    let fields: Vec<&str> = contents.trim_end().split('|').collect();
    assert_eq!(fields.len(), 7, "{contents}");
    assert!(fields[3].ends_with("tests/lib.rs"), "{}", fields[3]);
    assert_eq!(fields[4], "lib::macros_capture_function_path");
    assert_eq!(fields[5], line.to_string());
}

#[test]
fn macros_strip_closure_frames() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .config(&uncolored())
        .output(sink.clone())
        .build();

    let log_from_closure = || pipelog::error!(logger: &logger, "from closure");
    log_from_closure();

    let contents = sink.contents();
    assert_eq!(
        contents.split('|').nth(4),
        Some("lib::macros_strip_closure_frames"),
        "{contents}"
    );
}

#[test]
fn fatal_does_not_terminate_the_process() {
    let sink = MemorySink::new();
    let logger = fixed_logger(&sink, &uncolored());

    pipelog::fatal!(logger: &logger, "first");
    logger.fatal("second");
    pipelog::info!(logger: &logger, "still running");

    assert_eq!(sink.contents().lines().count(), 3);
}

#[test]
fn concurrent_writes_never_interleave() {
    const THREADS: usize = 8;
    const LINES: usize = 500;

    let sink = MemorySink::new();
    let logger = Arc::new(fixed_logger(&sink, &uncolored()));

    std::thread::scope(|scope| {
        for thread in 0..THREADS {
            let logger = &logger;
            scope.spawn(move || {
                for line in 0..LINES {
                    pipelog::info!(logger: logger, "thread ", thread, " line ", line);
                }
            });
        }

        // Reconfiguring while writing must be race-free; the values keep every line flowing into `sink`.
        scope.spawn(|| {
            for _ in 0..LINES {
                logger.set_allowed_severities(Severities::ALL);
                logger.set_output(sink.clone());
            }
        });
    });

    let contents = sink.contents();
    assert!(contents.ends_with('\n'));

    let mut seen = HashSet::new();
    for line in contents.lines() {
        let message = line
            .strip_prefix("INFO|17:50:22.615673|1234|test.go|yourfunc|24|")
            .unwrap_or_else(|| panic!("torn line: {line:?}"));
        assert!(seen.insert(message.to_owned()), "duplicate line: {line:?}");
    }
    assert_eq!(seen.len(), THREADS * LINES);

    for thread in 0..THREADS {
        for line in 0..LINES {
            assert!(seen.contains(&format!("thread {thread} line {line}")));
        }
    }
}

#[test]
#[serial]
fn default_logger_receives_free_function_calls() {
    let sink = default::install();

    let line = line!() + 1;
    pipelog::info("Listen on 0.0.0.0:9000");
    pipelog::fatal("not fatal");
    pipelog::log(Severity::Warn, format_args!("{} requests queued", 3));

    let contents = sink.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3, "{contents}");
    assert!(lines[0].starts_with("INFO|17:50:22.615673|1234|"));
    assert!(lines[0].ends_with(&format!("tests/lib.rs||{line}|Listen on 0.0.0.0:9000")));
    assert!(lines[1].starts_with("FATAL|"));
    assert!(lines[2].ends_with("|3 requests queued"));
}

#[test]
#[serial]
fn default_logger_receives_macros() {
    let sink = default::install();

    pipelog::info!("Incoming request from path ", "/");
    pipelog::error!("Has error");

    let contents = sink.contents();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2, "{contents}");
    assert!(lines[0].contains("|lib::default_logger_receives_macros|"));
    assert!(lines[0].ends_with("|Incoming request from path /"));
    assert!(lines[1].starts_with("ERROR|"));
}

#[test]
#[serial]
fn default_logger_is_reconfigurable() {
    let sink = default::install();

    pipelog::set_allowed_severities(Severities::INFO | Severities::WARN);
    pipelog::debug("Hello World");
    assert_eq!(sink.contents(), "");
    assert_eq!(
        pipelog::default_logger().allowed_severities(),
        Severities::INFO | Severities::WARN
    );

    let other = MemorySink::new();
    pipelog::set_output(other.clone());
    pipelog::warn("redirected");
    pipelog::flush();

    assert_eq!(sink.contents(), "");
    assert_eq!(other.contents().lines().count(), 1);
}

#[test]
#[serial]
fn default_logger_can_only_be_set_once() {
    default::install();

    let error = pipelog::set_default(Logger::new(MemorySink::new())).unwrap_err();
    assert_eq!(error.to_string(), "a default logger has already been set");
}
