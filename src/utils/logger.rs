use crate::utils::error::{AppError, Result};
use chrono::Local;
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `2026-10-14 09:30:00,123 - INFO - message`
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Subscriber that writes every event in [`LineFormat`] to `make_writer`.
pub fn line_subscriber<W>(make_writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(make_writer)
            .with_ansi(false),
    )
}

pub fn init_file_logger(log_path: &str, verbose: bool, json: bool) -> Result<()> {
    let path = Path::new(log_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("phonenumber_utility=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("phonenumber_utility=info"))
    };

    // 檔案只會交給其中一種格式
    let (text_file, json_file) = if json { (None, Some(file)) } else { (Some(file), None) };

    let text_layer = text_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
    });

    let json_layer = json_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .json()
    });

    let console_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(text_layer)
        .with(json_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| AppError::ConfigError {
            message: format!("failed to install logger: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_line_format() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = line_subscriber(move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Saved result for number: {}", "+442087654321");
            tracing::error!("Invalid number: {}", "+1 123");
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - INFO - Saved result for number: +442087654321"));
        assert!(lines[1].ends_with(" - ERROR - Invalid number: +1 123"));

        // 時間戳記：YYYY-MM-DD HH:MM:SS,mmm
        let stamp = lines[0].split(" - ").next().unwrap();
        assert_eq!(stamp.len(), 23);
        assert_eq!(&stamp[19..20], ",");
    }
}
