use crate::adapters::storage::FileResultStore;
use crate::core::processor::process_number;
use crate::core::report::render_result;
use crate::core::validator::validate_number;
use crate::domain::model::{BatchSummary, LookupResult};
use crate::domain::ports::{ConfigProvider, MetadataSource, ResultStore};
use crate::metadata::MetadataTables;
use crate::utils::error::{AppError, Result};
use phonenumber::country;
use std::io;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const NUMBER_PROMPT: &str = "Enter Your Number with country code (e.g., +91xxxxxxxxxx): ";
pub const CHOICE_PROMPT: &str = "Enter your choice: ";
pub const PATH_PROMPT: &str = "Enter the path to the file: ";

pub const MENU: &str = "Phone Number Utility Menu\n\
1. Process a single number\n\
2. Batch process numbers from a file\n\
3. Exit\n";

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

/// Shows `text`, then reads one trimmed line. `None` means the input is exhausted.
async fn prompt<R, W>(reader: &mut R, out: &mut W, text: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;

    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Menu-driven lookup session. Every saved result is kept in memory until the
/// utility is dropped.
pub struct PhoneNumberUtility<S: ResultStore, M: MetadataSource> {
    store: S,
    metadata: M,
    default_region: Option<country::Id>,
    numbers: Vec<LookupResult>,
}

impl PhoneNumberUtility<FileResultStore, MetadataTables> {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let metadata = match config.data_dir() {
            Some(dir) => MetadataTables::with_overrides(dir)?,
            None => MetadataTables::bundled()?,
        };
        let store = FileResultStore::new(config.results_path());

        tracing::debug!("Results will be appended to {}", config.results_path());
        Ok(Self::new(store, metadata).with_default_region(config.default_region()?))
    }
}

impl<S: ResultStore, M: MetadataSource> PhoneNumberUtility<S, M> {
    pub fn new(store: S, metadata: M) -> Self {
        Self {
            store,
            metadata,
            default_region: None,
            numbers: Vec::new(),
        }
    }

    pub fn with_default_region(mut self, region: Option<country::Id>) -> Self {
        self.default_region = region;
        self
    }

    pub fn results(&self) -> &[LookupResult] {
        &self.numbers
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lookup(&self, input: &str) -> Result<LookupResult> {
        let number = validate_number(input, self.default_region)?;
        process_number(&number, input, &self.metadata)
    }

    /// Validate, look up, display, save and retain a single number.
    ///
    /// Input problems are logged and printed, then reported as `Ok(None)`;
    /// only console write failures surface as errors.
    pub async fn handle_number<W>(&mut self, input: &str, out: &mut W) -> Result<Option<&LookupResult>>
    where
        W: AsyncWrite + Unpin,
    {
        let result = match self.lookup(input) {
            Ok(result) => result,
            Err(e) if e.is_input_error() => {
                tracing::error!("{}", e);
                write_line(out, &e.to_string()).await?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        out.write_all(render_result(&result).as_bytes()).await?;
        out.flush().await?;

        if let Err(e) = self.store.append(&result).await {
            let message = format!("Failed to save result for number {}: {}", result.e164(), e);
            tracing::error!("{}", message);
            write_line(out, &message).await?;
            return Ok(None);
        }

        tracing::info!("Saved result for number: {}", result.e164());
        self.numbers.push(result);
        Ok(self.numbers.last())
    }

    pub async fn input_number<R, W>(&mut self, reader: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if let Some(input) = prompt(reader, out, NUMBER_PROMPT).await? {
            self.handle_number(&input, out).await?;
        }
        Ok(())
    }

    /// Handles every line of `path` in order. Blank lines and `#` comments are skipped.
    pub async fn batch_process<W>(&mut self, path: &str, out: &mut W) -> Result<BatchSummary>
    where
        W: AsyncWrite + Unpin,
    {
        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let err = AppError::FileNotFound {
                    path: path.to_string(),
                };
                tracing::error!("{}", err);
                write_line(out, &err.to_string()).await?;
                return Ok(BatchSummary::default());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Batch processing numbers from {}", path);
        let mut summary = BatchSummary::default();
        let mut lines = BufReader::new(file).lines();

        while let Some(line) = lines.next_line().await? {
            let number = line.trim();
            if number.is_empty() || number.starts_with('#') {
                continue;
            }

            summary.lines += 1;
            if self.handle_number(number, out).await?.is_some() {
                summary.saved += 1;
            } else {
                summary.rejected += 1;
            }
        }

        tracing::info!(
            "Batch {} finished: {} numbers, {} saved, {} rejected",
            path,
            summary.lines,
            summary.saved,
            summary.rejected
        );
        Ok(summary)
    }

    pub async fn display_menu<W: AsyncWrite + Unpin>(&self, out: &mut W) -> Result<()> {
        out.write_all(MENU.as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }

    /// Runs the menu until the user picks exit or the input ends.
    pub async fn run<R, W>(&mut self, reader: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            self.display_menu(out).await?;

            let Some(choice) = prompt(reader, out, CHOICE_PROMPT).await? else {
                write_line(out, "").await?;
                write_line(out, "Exiting...").await?;
                break;
            };

            match choice.as_str() {
                "1" => self.input_number(reader, out).await?,
                "2" => {
                    if let Some(path) = prompt(reader, out, PATH_PROMPT).await? {
                        if let Err(e) = self.batch_process(&path, out).await {
                            tracing::error!("Batch processing of {} failed: {}", path, e);
                            write_line(out, &format!("Batch processing of {} failed: {}", path, e))
                                .await?;
                        }
                    }
                }
                "3" => {
                    write_line(out, "Exiting...").await?;
                    break;
                }
                _ => write_line(out, "Invalid choice. Please try again.").await?,
            }
        }

        tracing::info!("Session finished with {} saved result(s)", self.numbers.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStore {
        saved: Arc<Mutex<Vec<String>>>,
    }

    impl MockStore {
        async fn saved(&self) -> Vec<String> {
            self.saved.lock().await.clone()
        }
    }

    #[async_trait]
    impl ResultStore for MockStore {
        async fn append(&self, result: &LookupResult) -> Result<()> {
            self.saved.lock().await.push(result.e164());
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl ResultStore for FailingStore {
        async fn append(&self, _result: &LookupResult) -> Result<()> {
            Err(AppError::IoError(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn utility(store: MockStore) -> PhoneNumberUtility<MockStore, MetadataTables> {
        PhoneNumberUtility::new(store, MetadataTables::bundled().unwrap())
    }

    #[tokio::test]
    async fn test_valid_number_is_displayed_saved_and_retained() {
        let store = MockStore::default();
        let mut app = utility(store.clone());
        let mut out = Vec::new();

        let result = app.handle_number("+44 20 8765 4321", &mut out).await.unwrap();
        assert_eq!(result.unwrap().region, "London");

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Phone Number: +44 20 8765 4321\n"));
        assert!(printed.contains("Time Zones: Europe/London\n"));
        assert_eq!(store.saved().await, vec!["+442087654321".to_string()]);
        assert_eq!(app.results().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_number_is_reported_and_skipped() {
        let store = MockStore::default();
        let mut app = utility(store.clone());
        let mut out = Vec::new();

        assert!(app.handle_number("not a number", &mut out).await.unwrap().is_none());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Error parsing number not a number: "));
        assert!(!printed.contains("Phone Number:"));
        assert!(store.saved().await.is_empty());
        assert!(app.results().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_not_retained() {
        let mut app = PhoneNumberUtility::new(FailingStore, MetadataTables::bundled().unwrap());
        let mut out = Vec::new();

        assert!(app.handle_number("+1 650-253-0000", &mut out).await.unwrap().is_none());
        assert!(app.results().is_empty());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Failed to save result for number +16502530000: IO error: read-only"));
    }

    #[tokio::test]
    async fn test_default_region_is_used_for_national_numbers() {
        let store = MockStore::default();
        let mut app = utility(store.clone()).with_default_region(Some(country::Id::GB));
        let mut out = Vec::new();

        assert!(app.handle_number("020 8765 4321", &mut out).await.unwrap().is_some());
        assert_eq!(store.saved().await, vec!["+442087654321".to_string()]);
    }

    #[tokio::test]
    async fn test_menu_single_number_then_exit() {
        let store = MockStore::default();
        let mut app = utility(store.clone());
        let mut input: &[u8] = b"1\n+1 650-253-0000\n3\n";
        let mut out = Vec::new();

        app.run(&mut input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("Phone Number Utility Menu").count(), 2);
        assert!(printed.contains(NUMBER_PROMPT));
        assert!(printed.contains("Region: Mountain View, CA\n"));
        assert!(printed.ends_with("Exiting...\n"));
        assert_eq!(app.results().len(), 1);
    }

    #[tokio::test]
    async fn test_menu_rejects_unknown_choice() {
        let mut app = utility(MockStore::default());
        let mut input: &[u8] = b"9\n 3 \n";
        let mut out = Vec::new();

        app.run(&mut input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Invalid choice. Please try again.\n"));
        assert!(printed.ends_with("Exiting...\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_exits() {
        let mut app = utility(MockStore::default());
        let mut input: &[u8] = b"1\n";
        let mut out = Vec::new();

        app.run(&mut input, &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.ends_with("Exiting...\n"));
        assert!(app.results().is_empty());
    }

    #[tokio::test]
    async fn test_missing_batch_file() {
        let store = MockStore::default();
        let mut app = utility(store.clone());
        let mut out = Vec::new();

        let summary = app.batch_process("/no/such/numbers.txt", &mut out).await.unwrap();

        assert_eq!(summary, BatchSummary::default());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "File not found: /no/such/numbers.txt\n"
        );
    }
}
