use notice_kit::adapters::outbound::console::StderrProgressReporter;
use notice_kit::adapters::outbound::filesystem::FileSystemReader;
use notice_kit::adapters::outbound::license_texts::DirectoryLicenseTextProvider;
use notice_kit::adapters::outbound::scanner::CommandScanner;
use notice_kit::application::dto::{
    ListCopyrightsRequest, NoticeRequest, ScanRequest, ScanResponse, DEFAULT_JOBS,
};
use notice_kit::application::factories::{PresenterFactory, PresenterType, StorageFactory};
use notice_kit::application::use_cases::{
    GenerateNoticeUseCase, ListCopyrightsUseCase, ScanPackageUseCase,
};
use notice_kit::cli::{Args, Command, ListCopyrightsArgs, NoticeArgs, ScanArgs};
use notice_kit::config::{discover_config, expand_home, load_config_from_path, ConfigFile};
use notice_kit::notice_generation::domain::{CopyrightGarbage, ScannerDetails};
use notice_kit::ports::inbound::NoticeGenerationPort;
use notice_kit::ports::outbound::{
    AnalyzerResultReader, CopyrightGarbageReader, OutputPresenter, ProgressReporter,
};
use notice_kit::shared::error::{ExitCode, NoticeError};
use notice_kit::shared::Result;
use std::process;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            process::exit(code.as_i32());
        }
    };
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    match args.command {
        Command::Scan(scan) => run_scan(scan, &config).await,
        Command::Notice(notice) => run_notice(notice, &config).await,
        Command::ListCopyrights(list) => run_list_copyrights(list, &config).await,
    }
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        return load_config_from_path(path);
    }
    let cwd = std::env::current_dir()?;
    Ok(discover_config(&cwd)?.unwrap_or_default())
}

async fn run_scan(args: ScanArgs, config: &ConfigFile) -> Result<()> {
    let scanner_config = config.scanner.as_ref().ok_or_else(|| NoticeError::Configuration {
        message: "no scanner is configured".to_string(),
        hint: "Add a 'scanner' section with 'command', 'name' and 'version' to notice-kit.config.yml"
            .to_string(),
    })?;

    let scanner = CommandScanner::new(
        scanner_config.command.clone(),
        ScannerDetails::new(
            scanner_config.name.clone(),
            scanner_config.version.clone(),
            scanner_config.configuration.clone(),
        ),
    )?;
    let storage = StorageFactory::scan_results_storage(&config.scan_storage()).await?;
    let archiver = StorageFactory::archiver(&config.archive_storage(), config.archive_patterns())?;

    let progress_reporter = StderrProgressReporter::new();
    progress_reporter.report(&format!(
        "🔍 Scanning {} in {}",
        args.package_id,
        args.input_path.display()
    ));

    let use_case = ScanPackageUseCase::new(storage, scanner, archiver);
    let request = ScanRequest::new(
        args.package_id,
        args.provenance.to_provenance()?,
        args.input_path,
    );
    let response = use_case.execute(request).await?;

    report_scan(&progress_reporter, &response);

    if let Some(output) = args.output {
        let json = serde_json::to_string_pretty(&response.result)?;
        PresenterFactory::create(PresenterType::File(output)).present(&json)?;
    }
    Ok(())
}

fn report_scan(progress_reporter: &StderrProgressReporter, response: &ScanResponse) {
    let result = &response.result;
    let summary = format!(
        "{} license(s) and {} copyright(s)",
        result.license_findings().len(),
        result.copyright_findings().len()
    );

    if response.from_cache {
        progress_reporter.report_completion(&format!(
            "✅ Using cached result of {}: {}",
            result.scanner(),
            summary
        ));
        return;
    }

    if !response.stored {
        progress_reporter.report_error("⚠️  Warning: The scan result could not be cached.");
    }
    match response.archived_files {
        Some(count) => progress_reporter.report(&format!("📦 Archived {} license file(s)", count)),
        None => progress_reporter.report_error("⚠️  Warning: License files could not be archived."),
    }
    progress_reporter.report_completion(&format!(
        "✅ Scanned with {}: {}",
        result.scanner(),
        summary
    ));
}

async fn run_notice(args: NoticeArgs, config: &ConfigFile) -> Result<()> {
    let reader = FileSystemReader::new();
    let graph = reader.read_analyzer_result(&args.analyzer_result)?;

    let copyright_garbage = match args.copyright_garbage.or_else(|| config.copyright_garbage.clone()) {
        Some(path) => reader.read_copyright_garbage(&expand_home(&path))?,
        None => CopyrightGarbage::default(),
    };

    let license_text_dirs = if args.license_texts.is_empty() {
        config.license_texts.iter().map(|p| expand_home(p)).collect()
    } else {
        args.license_texts
    };
    if license_text_dirs.is_empty() {
        log::warn!("No license text directory configured, only license files can be added to the notice.");
    }

    let storage = StorageFactory::scan_results_storage(&config.scan_storage()).await?;
    let archiver = StorageFactory::archiver(&config.archive_storage(), config.archive_patterns())?;

    let use_case = GenerateNoticeUseCase::new(
        storage,
        archiver,
        DirectoryLicenseTextProvider::new(license_text_dirs),
        StderrProgressReporter::new(),
    );

    let jobs = args.jobs.or(config.jobs).unwrap_or(DEFAULT_JOBS);
    let request = NoticeRequest::new(graph, copyright_garbage).with_jobs(jobs);
    let response = use_case.generate_notice(request).await?;

    PresenterFactory::create(PresenterType::from(args.output)).present(&response.content)?;
    Ok(())
}

async fn run_list_copyrights(args: ListCopyrightsArgs, config: &ConfigFile) -> Result<()> {
    let storage = StorageFactory::scan_results_storage(&config.scan_storage()).await?;
    let use_case = ListCopyrightsUseCase::new(storage);

    let output = use_case
        .execute(ListCopyrightsRequest {
            package_id: args.package_id,
            provenance: args.provenance.to_provenance()?,
            license: args.license_id,
        })
        .await?;

    PresenterFactory::create(PresenterType::Stdout).present(&output)?;
    Ok(())
}
