use super::*;
use crate::adapters::outbound::archive::FileArchiver;
use crate::adapters::outbound::license_texts::MapLicenseTextProvider;
use crate::adapters::outbound::storage::LocalFileStorage;
use crate::notice_generation::domain::{
    CopyrightFinding, LicenseFinding, ScannerDetails, TextLocation,
};
use crate::notice_generation::services::{HEADER_WITH_PACKAGES, NOTICE_SEPARATOR};
use chrono::{TimeZone, Utc};
use std::cell::RefCell;
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

const NESTJS: &str = "npm:@nestjs:platform-express:6.2.3";

// Mock implementations for testing
#[derive(Default)]
struct InMemoryStorage {
    results: Mutex<Vec<ScanResult>>,
}

impl InMemoryStorage {
    fn with(results: Vec<ScanResult>) -> Self {
        Self {
            results: Mutex::new(results),
        }
    }
}

#[async_trait]
impl ScanResultsStorage for InMemoryStorage {
    fn name(&self) -> &str {
        "InMemoryStorage"
    }

    async fn read(
        &self,
        id: &PackageIdentifier,
        provenance: &Provenance,
        criteria: &ScannerCriteria,
    ) -> Result<Vec<ScanResult>> {
        let results = self.results.lock().unwrap();
        Ok(results
            .iter()
            .filter(|r| r.package_id() == id && r.provenance() == provenance)
            .filter(|r| criteria.matches(r.scanner()))
            .cloned()
            .collect())
    }

    async fn add(&self, result: &ScanResult) -> Result<()> {
        self.results.lock().unwrap().push(result.clone());
        Ok(())
    }
}

struct UnreachableStorage;

#[async_trait]
impl ScanResultsStorage for UnreachableStorage {
    fn name(&self) -> &str {
        "UnreachableStorage"
    }

    async fn read(
        &self,
        _id: &PackageIdentifier,
        _provenance: &Provenance,
        _criteria: &ScannerCriteria,
    ) -> Result<Vec<ScanResult>> {
        Err(NoticeError::storage("read", "scan-results.json", "connection refused").into())
    }

    async fn add(&self, _result: &ScanResult) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct RecordingReporter {
    errors: RefCell<Vec<String>>,
    progress: RefCell<Vec<(usize, usize)>>,
}

impl ProgressReporter for &RecordingReporter {
    fn report(&self, _message: &str) {}

    fn report_progress(&self, current: usize, total: usize, _message: Option<&str>) {
        self.progress.borrow_mut().push((current, total));
    }

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn report_completion(&self, _message: &str) {}
}

fn loc(path: &str, line: u32) -> TextLocation {
    TextLocation::new(path, line, line).unwrap()
}

fn provenance() -> Provenance {
    Provenance::source_artifact(
        "https://registry.npmjs.org/@nestjs/platform-express/-/platform-express-6.2.3.tgz",
        "3b1a8c8b4c4d5e6f",
    )
}

fn copyright(statement: &str, path: &str, line: u32) -> CopyrightFinding {
    CopyrightFinding::new(statement, [loc(path, line)].into())
}

fn scan_result(id: &str, licenses: Vec<LicenseFinding>) -> ScanResult {
    let time = Utc.with_ymd_and_hms(2019, 6, 1, 10, 0, 0).unwrap();
    let copyrights: Vec<CopyrightFinding> = licenses
        .iter()
        .flat_map(|l| l.copyrights.iter().cloned())
        .collect();
    ScanResult::new(
        id.parse().unwrap(),
        provenance(),
        ScannerDetails::new("ScanCode", "3.0.2", ""),
        time,
        time,
        licenses,
        copyrights,
    )
}

fn graph(ids: &[&str]) -> DependencyGraph {
    let mut graph = DependencyGraph::new("npm::my-app:1.0.0".parse().unwrap());
    for id in ids {
        graph.add_package(id.parse().unwrap(), Some(provenance()));
    }
    graph
}

fn texts() -> MapLicenseTextProvider {
    MapLicenseTextProvider::new([
        ("MIT", "MIT license text\n"),
        ("Apache-2.0", "Apache license text\n"),
    ])
}

struct Fixture {
    archive_dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            archive_dir: TempDir::new().unwrap(),
        }
    }

    fn archiver(&self) -> FileArchiver<LocalFileStorage> {
        FileArchiver::new(
            FileMatcher::license_file_matcher(),
            LocalFileStorage::new(self.archive_dir.path()),
        )
    }

    async fn archive(&self, id: &str, files: &[(&str, &str)]) {
        let source = TempDir::new().unwrap();
        for (path, content) in files {
            let target = source.path().join(path);
            fs::create_dir_all(target.parent().unwrap()).unwrap();
            fs::write(target, content).unwrap();
        }
        let key = storage_key(&id.parse().unwrap(), &provenance());
        self.archiver().archive(source.path(), &key).await.unwrap();
    }

    fn use_case<'r, S: ScanResultsStorage>(
        &self,
        storage: S,
        reporter: &'r RecordingReporter,
    ) -> GenerateNoticeUseCase<S, FileArchiver<LocalFileStorage>, MapLicenseTextProvider, &'r RecordingReporter>
    {
        GenerateNoticeUseCase::new(storage, self.archiver(), texts(), reporter)
    }
}

#[tokio::test]
async fn test_merges_equivalent_copyrights_of_a_license() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let result = scan_result(
        NESTJS,
        vec![LicenseFinding::new(
            "MIT",
            [loc("index.js", 1)].into(),
            [
                copyright("Copyright 2018 Foo", "index.js", 2),
                copyright("copyright (c) 2018 foo", "lib/util.js", 3),
            ]
            .into(),
        )],
    );
    let use_case = fixture.use_case(InMemoryStorage::with(vec![result]), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(graph(&[NESTJS]), CopyrightGarbage::default()))
        .await
        .unwrap();

    let expected = format!(
        "{}{}Package: @nestjs:platform-express:6.2.3\n\n\
         The following copyrights and licenses were found in the source code of this package:\n\n\
         Copyright (C) 2018 Foo\n\nMIT license text\n",
        HEADER_WITH_PACKAGES, NOTICE_SEPARATOR
    );
    assert_eq!(response.content, expected);
    assert!(response.is_complete());
    assert_eq!(response.package_count, 1);
}

#[tokio::test]
async fn test_copyright_in_license_file_only_appears_in_file_block() {
    let fixture = Fixture::new();
    fixture
        .archive(
            NESTJS,
            &[
                ("LICENSE", "Copyright 2018 Foo\n\nPermission is hereby granted"),
                ("src/main.ts", "export {}"),
            ],
        )
        .await;
    let reporter = RecordingReporter::default();
    let result = scan_result(
        NESTJS,
        vec![LicenseFinding::new(
            "MIT",
            [loc("LICENSE", 3), loc("src/main.ts", 1)].into(),
            [
                copyright("Copyright 2018 Foo", "LICENSE", 1),
                copyright("copyright (c) 2018 foo", "src/main.ts", 1),
                copyright("Copyright 2017 Bar", "src/main.ts", 2),
            ]
            .into(),
        )],
    );
    let use_case = fixture.use_case(InMemoryStorage::with(vec![result]), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(graph(&[NESTJS]), CopyrightGarbage::default()))
        .await
        .unwrap();

    let package = response.content.split(NOTICE_SEPARATOR).nth(1).unwrap();
    assert_eq!(
        package,
        "Package: @nestjs:platform-express:6.2.3\n\n\
         This package contains the file LICENSE with the following contents:\n\n\
         Copyright 2018 Foo\n\nPermission is hereby granted\n\
         The following copyright holder information relates to the license(s) above:\n\
         Copyright (C) 2017 Bar\n"
    );
    assert!(!response.content.contains("MIT license text"));
}

#[tokio::test]
async fn test_licenses_outside_license_files_are_listed_after_them() {
    let fixture = Fixture::new();
    fixture
        .archive(NESTJS, &[("LICENSE", "MIT License")])
        .await;
    let reporter = RecordingReporter::default();
    let result = scan_result(
        NESTJS,
        vec![
            LicenseFinding::new("MIT", [loc("LICENSE", 1)].into(), BTreeSet::new()),
            LicenseFinding::new(
                "Apache-2.0",
                [loc("vendor/lib.js", 1)].into(),
                [copyright("Copyright 2015 Baz Inc.", "vendor/lib.js", 2)].into(),
            ),
        ],
    );
    let use_case = fixture.use_case(InMemoryStorage::with(vec![result]), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(graph(&[NESTJS]), CopyrightGarbage::default()))
        .await
        .unwrap();

    let file_block = response.content.find("the file LICENSE").unwrap();
    let source_block = response
        .content
        .find("The following copyrights and licenses were found")
        .unwrap();
    assert!(file_block < source_block);
    assert!(response
        .content
        .ends_with("Copyright (C) 2015 Baz Inc.\n\nApache license text\n"));
    assert!(!response.content.contains("MIT license text"));
}

#[tokio::test]
async fn test_garbage_is_removed_even_if_it_is_the_only_copyright() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let result = scan_result(
        NESTJS,
        vec![LicenseFinding::new(
            "MIT",
            [loc("index.js", 1)].into(),
            [copyright("Copyright (c) <year> <owner>", "index.js", 2)].into(),
        )],
    );
    let use_case = fixture.use_case(InMemoryStorage::with(vec![result]), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(
            graph(&[NESTJS]),
            CopyrightGarbage::new(["Copyright (c) <year> <owner>"]),
        ))
        .await
        .unwrap();

    assert!(!response.content.contains("<owner>"));
    assert!(response.content.ends_with(
        "The following copyrights and licenses were found in the source code of this package:\n\n\
         MIT license text\n"
    ));
}

#[tokio::test]
async fn test_license_without_text_is_dropped() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let result = scan_result(
        NESTJS,
        vec![LicenseFinding::new(
            "LicenseRef-proprietary",
            [loc("index.js", 1)].into(),
            BTreeSet::new(),
        )],
    );
    let use_case = fixture.use_case(InMemoryStorage::with(vec![result]), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(graph(&[NESTJS]), CopyrightGarbage::default()))
        .await
        .unwrap();

    assert!(response
        .content
        .ends_with("Package: @nestjs:platform-express:6.2.3\n\n"));
    assert!(response.is_complete());
}

#[tokio::test]
async fn test_package_without_result_or_provenance_gets_header_only() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let mut graph = graph(&["npm::is-windows:1.0.2"]);
    graph.add_package("npm::no-provenance:0.1.0".parse().unwrap(), None);
    let use_case = fixture.use_case(InMemoryStorage::default(), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(graph, CopyrightGarbage::default()))
        .await
        .unwrap();

    assert!(response
        .content
        .contains("Package: is-windows:1.0.2\n\n\n----\n\nPackage: no-provenance:0.1.0\n\n"));
    assert!(response.is_complete());
}

#[tokio::test]
async fn test_storage_failure_is_reported_per_package() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let use_case = fixture.use_case(UnreachableStorage, &reporter);

    let response = use_case
        .execute(NoticeRequest::new(
            graph(&[NESTJS, "npm::is-windows:1.0.2"]),
            CopyrightGarbage::default(),
        ))
        .await
        .unwrap();

    assert_eq!(response.failed_packages.len(), 2);
    assert!(response.failed_packages[0].1.contains("connection refused"));
    assert_eq!(reporter.errors.borrow().len(), 2);
    assert!(response.content.contains("Package: is-windows:1.0.2"));
}

#[tokio::test]
async fn test_packages_are_rendered_in_identifier_order() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let ids = ["npm::zeta:1.0.0", "npm::alpha:2.0.0", "npm:@scope:mid:1.0.0"];
    let results = ids
        .iter()
        .map(|id| {
            scan_result(
                id,
                vec![LicenseFinding::new("MIT", [loc("index.js", 1)].into(), BTreeSet::new())],
            )
        })
        .collect();
    let use_case = fixture.use_case(InMemoryStorage::with(results), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(graph(&ids), CopyrightGarbage::default()).with_jobs(2))
        .await
        .unwrap();

    // Packages without a namespace sort before namespaced ones
    let alpha = response.content.find("Package: alpha:2.0.0").unwrap();
    let zeta = response.content.find("Package: zeta:1.0.0").unwrap();
    let scoped = response.content.find("Package: @scope:mid:1.0.0").unwrap();
    assert!(alpha < zeta && zeta < scoped);
    assert_eq!(*reporter.progress.borrow(), vec![(1, 3), (2, 3), (3, 3)]);
}

#[tokio::test]
async fn test_output_is_deterministic() {
    let fixture = Fixture::new();
    fixture
        .archive(NESTJS, &[("LICENSE", "MIT License"), ("docs/COPYING", "GPL")])
        .await;
    let reporter = RecordingReporter::default();
    let result = scan_result(
        NESTJS,
        vec![
            LicenseFinding::new(
                "MIT",
                [loc("LICENSE", 1), loc("a.js", 1)].into(),
                [
                    copyright("Copyright 2018 Foo", "a.js", 1),
                    copyright("(c) 2016 FOO", "b.js", 1),
                    copyright("Portions by Qux", "c.js", 1),
                ]
                .into(),
            ),
            LicenseFinding::new("Apache-2.0", [loc("d.js", 1)].into(), BTreeSet::new()),
        ],
    );
    let use_case = fixture.use_case(InMemoryStorage::with(vec![result]), &reporter);
    let request = NoticeRequest::new(graph(&[NESTJS]), CopyrightGarbage::default());

    let first = use_case.execute(request.clone()).await.unwrap();
    let second = use_case.execute(request).await.unwrap();

    assert_eq!(first.content, second.content);
    let docs = first.content.find("the file docs/COPYING").unwrap();
    let license = first.content.find("the file LICENSE").unwrap();
    assert!(license < docs);
}

#[tokio::test]
async fn test_newest_result_wins() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let old = scan_result(
        NESTJS,
        vec![LicenseFinding::new("Apache-2.0", [loc("index.js", 1)].into(), BTreeSet::new())],
    );
    let time = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let new = ScanResult::new(
        NESTJS.parse().unwrap(),
        provenance(),
        ScannerDetails::new("ScanCode", "3.2.0", ""),
        time,
        time,
        vec![LicenseFinding::new("MIT", [loc("index.js", 1)].into(), BTreeSet::new())],
        Vec::new(),
    );
    let use_case = fixture.use_case(InMemoryStorage::with(vec![old, new]), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(graph(&[NESTJS]), CopyrightGarbage::default()))
        .await
        .unwrap();

    assert!(response.content.contains("MIT license text"));
    assert!(!response.content.contains("Apache license text"));
}

#[tokio::test]
async fn test_empty_graph() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let use_case = fixture.use_case(InMemoryStorage::default(), &reporter);

    let response = use_case
        .generate_notice(NoticeRequest::new(graph(&[]), CopyrightGarbage::default()))
        .await
        .unwrap();

    assert_eq!(
        response.content,
        "This project neither contains or depends on any third-party software components.\n"
    );
    assert_eq!(response.package_count, 0);
}

#[tokio::test]
async fn test_zero_jobs_is_rejected() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let use_case = fixture.use_case(InMemoryStorage::default(), &reporter);

    let result = use_case
        .execute(NoticeRequest::new(graph(&[NESTJS]), CopyrightGarbage::default()).with_jobs(0))
        .await;
    assert!(result.is_err());
}

#[test]
fn test_copyrights_outside_file() {
    let mut findings = LicenseFindingsMap::new();
    findings.insert(
        "MIT".to_string(),
        [
            "Copyright 2018 Foo".to_string(),
            "copyright (c) 2018 foo".to_string(),
            "Copyright 2017 Bar".to_string(),
            "Portions by Qux".to_string(),
        ]
        .into(),
    );
    let licenses: BTreeSet<String> = ["MIT".to_string()].into();
    let in_file: BTreeSet<String> =
        ["Copyright 2018 Foo".to_string(), "Portions by Qux".to_string()].into();

    let copyrights =
        copyrights_outside_file(&findings, &licenses, &in_file, &CopyrightGarbage::default());
    assert_eq!(copyrights, ["Copyright (C) 2017 Bar".to_string()].into());
}

#[test]
fn test_copyrights_outside_file_drop_normalized_garbage() {
    let mut findings = LicenseFindingsMap::new();
    findings.insert(
        "MIT".to_string(),
        ["Copyright 2018 Foo".to_string(), "Copyright 2017 Bar".to_string()].into(),
    );
    let licenses: BTreeSet<String> = ["MIT".to_string()].into();
    let garbage = CopyrightGarbage::new(["Copyright (C) 2018 Foo"]);

    let copyrights = copyrights_outside_file(&findings, &licenses, &BTreeSet::new(), &garbage);
    assert_eq!(copyrights, ["Copyright (C) 2017 Bar".to_string()].into());
}

#[tokio::test]
async fn test_garbage_matching_the_normalized_statement_is_removed() {
    let fixture = Fixture::new();
    let reporter = RecordingReporter::default();
    let result = scan_result(
        NESTJS,
        vec![LicenseFinding::new(
            "MIT",
            [loc("index.js", 1)].into(),
            [copyright("Copyright 2018 Foo", "index.js", 2)].into(),
        )],
    );
    let use_case = fixture.use_case(InMemoryStorage::with(vec![result]), &reporter);

    let response = use_case
        .execute(NoticeRequest::new(
            graph(&[NESTJS]),
            CopyrightGarbage::new(["Copyright (C) 2018 Foo"]),
        ))
        .await
        .unwrap();

    assert!(!response.content.contains("2018 Foo"));
    assert!(response.content.ends_with(
        "The following copyrights and licenses were found in the source code of this package:\n\n\
         MIT license text\n"
    ));
}
