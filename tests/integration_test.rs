use std::fs;
use std::path::PathBuf;

use tinygrep::{
    search, Document, DocumentKind, FileSource, GrepError, Matcher, Source, TreeSource, WalkConfig,
};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory tree for testing.
///
/// Structure:
/// ```text
/// tmp/
///   fruit.txt       apple pie / blueberry / raspberry jam
///   numbers.txt     call 555-1234 / no digits here
///   .hidden.txt     hidden blueberry
///   subdir/
///     more.txt      strawberry / cherry
///     deeper/
///       deep.txt    elderberry
/// ```
fn setup_test_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("fruit.txt"), "apple pie\nblueberry\nraspberry jam\n").unwrap();
    fs::write(root.join("numbers.txt"), "call 555-1234\nno digits here\n").unwrap();
    fs::write(root.join(".hidden.txt"), "hidden blueberry\n").unwrap();

    let sub = root.join("subdir");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("more.txt"), "strawberry\ncherry\n").unwrap();

    let deeper = sub.join("deeper");
    fs::create_dir(&deeper).unwrap();
    fs::write(deeper.join("deep.txt"), "elderberry\n").unwrap();

    dir
}

/// An in-memory source: one unlabelled document per string.
struct TextSource(Vec<&'static str>);

impl Source for TextSource {
    fn documents(&self, _config: &WalkConfig) -> Box<dyn Iterator<Item = Result<Document, GrepError>>> {
        let docs = self
            .0
            .iter()
            .map(|text| {
                Ok(Document {
                    path:  None,
                    label: None,
                    kind:  DocumentKind::Stdin,
                    text:  text.to_string(),
                })
            })
            .collect::<Vec<_>>();
        Box::new(docs.into_iter())
    }
}

/// Every regular file under `root`, listed independently with walkdir.
fn walkdir_files(root: &std::path::Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn finds_matching_lines() {
    let results = search()
        .source(TextSource(vec!["apple pie\nblueberry\nraspberry jam"]))
        .pattern(".+berry")
        .collect_lines(true)
        .run()
        .unwrap();

    assert_eq!(results.matches, 2, "should find 2 berry lines");
    let texts: Vec<_> = results.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["blueberry", "raspberry jam"]);
    assert_eq!(results.lines[0].number, 2);
    assert_eq!(results.lines[1].number, 3);
}

#[test]
fn respects_limit() {
    let results = search()
        .source(TextSource(vec!["a1\na2\na3", "a4"]))
        .pattern("a")
        .limit(2)
        .collect_lines(true)
        .run()
        .unwrap();

    assert_eq!(results.matches, 2, "search should stop at the limit");
    assert_eq!(results.lines.len(), 2);
    assert_eq!(results.stats.documents, 1);
}

#[test]
fn recursive_search_labels_every_file() {
    let dir = setup_test_dir();
    let results = search()
        .source(TreeSource::new([dir.path()]))
        .pattern("berry$")
        .collect_lines(true)
        .run()
        .unwrap();

    // blueberry, hidden blueberry, strawberry, elderberry
    assert_eq!(results.matches, 4);
    assert!(results.lines.iter().all(|l| l.label.is_some()));

    let labels: Vec<_> = results.lines.iter().map(|l| l.label.clone().unwrap()).collect();
    let mut sorted = labels.clone();
    sorted.sort();
    assert_eq!(labels, sorted, "output should be in path order");

    let hidden = results
        .lines
        .iter()
        .find(|l| l.text == "hidden blueberry")
        .expect("hidden files are searched");
    assert!(hidden.label.as_deref().unwrap().ends_with(".hidden.txt"));
}

#[test]
fn recursive_search_reads_every_file_walkdir_sees() {
    let dir = setup_test_dir();
    let results = search()
        .source(TreeSource::new([dir.path()]))
        .pattern("")
        .run()
        .unwrap();

    assert_eq!(results.stats.documents, walkdir_files(dir.path()).len());
    // 3 + 2 + 1 + 2 + 1 lines
    assert_eq!(results.stats.lines, 9);
    assert_eq!(results.matches, 9, "the empty pattern matches every line");
}

#[test]
fn recursive_search_honours_max_depth() {
    let dir = setup_test_dir();
    let results = search()
        .source(TreeSource::new([dir.path()]))
        .pattern("berry")
        .max_depth(1)
        .collect_lines(true)
        .run()
        .unwrap();

    assert!(results.lines.iter().all(|l| !l.text.contains("strawberry")));
    assert!(results.lines.iter().all(|l| !l.text.contains("elderberry")));
    assert_eq!(results.matches, 3);
}

#[test]
fn file_source_labels_only_multiple_files() {
    let dir = setup_test_dir();
    let fruit = dir.path().join("fruit.txt");
    let numbers = dir.path().join("numbers.txt");

    let single = search()
        .source(FileSource::new([&fruit]))
        .pattern("apple")
        .collect_lines(true)
        .run()
        .unwrap();
    assert_eq!(single.lines[0].to_string(), "apple pie");

    let multi = search()
        .source(FileSource::new([&fruit, &numbers]))
        .pattern(r"\d+-\d+|^apple")
        .collect_lines(true)
        .run()
        .unwrap();
    let shown: Vec<_> = multi.lines.iter().map(|l| l.to_string()).collect();
    assert_eq!(
        shown,
        vec![
            format!("{}:apple pie", fruit.display()),
            format!("{}:call 555-1234", numbers.display()),
        ]
    );
}

#[test]
fn missing_files_are_skipped_and_collected() {
    let dir = setup_test_dir();
    let results = search()
        .source(FileSource::new([dir.path().join("nope.txt"), dir.path().join("fruit.txt")]))
        .pattern("apple")
        .collect_errors(true)
        .run()
        .unwrap();

    assert_eq!(results.matches, 1, "remaining files are still searched");
    assert_eq!(results.errors.len(), 1);
    assert!(matches!(results.errors[0], GrepError::NotFound(_)));
    assert!(results.errors[0].is_recoverable());
}

#[test]
fn errors_empty_when_not_collecting() {
    let results = search()
        .source(FileSource::new(["/definitely/not/here.txt"]))
        .pattern("x")
        .run()
        .unwrap();

    assert!(
        results.errors.is_empty(),
        "errors should be empty when collect_errors is false"
    );
    assert_eq!(results.matches, 0);
}

#[test]
fn lines_empty_when_not_collecting() {
    let results = search()
        .source(TextSource(vec!["one\ntwo\none"]))
        .pattern("one")
        .run()
        .unwrap();

    assert!(
        results.lines.is_empty(),
        "lines should be empty when collect_lines is false"
    );
    assert_eq!(results.matches, 2, "matches should still be counted");
}

#[test]
fn custom_matcher_works() {
    struct LongLine;
    impl Matcher for LongLine {
        fn is_match(&self, line: &str) -> bool {
            line.len() > 5
        }
    }

    let results = search()
        .source(TextSource(vec!["short\nmuch longer\ntiny"]))
        .with_matcher(LongLine)
        .pattern("this is ignored")
        .collect_lines(true)
        .run()
        .unwrap();

    assert_eq!(results.matches, 1);
    assert_eq!(results.lines[0].text, "much longer");
}

#[test]
fn configuration_errors_are_fatal() {
    let no_source = search().pattern("a").run();
    assert!(matches!(no_source, Err(GrepError::MissingSource)));

    let no_pattern = search().source(TextSource(vec!["a"])).run();
    assert!(matches!(no_pattern, Err(GrepError::MissingPattern)));

    let bad_pattern = search().source(TextSource(vec!["a"])).pattern("(a").run();
    assert!(matches!(bad_pattern, Err(GrepError::Pattern(_))));

    let no_threads = search().source(TextSource(vec!["a"])).pattern("a").threads(0).run();
    assert!(matches!(no_threads, Err(GrepError::InvalidThreadCount(0))));
}

#[test]
fn stats_are_populated() {
    let results = search()
        .source(TextSource(vec!["a\nb", "c"]))
        .pattern("b")
        .run()
        .unwrap();

    assert_eq!(results.stats.documents, 2);
    assert_eq!(results.stats.lines, 3);
    assert_eq!(results.matches, 1);
}

#[test]
fn on_match_sees_lines_as_they_are_found() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let results = search()
        .source(TextSource(vec!["apple pie\nblueberry", "raspberry jam"]))
        .pattern("berry")
        .on_match(move |line| {
            sink.borrow_mut().push(line.to_string());
            Ok(())
        })
        .run()
        .unwrap();

    assert_eq!(results.matches, 2);
    assert!(results.lines.is_empty(), "streaming does not imply collecting");
    assert_eq!(*seen.borrow(), vec!["blueberry", "raspberry jam"]);
}

#[test]
fn failing_sink_stops_the_search() {
    let mut calls = 0;
    let result = search()
        .source(TextSource(vec!["a1\na2\na3"]))
        .pattern("a")
        .on_match(move |_| {
            calls += 1;
            if calls == 2 {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            } else {
                Ok(())
            }
        })
        .run();

    assert!(matches!(result, Err(GrepError::Output(_))));
}

#[test]
fn documents_split_on_every_line_break() {
    let results = search()
        .source(TextSource(vec!["x\rab\u{2028}ab\r\nend"]))
        .pattern("^ab$")
        .collect_lines(true)
        .run()
        .unwrap();

    assert_eq!(results.matches, 2);
    assert_eq!(results.stats.lines, 4);
    let numbers: Vec<_> = results.lines.iter().map(|l| l.number).collect();
    assert_eq!(numbers, vec![2, 3]);
}
