mod common;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use common::{RecordingHost, ScriptedBackend};
use scour_core::{BackendRegistry, ScourError, SpecialResult, Tag, Tick, Worker, WorkerConfig};
use tempfile::TempDir;

/// Never suspend on time during the path phase
fn no_time_yields() -> WorkerConfig {
    WorkerConfig {
        yield_interval: Duration::from_secs(3600),
    }
}

/// Suspend after every path
fn yield_every_path() -> WorkerConfig {
    WorkerConfig {
        yield_interval: Duration::ZERO,
    }
}

fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![0u8; len]).unwrap();
    path
}

fn registry_with(backends: Vec<ScriptedBackend>) -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    for backend in backends {
        registry.register(Box::new(backend));
    }
    registry
}

fn track_totals<H: scour_core::Host>(worker: &mut Worker<H>) -> Rc<RefCell<Vec<u64>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    worker.set_total_size_callback(move |total| sink.borrow_mut().push(total));
    seen
}

#[test]
fn test_no_operation_selected_fails_before_touching_host() {
    let mut host = RecordingHost::selecting(&[]);
    let error = Worker::new(&mut host, BackendRegistry::new(), false).err();

    assert!(matches!(error, Some(ScourError::NoOperationSelected)));
    assert!(host.untouched());
}

#[test]
fn test_unknown_operation_fails_construction() {
    let mut host = RecordingHost::selecting(&["opera"]);
    let registry = registry_with(vec![ScriptedBackend::new("firefox")]);
    let error = Worker::new(&mut host, registry, true).err();

    assert!(matches!(error, Some(ScourError::UnknownOperation(ref op)) if op == "opera"));
    assert!(host.untouched());
}

#[test]
fn test_firefox_delete_scenario() {
    let temp = TempDir::new().unwrap();
    let p1 = write_file(temp.path(), "p1", 100);
    let p2 = temp.path().join("p2-vanished");
    let p3 = write_file(temp.path(), "p3", 50);

    let firefox = ScriptedBackend::new("firefox").with_paths(vec![
        Ok(p1.clone()),
        Ok(p2.clone()),
        Ok(p3.clone()),
    ]);
    let mut host = RecordingHost::selecting(&["firefox"]);
    let registry = registry_with(vec![firefox]);
    let mut worker = Worker::with_config(&mut host, registry, true, no_time_yields()).unwrap();
    let totals = track_totals(&mut worker);

    let ticks: Vec<Tick> = worker.by_ref().collect();
    assert_eq!(ticks, vec![Tick::Done]);
    assert_eq!(worker.total_bytes(), 150);
    assert!(worker.is_finished());
    drop(worker);

    assert_eq!(*totals.borrow(), vec![0, 100, 150]);
    assert_eq!(host.lines[0], (format!("100 B {}", p1.display()), None));
    assert_eq!(host.lines[1].1, Some(Tag::Error));
    assert!(host.lines[1].0.ends_with(&format!(" {}", p2.display())));
    assert_eq!(host.lines[2], (format!("50 B {}", p3.display()), None));
    assert_eq!(host.lines[3], ("Total size: 150 B".to_string(), None));
    assert_eq!(host.lines.len(), 4);
    assert!(!p1.exists());
    assert!(!p3.exists());
}

#[test]
fn test_preview_never_deletes_or_counts() {
    let temp = TempDir::new().unwrap();
    let p1 = write_file(temp.path(), "p1", 100);
    let p2 = write_file(temp.path(), "p2", 50);

    let backend = ScriptedBackend::new("cache")
        .with_paths(vec![Ok(p1.clone()), Ok(p2.clone())])
        .with_specials(vec![Ok(SpecialResult::Freed {
            bytes: 4096,
            description: "Vacuum db".to_string(),
        })]);
    let mut host = RecordingHost::selecting(&["cache"]);
    let mut worker =
        Worker::with_config(&mut host, registry_with(vec![backend]), false, no_time_yields())
            .unwrap();
    let totals = track_totals(&mut worker);

    for _ in worker.by_ref() {}
    assert_eq!(worker.total_bytes(), 0);
    assert_eq!(worker.reclaimable_bytes(), 150);
    drop(worker);

    assert_eq!(*totals.borrow(), vec![0]);
    assert!(p1.exists());
    assert!(p2.exists());
    assert!(host.plain_lines().contains(&"Special operation: Vacuum db"));
    assert_eq!(host.lines.last().unwrap().0, "Total size: 150 B");
}

#[test]
fn test_running_backend_skipped_when_deleting() {
    let temp = TempDir::new().unwrap();
    let kept = write_file(temp.path(), "kept", 10);
    let other = write_file(temp.path(), "other", 20);

    let busy = ScriptedBackend::new("firefox")
        .running()
        .with_paths(vec![Ok(kept.clone())])
        .with_specials(vec![Ok(SpecialResult::Freed {
            bytes: 1,
            description: "never".to_string(),
        })]);
    let list_calls = Rc::clone(&busy.list_calls);
    let idle = ScriptedBackend::new("thumbnails").with_paths(vec![Ok(other.clone())]);

    let mut host = RecordingHost::selecting(&["firefox", "thumbnails"]);
    let mut worker = Worker::with_config(
        &mut host,
        registry_with(vec![busy, idle]),
        true,
        no_time_yields(),
    )
    .unwrap();
    for _ in worker.by_ref() {}
    assert_eq!(worker.total_bytes(), 20);
    drop(worker);

    assert_eq!(list_calls.get(), 0);
    assert!(kept.exists());
    assert!(!other.exists());
    assert_eq!(
        host.error_lines(),
        vec!["FIREFOX cannot be cleaned because it is currently running.  Close it, and try again."]
    );
}

#[test]
fn test_running_backend_still_previewed() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "f", 10);
    let busy = ScriptedBackend::new("firefox")
        .running()
        .with_paths(vec![Ok(file.clone())]);

    let mut host = RecordingHost::selecting(&["firefox"]);
    let worker =
        Worker::with_config(&mut host, registry_with(vec![busy]), false, no_time_yields()).unwrap();
    for _ in worker {}

    assert!(host.error_lines().is_empty());
    assert_eq!(host.lines[0].0, format!("10 B {}", file.display()));
}

#[test]
fn test_failing_path_stream_moves_on_to_special_phase() {
    let temp = TempDir::new().unwrap();
    let a = write_file(temp.path(), "a", 1);
    let b = write_file(temp.path(), "b", 2);
    let never = write_file(temp.path(), "never", 3);

    let broken = ScriptedBackend::new("broken")
        .with_paths(vec![
            Ok(a.clone()),
            Ok(b.clone()),
            Err("Permission denied".to_string()),
            Ok(never.clone()),
        ])
        .with_specials(vec![Ok(SpecialResult::Freed {
            bytes: 7,
            description: "compact".to_string(),
        })]);
    let next = ScriptedBackend::new("next").with_specials(vec![Ok(SpecialResult::Freed {
        bytes: 5,
        description: "after".to_string(),
    })]);

    let mut host = RecordingHost::selecting(&["broken", "next"]);
    let mut worker = Worker::with_config(
        &mut host,
        registry_with(vec![broken, next]),
        true,
        no_time_yields(),
    )
    .unwrap();
    for _ in worker.by_ref() {}
    assert_eq!(worker.total_bytes(), 1 + 2 + 7 + 5);
    drop(worker);

    let lines: Vec<&str> = host.lines.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(
        lines,
        vec![
            format!("1 B {}", a.display()).as_str(),
            format!("2 B {}", b.display()).as_str(),
            "Exception while running operation 'broken': 'Permission denied'",
            "* 7 B compact",
            "* 5 B after",
            "Total size: 15 B",
        ]
    );
    assert_eq!(host.error_lines().len(), 1);
    assert!(never.exists());
}

#[test]
fn test_special_sentinel_and_failure_end_phase() {
    let stops = ScriptedBackend::new("stops").with_specials(vec![
        Ok(SpecialResult::Freed {
            bytes: 10,
            description: "first".to_string(),
        }),
        Ok(SpecialResult::Stop),
        Ok(SpecialResult::Freed {
            bytes: 99,
            description: "after stop".to_string(),
        }),
    ]);
    let fails = ScriptedBackend::new("fails").with_specials(vec![
        Err("database is locked".to_string()),
        Ok(SpecialResult::Freed {
            bytes: 99,
            description: "after failure".to_string(),
        }),
    ]);

    let mut host = RecordingHost::selecting(&["stops", "fails"]);
    let mut worker = Worker::with_config(
        &mut host,
        registry_with(vec![stops, fails]),
        true,
        no_time_yields(),
    )
    .unwrap();
    let ticks: Vec<Tick> = worker.by_ref().collect();
    assert_eq!(worker.total_bytes(), 10);
    drop(worker);

    // One tick per special item, then the final one
    assert_eq!(ticks, vec![Tick::Working, Tick::Done]);
    assert_eq!(host.plain_lines(), vec!["* 10 B first", "Total size: 10 B"]);
    assert_eq!(
        host.error_lines(),
        vec!["Exception while running operation 'fails': 'database is locked'"]
    );
}

#[test]
fn test_ticks_yield_per_path_when_interval_elapsed() {
    let temp = TempDir::new().unwrap();
    let paths: Vec<_> = (0..3)
        .map(|i| Ok(write_file(temp.path(), &format!("f{}", i), 1)))
        .collect();
    let backend = ScriptedBackend::new("op")
        .with_paths(paths)
        .with_specials(vec![Ok(SpecialResult::Pending("later".to_string()))]);

    let mut host = RecordingHost::selecting(&["op"]);
    let mut worker =
        Worker::with_config(&mut host, registry_with(vec![backend]), false, yield_every_path())
            .unwrap();

    assert_eq!(worker.next(), Some(Tick::Working));
    assert_eq!(worker.state().reclaimable_bytes, 1);
    assert!(!worker.is_finished());

    let rest: Vec<Tick> = worker.by_ref().collect();
    assert_eq!(rest, vec![Tick::Working, Tick::Working, Tick::Working, Tick::Done]);
    assert_eq!(worker.next(), None);
    assert_eq!(worker.next(), None);
}

#[test]
fn test_path_phase_yield_timer_restarts_after_each_suspension() {
    let temp = TempDir::new().unwrap();
    let paths: Vec<_> = (0..8)
        .map(|i| Ok(write_file(temp.path(), &format!("f{}", i), 1)))
        .collect();
    // Two paths fit in one interval, one does not
    let backend = ScriptedBackend::new("slow")
        .with_paths(paths)
        .with_path_delay(Duration::from_millis(60));

    let mut host = RecordingHost::selecting(&["slow"]);
    let config = WorkerConfig {
        yield_interval: Duration::from_millis(100),
    };
    let mut worker =
        Worker::with_config(&mut host, registry_with(vec![backend]), false, config).unwrap();

    let mut cleaned_at_yield: Vec<u64> = Vec::new();
    while let Some(tick) = worker.next() {
        if tick == Tick::Working {
            cleaned_at_yield.push(worker.state().paths_cleaned);
        }
    }

    // About every second path; a timer that never restarts yields after
    // every path once the first interval has passed
    assert!(!cleaned_at_yield.is_empty(), "never yielded");
    assert!(cleaned_at_yield[0] >= 2, "yielded at {:?}", cleaned_at_yield);
    assert!(cleaned_at_yield.len() <= 5, "yielded at {:?}", cleaned_at_yield);
}

#[test]
fn test_progress_and_busy_reporting() {
    let mut host = RecordingHost::selecting(&["a", "b"]);
    let registry = registry_with(vec![ScriptedBackend::new("a"), ScriptedBackend::new("b")]);
    let worker = Worker::with_config(&mut host, registry, true, no_time_yields()).unwrap();
    for _ in worker {}

    assert_eq!(
        host.progress,
        vec![
            (0.0, "Please wait.  Scanning and deleting: a".to_string()),
            (0.5, "Please wait.  Scanning and deleting: b".to_string()),
            (1.0, "Done.".to_string()),
        ]
    );
    assert_eq!(host.busy, vec![true, false]);
    assert_eq!(host.cleared, 1);
    assert_eq!(host.lines, vec![("Total size: 0 B".to_string(), None)]);
}

#[test]
fn test_preview_label() {
    let mut host = RecordingHost::selecting(&["a"]);
    let registry = registry_with(vec![ScriptedBackend::new("a")]);
    let worker = Worker::with_config(&mut host, registry, false, no_time_yields()).unwrap();
    for _ in worker {}

    assert_eq!(host.progress[0].1, "Please wait.  Scanning: a");
}

#[test]
fn test_options_applied_before_listing() {
    let backend = ScriptedBackend::new("firefox");
    let seen = Rc::clone(&backend.options_seen);

    let mut host = RecordingHost::selecting(&["firefox"]);
    host.options.insert(
        "firefox".to_string(),
        vec![("cache".to_string(), true), ("vacuum".to_string(), false)],
    );
    let worker =
        Worker::with_config(&mut host, registry_with(vec![backend]), false, no_time_yields())
            .unwrap();
    for _ in worker {}

    assert_eq!(
        *seen.borrow(),
        vec![("cache".to_string(), true), ("vacuum".to_string(), false)]
    );
}

#[test]
fn test_total_is_sum_of_deleted_sizes_across_operations() {
    let temp = TempDir::new().unwrap();
    let sizes = [[3usize, 40], [500, 6000]];
    let mut backends = Vec::new();
    for (i, pair) in sizes.iter().enumerate() {
        let paths = pair
            .iter()
            .enumerate()
            .map(|(j, len)| Ok(write_file(temp.path(), &format!("{}-{}", i, j), *len)))
            .collect();
        backends.push(ScriptedBackend::new(&format!("op{}", i)).with_paths(paths));
    }

    let mut host = RecordingHost::selecting(&["op0", "op1"]);
    let mut worker =
        Worker::with_config(&mut host, registry_with(backends), true, yield_every_path()).unwrap();
    for _ in worker.by_ref() {}

    assert_eq!(worker.total_bytes(), 3 + 40 + 500 + 6000);
    assert_eq!(worker.state().paths_cleaned, 4);
    assert_eq!(worker.state().errors, 0);
}

#[test]
fn test_preview_twice_is_identical() {
    let temp = TempDir::new().unwrap();
    let a = write_file(temp.path(), "a", 123);
    let b = write_file(temp.path(), "b", 4567);

    let run = || {
        let backend = ScriptedBackend::new("op").with_paths(vec![Ok(a.clone()), Ok(b.clone())]);
        let mut host = RecordingHost::selecting(&["op"]);
        let worker =
            Worker::with_config(&mut host, registry_with(vec![backend]), false, no_time_yields())
                .unwrap();
        for _ in worker {}
        host.lines
    };

    assert_eq!(run(), run());
}
