// Run with: cargo run --example preview_run -- [operation...]
// Registered in scour-core/Cargo.toml: [[example]] name = "preview_run" path = "../preview_run.rs"

use std::time::Instant;

use scour_core::{BackendRegistry, CleanerConfig, Host, Tag, Tick, Worker};

struct Stdout {
    operations: Vec<String>,
    config: CleanerConfig,
}

impl Host for Stdout {
    fn selected_operations(&self) -> Vec<String> {
        self.operations.clone()
    }

    fn operation_options(&self, operation: &str) -> Vec<(String, bool)> {
        self.config
            .get(operation)
            .map(|def| def.default_options())
            .unwrap_or_default()
    }

    fn append_text(&mut self, line: &str, tag: Option<Tag>) {
        match tag {
            Some(Tag::Error) => println!("!! {}", line),
            None => println!("   {}", line),
        }
    }

    fn set_progress(&mut self, fraction: f64, label: &str) {
        println!("[{:>3.0}%] {}", fraction * 100.0, label);
    }

    fn set_busy(&mut self, _busy: bool) {}
}

fn main() {
    let config = match CleanerConfig::builtin() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut operations: Vec<String> = std::env::args().skip(1).collect();
    if operations.is_empty() {
        operations = config.cleaners.iter().map(|c| c.id.clone()).collect();
    }

    let registry = BackendRegistry::from_config(&config);
    let host = Stdout { operations, config };
    let mut worker = match Worker::new(host, registry, false) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let mut ticks = 0u64;
    while let Some(tick) = worker.next() {
        ticks += 1;
        if tick == Tick::Done {
            break;
        }
    }

    println!(
        "{} ticks in {:?}, {} bytes reclaimable",
        ticks,
        start.elapsed(),
        worker.reclaimable_bytes()
    );
}
