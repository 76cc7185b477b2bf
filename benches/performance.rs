use outline_tree::{
    TreeConfig,
    editor::{Editor, Selection},
    keys::{self, EditCommand},
    parse, render,
    textarea::TextArea,
};
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Performance benchmark suite for outline parsing, tree rendering and editing
///
/// Run with: cargo test --release --bench performance -- --nocapture
///
/// This measures:
/// - Outline parsing and level resolution
/// - Tree rendering with and without comment alignment
/// - Building an editor from a text and selection
/// - Outline commands on large selections
const SMALL_OUTLINE_LINES: usize = 10;
const MEDIUM_OUTLINE_LINES: usize = 100;
const LARGE_OUTLINE_LINES: usize = 1000;
const HUGE_OUTLINE_LINES: usize = 10000;

const ITERATIONS: usize = 100;

/// Create an outline that nests a few levels deep and comments every third entry
fn create_test_outline(num_lines: usize) -> String {
    let names = [
        "src", "lib.rs", "main.rs", "docs", "index.md", "tests", "fixtures", "README.md",
    ];

    let mut lines = Vec::with_capacity(num_lines);
    for i in 0..num_lines {
        let depth = match i % 7 {
            0 => 0,
            1 | 6 => 1,
            2 | 5 => 2,
            _ => 3,
        };
        let mut line = format!("{}{}{}", "  ".repeat(depth), names[i % names.len()], i);
        if i % 3 == 0 {
            line.push_str(" # entry ");
            line.push_str(&i.to_string());
        }
        lines.push(line);
    }
    lines.join("\n")
}

struct BenchmarkResult {
    name: String,
    iterations: usize,
    total_duration: Duration,
    avg_duration: Duration,
    min_duration: Duration,
    max_duration: Duration,
}

impl BenchmarkResult {
    fn print(&self) {
        println!("\n{}", "=".repeat(70));
        println!("Benchmark: {}", self.name);
        println!("{}", "=".repeat(70));
        println!("Iterations:     {}", self.iterations);
        println!("Total time:     {:?}", self.total_duration);
        println!("Average:        {:?}", self.avg_duration);
        println!("Min:            {:?}", self.min_duration);
        println!("Max:            {:?}", self.max_duration);

        if self.avg_duration.as_millis() > 100 {
            println!("\n⚠️  WARNING: Average duration > 100ms (user-perceptible lag)");
        } else if self.avg_duration.as_millis() > 16 {
            println!("\n⚠️  WARNING: Average duration > 16ms (may drop frames)");
        }
    }
}

fn benchmark<F>(name: &str, iterations: usize, mut f: F) -> BenchmarkResult
where
    F: FnMut(),
{
    let mut durations = Vec::with_capacity(iterations);

    // Warmup
    for _ in 0..10 {
        f();
    }

    for _ in 0..iterations {
        let start = Instant::now();
        f();
        durations.push(start.elapsed());
    }

    let total_duration: Duration = durations.iter().sum();
    let avg_duration = total_duration / iterations as u32;
    let min_duration = durations.iter().min().copied().unwrap_or_default();
    let max_duration = durations.iter().max().copied().unwrap_or_default();

    BenchmarkResult {
        name: name.to_string(),
        iterations,
        total_duration,
        avg_duration,
        min_duration,
        max_duration,
    }
}

fn sizes() -> [(&'static str, usize); 4] {
    [
        ("Small", SMALL_OUTLINE_LINES),
        ("Medium", MEDIUM_OUTLINE_LINES),
        ("Large", LARGE_OUTLINE_LINES),
        ("Huge", HUGE_OUTLINE_LINES),
    ]
}

#[test]
fn bench_parsing() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              OUTLINE PARSING BENCHMARKS                        ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    for (label, lines) in sizes() {
        let outline = create_test_outline(lines);
        let iterations = if lines >= HUGE_OUTLINE_LINES { 10 } else { ITERATIONS };
        let result = benchmark(&format!("Parse {label} ({lines} lines)"), iterations, || {
            black_box(parse(black_box(&outline)));
        });
        result.print();
        assert_eq!(parse(&outline).len(), lines);
    }
}

#[test]
fn bench_rendering() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              TREE RENDERING BENCHMARKS                         ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let configs = [
        ("plain", TreeConfig::default()),
        (
            "root + aligned",
            TreeConfig {
                root_element: true,
                align_comments: true,
            },
        ),
    ];

    for (label, lines) in sizes() {
        let nodes = parse(&create_test_outline(lines));
        let iterations = if lines >= HUGE_OUTLINE_LINES { 10 } else { ITERATIONS };
        for (config_label, config) in &configs {
            let result = benchmark(
                &format!("Render {label} ({lines} lines, {config_label})"),
                iterations,
                || {
                    black_box(render(black_box(&nodes), config));
                },
            );
            result.print();
        }
    }
}

#[test]
fn bench_editor_construction() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              EDITOR CONSTRUCTION BENCHMARKS                    ║");
    println!("╚════════════════════════════════════════════════════════════════╝");
    println!("\nThis runs on every Tab, Shift+Tab, Enter and Alt+arrow press.");

    for (label, lines) in sizes() {
        let outline = create_test_outline(lines);
        let len = outline.chars().count();
        let selection = Selection::new(len / 4, len / 2);
        let iterations = if lines >= HUGE_OUTLINE_LINES { 10 } else { ITERATIONS };
        let result = benchmark(
            &format!("Editor::new {label} ({lines} lines)"),
            iterations,
            || {
                let editor = Editor::new(black_box(&outline), selection);
                black_box(editor.global_selection());
                black_box(editor.to_string());
            },
        );
        result.print();
    }
}

#[test]
fn bench_outline_commands() {
    println!("\n\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              OUTLINE COMMAND BENCHMARKS                        ║");
    println!("╚════════════════════════════════════════════════════════════════╝");

    let outline = create_test_outline(LARGE_OUTLINE_LINES);
    let len = outline.chars().count();
    let whole = Selection::new(0, len);

    for command in [
        EditCommand::Indent,
        EditCommand::Outdent,
        EditCommand::MoveLinesUp,
        EditCommand::MoveLinesDown,
    ] {
        let result = benchmark(
            &format!("{command:?} on {LARGE_OUTLINE_LINES} selected lines"),
            ITERATIONS,
            || {
                let mut editor = Editor::new(&outline, whole);
                black_box(keys::apply(&mut editor, command).ok());
            },
        );
        result.print();
    }

    let mut area = TextArea::new(outline.clone());
    area.set_selection(Selection::caret(len / 2));
    let result = benchmark("Tab then Shift+Tab through TextArea", ITERATIONS, || {
        black_box(area.apply(EditCommand::Indent).ok());
        black_box(area.apply(EditCommand::Outdent).ok());
    });
    result.print();
}
