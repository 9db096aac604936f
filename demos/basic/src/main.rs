/**
 * Minimal harness for the jserr reporter.
 *
 * Point it at a collector (any HTTP server that accepts POSTs) and run:
 *
 *   cargo run -p jserr_example -- http://127.0.0.1:8080/report
 *   cargo run -p jserr_example -- http://127.0.0.1:8080/report --json
 *   cargo run -p jserr_example -- http://127.0.0.1:8080/report --options options.json
 *
 * Set `RUST_LOG=debug` to see delivered reports as well as dropped ones.
 */
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/report";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let endpoint = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or(DEFAULT_ENDPOINT);
    let use_json = args.iter().any(|a| a == "--json");
    let options_path = args
        .iter()
        .position(|a| a == "--options")
        .and_then(|i| args.get(i + 1));

    /*
     * Options come from a JSON file if given, otherwise a deny rule for
     * browser-extension scripts is enough to show the filter path.
     */
    let mut options = match options_path {
        Some(path) => {
            let json = match std::fs::read_to_string(path) {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("[example] cannot read {path}: {e}");
                    std::process::exit(2);
                }
            };
            match jserr::Options::from_json(&json) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("[example] {e}");
                    std::process::exit(2);
                }
            }
        }
        None => jserr::Options {
            deny_filename_patterns: jserr::PatternList::new([r"^https://ads\.example/"]).ok(),
            ..Default::default()
        },
    };
    if use_json {
        options.encoding = Some(jserr::Encoding::Json);
    }

    let environment = Arc::new(jserr::StaticEnvironment::new(USER_AGENT, "https://app.example/page"));
    let reporter = match jserr::init(endpoint, options, environment) {
        Ok(reporter) => reporter,
        Err(e) => {
            eprintln!("[example] {e}");
            std::process::exit(2);
        }
    };
    println!("[example] Reporting to {}", reporter.endpoint());

    let samples = [
        jserr::ErrorOccurrence::new("Uncaught ReferenceError: x is not defined", "https://app.example/app.js", 10, 5),
        jserr::ErrorOccurrence::new("Script error.", "", 0, 0),
        jserr::ErrorOccurrence::new("Uncaught TypeError: a is null", "https://ads.example/tag.js", 1, 822),
        jserr::ErrorOccurrence::new("Uncaught Error: boom", "moz-extension://4f1c/content.js", 3, 14),
    ];
    for occurrence in samples {
        println!("[example] Dispatching {:?} from {:?}", occurrence.message, occurrence.filename);
        jserr::dispatch_error(occurrence);
    }

    /*
     * Submissions run on their own threads; give them a moment before the
     * process exits.
     */
    std::thread::sleep(Duration::from_secs(2));
    println!("[example] Done.");
}
