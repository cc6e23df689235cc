use clap::Parser;
use itertools::Itertools;
use serde_json::{Map, Value};
use view_context::errors::{ContextError, Result};
use view_context::path;

/// Merge inspector: apply dotted-path assignments to a JSON context and
/// print the result. Useful for checking what a set of plugin defaults
/// will produce before wiring them into a server.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Starting JSON context object (defaults to empty).
    context: Option<String>,
    /// Dotted-path assignment, e.g. `nested.something=Nested`. The value is
    /// parsed as JSON, falling back to a plain string. Repeatable; applied
    /// in order, last writer wins.
    #[arg(long = "set", value_name = "PATH=VALUE")]
    set: Vec<String>,
    /// Print only the value at this dotted path (optional)
    #[arg(long)]
    get: Option<String>,
    /// List the top-level keys of the merged context (optional flag)
    #[arg(long)]
    keys: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ContextError::Assignment(format!("missing `=` in `{raw}`")))?;
    let parsed = serde_json::from_str::<Value>(value)
        .unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), parsed))
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Parse the starting context; anything that isn't an object is empty.
    let mut context: Map<String, Value> = match args.context.as_deref() {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(m)) => m,
            Ok(_) => Map::new(),
            Err(e) => {
                eprintln!("Invalid JSON: {e}");
                std::process::exit(1);
            }
        },
        None => Map::new(),
    };

    // Apply assignments in order.
    for raw in &args.set {
        match parse_assignment(raw) {
            Ok((key, value)) => path::set_path(&mut context, &key, value),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }

    // Output as requested.
    if args.keys {
        println!("{}", context.keys().sorted().join(", "));
        return;
    }
    if let Some(ref wanted) = args.get {
        let value = path::get_path(&context, wanted).cloned().unwrap_or(Value::Null);
        println!("{}", serde_json::to_string_pretty(&value).unwrap());
        return;
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&Value::Object(context)).unwrap()
    );
}
