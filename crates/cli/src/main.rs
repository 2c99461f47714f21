// ABOUTME: CLI for querying HTML documents with digests-query node sets.
// ABOUTME: Loads HTML from a file or stdin, applies filter flags, and prints the extracted value.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use digests_query::{parse_document, parse_fragment, NodeSet, Strictness};
use log::debug;
use serde_json::{json, Value};

/// What to pull out of the filtered node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Extract {
    Text,
    ExactText,
    Int,
    Float,
    Scan,
    Attr,
    Dump,
}

/// Filter an HTML document and extract a value from the matching node.
#[derive(Parser, Debug)]
#[command(name = "hdq")]
#[command(about = "Query HTML with chained filters and typed extraction", long_about = None)]
struct Args {
    /// HTML file path. Use "-" to read from stdin.
    target: String,

    /// Parse the input as a fragment instead of a full document.
    #[arg(long, default_value_t = false)]
    fragment: bool,

    /// Keep the single element with this id (zero or several matches fail).
    #[arg(long)]
    id: Option<String>,

    /// Keep elements with this tag name. Repeatable.
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Keep elements whose class list contains this token. Repeatable.
    #[arg(long = "class")]
    classes: Vec<String>,

    /// Keep elements whose attribute equals a value, given as KEY=VALUE. Repeatable.
    #[arg(long = "attr")]
    attrs: Vec<String>,

    /// Keep text nodes equal to this string.
    #[arg(long)]
    text: Option<String>,

    /// Keep text nodes containing this string.
    #[arg(long)]
    contains: Option<String>,

    /// Keep nodes with a direct child text node equal to this string.
    #[arg(long)]
    child_text: Option<String>,

    /// Fail when more than one node matches instead of taking the first.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Extraction to perform on the result.
    #[arg(short = 'e', long, value_enum, default_value_t = Extract::Text)]
    extract: Extract,

    /// Scan format with one %d or %v placeholder (for --extract scan).
    #[arg(long)]
    format: Option<String>,

    /// Attribute name (for --extract attr).
    #[arg(long)]
    key: Option<String>,

    /// Output JSON with the match count instead of the raw value.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let html = load_html(&args.target)?;
    let doc = if args.fragment {
        parse_fragment(&html)
    } else {
        parse_document(&html)
    };

    let set = apply_filters(NodeSet::all(&doc), args)?;
    debug!("{} nodes matched", set.len());

    let strictness = if args.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };

    let value = extract(&set, args, strictness)?;
    if args.json {
        Ok(json!({ "count": set.len(), "value": value }).to_string())
    } else {
        Ok(match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

fn apply_filters<'a>(mut set: NodeSet<'a>, args: &Args) -> Result<NodeSet<'a>> {
    if let Some(id) = &args.id {
        set = set.id(id);
    }
    for tag in &args.tags {
        set = set.element(tag.as_str());
    }
    for class in &args.classes {
        set = set.contains_class(class);
    }
    for attr in &args.attrs {
        let (key, val) = attr
            .split_once('=')
            .ok_or_else(|| anyhow!("--attr expects KEY=VALUE, got {:?}", attr))?;
        set = set.attribute(key, val);
    }
    if let Some(text) = &args.text {
        set = set.equal_text(text);
    }
    if let Some(text) = &args.contains {
        set = set.contains_text(text);
    }
    if let Some(text) = &args.child_text {
        set = set.child_equal_text(text);
    }
    Ok(set)
}

fn extract(set: &NodeSet<'_>, args: &Args, strictness: Strictness) -> Result<Value> {
    let value = match args.extract {
        Extract::Text => json!(set.text(strictness)?),
        Extract::ExactText => json!(set.exact_text(strictness)?),
        Extract::Int => json!(set.int(strictness)?),
        Extract::Float => json!(set.united_float(strictness)?),
        Extract::Scan => {
            let Some(format) = &args.format else {
                bail!("--extract scan requires --format");
            };
            json!(set.scan_int(format, strictness)?)
        }
        Extract::Attr => {
            let Some(key) = &args.key else {
                bail!("--extract attr requires --key");
            };
            json!(set.attr_val(key, strictness)?)
        }
        Extract::Dump => {
            if let Some(err) = set.err() {
                return Err(anyhow::Error::new(err.clone()));
            }
            let mut buf = Vec::new();
            set.clone().dump_to(&mut buf);
            json!(String::from_utf8_lossy(&buf).trim_end())
        }
    };
    Ok(value)
}

fn load_html(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    fs::read_to_string(&path).with_context(|| format!("reading {}", target))
}
