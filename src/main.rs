use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use modelquill::config::Config;
use modelquill::data::{DataModel, DataNode, ParseOptions, UnknownFieldPolicy};
use modelquill::file::loader::{load_instance_file, load_instance_from_stdin, load_schema_file};
use modelquill::file::saver::save_instance_file;
use modelquill::path::Evaluator;
use modelquill::record::{extract_record, FieldSet, Record};
use modelquill::schema::SchemaModel;

/// ModelQuill - schema-aware data tree queries
#[derive(Parser)]
#[command(name = "modelquill")]
#[command(version)]
#[command(about = "A schema-aware tree query engine with path-based search", long_about = None)]
struct Cli {
    /// Schema definition file
    schema: String,

    /// JSON instance document (omit to read from stdin if piped)
    data: Option<String>,

    /// Path query to evaluate; repeatable. Without any, the built-in
    /// roster report runs instead.
    #[arg(short, long)]
    query: Vec<String>,

    /// Unknown-field policy: skip or error (overrides config)
    #[arg(long)]
    unknown_fields: Option<String>,

    /// Re-serialize the validated instance to this file (a .gz target
    /// is compressed)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load();

    // CLI policy overrides config
    let policy_name = cli
        .unknown_fields
        .as_deref()
        .unwrap_or(&config.unknown_fields);
    let policy = UnknownFieldPolicy::from_name(policy_name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown field policy '{}' (expected 'skip' or 'error')",
            policy_name
        )
    })?;
    let options = ParseOptions {
        unknown_fields: policy,
    };

    let schema = load_schema_file(&cli.schema)?;

    let model = if let Some(data_path) = &cli.data {
        load_instance_file(&schema, data_path, &options)?
    } else if !std::io::stdin().is_terminal() {
        load_instance_from_stdin(&schema, &options)?
    } else {
        anyhow::bail!("No instance document: pass a file or pipe JSON on stdin");
    };

    if config.show_warnings {
        for warning in model.warnings() {
            eprintln!("Warning: {}", warning);
        }
    }

    let evaluator = Evaluator::new(&schema, &model);

    if cli.query.is_empty() {
        run_roster_report(&schema, &model, &evaluator)?;
    } else {
        for query in &cli.query {
            print_query(&schema, &evaluator, query)?;
        }
    }

    if let Some(output) = &cli.output {
        save_instance_file(output, &schema, &model, config.pretty)?;
        println!("wrote {}", output);
    }

    Ok(())
}

/// Evaluates one query and prints its matches.
fn print_query(schema: &SchemaModel, evaluator: &Evaluator, query: &str) -> Result<()> {
    let matches = evaluator
        .evaluate(query)
        .with_context(|| format!("Failed to evaluate '{}'", query))?;
    println!("{}: {} match(es)", query, matches.len());
    for node in matches {
        println!("  {}", describe_node(schema, node));
    }
    Ok(())
}

/// Renders a matched node: leaves by value, entries as a field summary.
fn describe_node(schema: &SchemaModel, node: &DataNode) -> String {
    let name = schema.node(node.schema()).name();
    match node.leaf_value() {
        Some(value) => format!("{} = {}", name, value),
        None => {
            let fields: Vec<String> = node
                .children()
                .iter()
                .filter_map(|c| {
                    c.leaf_value()
                        .map(|v| format!("{}: {}", schema.node(c.schema()).name(), v))
                })
                .collect();
            format!("{} {{{}}}", name, fields.join(", "))
        }
    }
}

/// The default report: enumerate person names, then for each name list
/// the teams that fielded a player with that name, with the player's
/// season, number, and scores.
///
/// A failed extraction for one match is not fatal; the report warns and
/// continues with the remaining matches.
fn run_roster_report(
    schema: &SchemaModel,
    model: &DataModel,
    evaluator: &Evaluator,
) -> Result<()> {
    let names = evaluator
        .evaluate("person/name")
        .context("Failed to evaluate person/name")?;
    println!("found {} names with person/name", names.len());

    let fields = FieldSet::new(["name", "season", "number", "scores"]).with_parent("name");

    for (i, name_leaf) in names.iter().enumerate() {
        let name = match name_leaf.leaf_value() {
            Some(value) => value.to_string(),
            None => continue,
        };

        let query = format!("team/player[name='{}']", escape_literal(&name));
        let paths = match evaluator.evaluate_paths(&query) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Warning: {}: {}", query, e);
                continue;
            }
        };

        println!("player {}: {} played for {}:", i, name, paths.len());
        for path in &paths {
            match extract_record(schema, model, path, "player", &fields) {
                Ok(record) => println!(
                    "  {} (scored {} as #{} in {})",
                    field(&record, "team_name"),
                    field(&record, "scores"),
                    field(&record, "number"),
                    field(&record, "season"),
                ),
                Err(e) => eprintln!("Warning: skipping one {} match: {}", query, e),
            }
        }
    }

    Ok(())
}

fn field(record: &Record, name: &str) -> String {
    record
        .get(name)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Escapes a leaf value for use inside a single-quoted path literal.
fn escape_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
