//! Output formatting for analysis results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: one array of `{path, message}` records
//! - Messages: one protocol message per line, as `serve` emits them

use std::io::Write;

use colored::*;

use crate::analysis::{edge_count, FileAnalysis, FunctionRecord, LogicNode};
use crate::protocol::AnalysisMessage;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Pretty,
    Json,
    Messages,
}

/// Write results as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut out: W, results: &[FileAnalysis]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, results)?;
    writeln!(out)?;
    Ok(())
}

/// Write one compact message per line.
pub fn write_messages<W: Write>(mut out: W, results: &[FileAnalysis]) -> anyhow::Result<()> {
    for result in results {
        serde_json::to_writer(&mut out, &result.message)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Write results for a terminal.
pub fn write_pretty(path: &str, results: &[FileAnalysis], show_logic: bool) {
    // Header
    println!();
    print!("  ");
    print!("{}", "logicmap".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", path);
    println!();

    for result in results {
        write_file(result, show_logic);
        println!();
    }

    write_summary(results);
    println!();
}

fn write_file(result: &FileAnalysis, show_logic: bool) {
    match &result.message {
        AnalysisMessage::AnalysisSucceeded { payload } => {
            println!(
                "  {} {}",
                result.path.blue().bold(),
                format!("({} functions)", payload.functions.len()).dimmed()
            );
            if payload.functions.is_empty() {
                println!("    {}", "no functions found".dimmed());
                return;
            }

            for function in &payload.functions {
                write_function(function, show_logic);
            }

            let edges = edge_count(&payload.call_graph);
            if edges > 0 {
                println!();
                println!("    {} ({} edges):", "Call graph".bold(), edges);
                for (caller, callees) in &payload.call_graph {
                    if !callees.is_empty() {
                        println!("      {} {} {}", caller, "→".dimmed(), callees.join(", "));
                    }
                }
            }
        }
        AnalysisMessage::AnalysisFailed { error, .. } => {
            print!("  {}", result.path.blue().bold());
            println!("  {} {}", "FAILED".red(), error);
        }
    }
}

fn write_function(function: &FunctionRecord, show_logic: bool) {
    print!("    {:<24}", function.name.as_str().bold());
    print!(
        "{}",
        format!("L{}-{}", function.start_line, function.end_line).dimmed()
    );
    print!("  lines: {:<4}", function.line_count);
    print!("conditions: ");
    write_colored_conditions(function.conditions);
    print!("  vars: {}", function.variables.len());
    print!("  calls: {}", function.calls.len());
    print!("  nesting: {}", function.max_nesting());
    println!();

    if show_logic {
        write_logic(&function.logic_tree, 3);
    }
}

fn write_colored_conditions(n: usize) {
    match n {
        0..=2 => print!("{:<3}", n.to_string().green()),
        3..=7 => print!("{:<3}", n.to_string().yellow()),
        _ => print!("{:<3}", n.to_string().red()),
    }
}

fn write_logic(nodes: &[LogicNode], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            LogicNode::If { condition, .. } => {
                println!("{}{} {}", indent, "if".magenta(), condition);
            }
            LogicNode::Loop { .. } => {
                println!("{}{}", indent, "loop".cyan());
            }
        }
        write_logic(node.children(), depth + 1);
    }
}

/// Totals over a batch, as printed in the summary line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    files: usize,
    failed: usize,
    functions: usize,
    conditions: usize,
}

impl Summary {
    fn of(results: &[FileAnalysis]) -> Self {
        let mut summary = Summary {
            files: results.len(),
            ..Summary::default()
        };
        for result in results {
            match result.message.payload() {
                Some(payload) => {
                    summary.functions += payload.functions.len();
                    summary.conditions += payload.total_conditions();
                }
                None => summary.failed += 1,
            }
        }
        summary
    }
}

fn write_summary(results: &[FileAnalysis]) {
    let summary = Summary::of(results);

    print!("  Files: {}", summary.files);
    print!("  Functions: {}", summary.functions);
    print!("  Conditions: {}", summary.conditions);
    print!("  ");
    if summary.failed == 0 {
        print!("{}", "✓ OK".green());
    } else {
        print!("{}", format!("✗ {} failed", summary.failed).red());
    }
    println!();
}
