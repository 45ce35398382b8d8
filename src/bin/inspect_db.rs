// src/bin/inspect_db.rs

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use ResumeSift::pipeline::writers::SqliteSink;

/// Prints the rows stored by `sift` in its SQLite database.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the database file.
    #[arg(default_value = "resume.db")]
    database: PathBuf,

    /// Print rows as JSON lines instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !args.database.exists() {
        anyhow::bail!("Database '{}' does not exist", args.database.display());
    }

    let sink = SqliteSink::open(&args.database)
        .with_context(|| format!("Failed to open database '{}'", args.database.display()))?;
    let rows = sink.fetch_all().context("Failed to read resumes table")?;

    if args.json {
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
        return Ok(());
    }

    println!("{} resume(s) in {}", sink.count()?, args.database.display());
    for row in &rows {
        println!("--------------------");
        println!("ID:              {}", row.id);
        println!("Name:            {}", row.name.as_deref().unwrap_or("-"));
        println!("Email:           {}", row.email.as_deref().unwrap_or("-"));
        println!("Phone:           {}", row.phone.as_deref().unwrap_or("-"));
        println!("Category:        {}", row.category);
        println!("Recommended job: {}", row.recommended_job);
        println!("Skills:          {}", row.skills);
        println!("Education:       {}", row.education);
    }
    Ok(())
}
