//! Diagnostics command.

use anyhow::Result;
use colored::Colorize;
use geolog_core::Database;

use crate::cli::DoctorCommand;
use crate::config::Config;

/// Expected column layout of the locations table
const EXPECTED_COLUMNS: [&str; 5] = ["id", "source", "latitude", "longitude", "created_at"];

pub fn execute(cmd: DoctorCommand, config: &Config) -> Result<()> {
    println!("{}", "geolog Doctor".cyan().bold());
    println!("{}", "─".repeat(50));
    println!();

    let mut issues = Vec::new();

    // Check config file
    print!("  Config file: ");
    let config_path = Config::config_path();
    if config_path.exists() {
        println!("{}", "✓ exists".green());
    } else {
        println!("{}", "○ not found (using defaults)".yellow());
    }

    // Check database file
    let path = config.resolve_database(cmd.database);
    print!("  Database file: ");
    if path.exists() {
        println!("{}", format!("✓ {}", path.display()).green());

        match Database::open_path(&path) {
            Ok(db) => {
                print!("  Connection: ");
                match db.ping() {
                    Ok(_) => println!("{}", "✓ ok".green()),
                    Err(e) => {
                        println!("{}", format!("✗ {}", e).red());
                        issues.push("Database is not queryable");
                    }
                }

                print!("  locations table: ");
                match db.has_locations_table() {
                    Ok(true) => {
                        println!("{}", "✓ present".green());
                        check_schema(&db, &mut issues);
                    }
                    Ok(false) => {
                        println!("{}", "✗ missing".red());
                        issues.push("locations table is missing - run `geolog migrate`");
                    }
                    Err(e) => {
                        println!("{}", format!("✗ {}", e).red());
                        issues.push("Failed to inspect the schema");
                    }
                }
            }
            Err(e) => {
                println!("  Connection: {}", format!("✗ {}", e).red());
                issues.push("Database not accessible");
            }
        }
    } else {
        println!("{}", "✗ not found".red());
        issues.push("Database file not found - run `geolog migrate` first");
    }

    // Summary
    println!();
    if issues.is_empty() {
        println!("{}", "✓ All checks passed".green().bold());
    } else {
        println!("{}", format!("✗ {} issue(s) found:", issues.len()).red().bold());
        for issue in &issues {
            println!("  • {}", issue);
        }
    }

    Ok(())
}

fn check_schema(db: &Database, issues: &mut Vec<&'static str>) {
    print!("  Columns: ");
    match db.locations_columns() {
        Ok(columns) => {
            let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
            if names == EXPECTED_COLUMNS {
                println!("{}", "✓ as expected".green());
            } else {
                println!("{}", format!("✗ unexpected layout: {:?}", names).red());
                issues.push("locations table has an unexpected column layout");
            }
        }
        Err(e) => {
            println!("{}", format!("✗ {}", e).red());
            issues.push("Failed to inspect table columns");
        }
    }

    print!("  Stored fixes: ");
    match db.count_locations() {
        Ok(count) => println!("{}", format!("✓ {}", count).green()),
        Err(e) => {
            println!("{}", format!("✗ {}", e).red());
            issues.push("Failed to count stored fixes");
        }
    }
}
