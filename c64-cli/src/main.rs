mod layout;

use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "c64-cli")]
#[command(about = "C64 keyboard bridge keymap tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the binding table as an SVG file
    Layout {
        /// Output path; stdout if omitted
        output: Option<String>,
    },
    /// Print the binding table as a text grid
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Layout { output } => {
            let svg = layout::render_svg();
            match output {
                Some(path) => {
                    fs::write(&path, svg).with_context(|| format!("writing {}", path))?;
                    println!("Wrote {}", path);
                }
                None => print!("{}", svg),
            }
        }
        Command::Table => layout::print_table(),
    }

    Ok(())
}
