use chrono::Utc;
use clap::{Parser, Subcommand};
use std::{fs, path::PathBuf};

mod error;
mod md3;
mod md3_types;
mod ser;
mod shaders;
mod wire;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every shader name in an MD3 model, numbered
    ListShaders {
        input: PathBuf,
    },
    /// Rename one shader by its number and write the re-encoded model
    RenameShader {
        input: PathBuf,
        output: PathBuf,
        /// Shader number as printed by list-shaders (1-based)
        number: usize,
        /// Replacement shader name, at most 63 bytes
        name: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::ListShaders { input } => {
            let data = fs::read(input)?;
            for (number, name) in shaders::list_shaders(&data)? {
                println!("{}: {}", number, name);
            }
        }
        Commands::RenameShader {
            input,
            output,
            number,
            name,
        } => {
            let start = Utc::now();
            let data = fs::read(input)?;
            let out = shaders::rename_shader(&data, number, &name)?;
            fs::write(output, out)?;
            let elapsed = Utc::now().signed_duration_since(start);
            println!("done in {} ms", elapsed.num_milliseconds());
        }
    }
    Ok(())
}
