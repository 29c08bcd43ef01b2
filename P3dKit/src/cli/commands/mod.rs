use clap::Subcommand;
use std::path::PathBuf;

pub mod inspect;
pub mod skeleton;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the chunk tree of a P3D file
    Inspect {
        /// P3D file to inspect
        path: PathBuf,

        /// Only descend this many levels below the root
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Decode skeletons and print their joint hierarchies
    Skeleton {
        /// P3D file to decode
        path: PathBuf,

        /// Decode top-level chunks in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Decode skeletons and write them to a JSON file
    ExportJson {
        /// P3D file to decode
        path: PathBuf,

        /// Output JSON file
        output: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect { path, max_depth } => inspect::execute(path, *max_depth),
            Commands::Skeleton { path, parallel } => skeleton::print(path, *parallel),
            Commands::ExportJson { path, output } => skeleton::export_json(path, output),
        }
    }
}
