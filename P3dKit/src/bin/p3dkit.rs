//! `P3dKit` command-line entry point

fn main() -> anyhow::Result<()> {
    p3dkit::cli::run_cli()
}
