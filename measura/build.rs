use anyhow::{Context, Result};
use measura_codegen::{Generator, Schema};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA_FILE: &str = "quantities.toml";

fn main() -> Result<()> {
    let crate_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").context("CARGO_MANIFEST_DIR not set")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR").context("OUT_DIR not set")?);

    // Re-run if the schema changes
    println!("cargo:rerun-if-changed={}", SCHEMA_FILE);

    let schema = Schema::from_file(crate_dir.join(SCHEMA_FILE))
        .with_context(|| format!("Failed to load {}", SCHEMA_FILE))?;

    let generated = Generator::new().generate(&schema);
    for failure in &generated.failures {
        println!(
            "cargo:warning=Skipping quantity {} from {}: {}",
            failure.quantity(),
            SCHEMA_FILE,
            failure
        );
    }

    write_generated(&out_dir.join("quantities.rs"), &generated.types)?;
    write_generated(&out_dir.join("quantity_tests.rs"), &generated.tests)?;

    Ok(())
}

fn write_generated(path: &Path, code: &str) -> Result<()> {
    let mut content = format!(
        "// @generated by measura-codegen from {}. Do not edit.\n\n",
        SCHEMA_FILE
    );
    content.push_str(code);
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
