use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use vergen::{BuildBuilder, CargoBuilder, Emitter, RustcBuilder};

/// Profiles shipped next to the binary, keyed by cargo profile
const DEBUG_PROFILES: &[&str] = &["debug", "release"];
const RELEASE_PROFILES: &[&str] = &["release"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_timestamp(true).build()?;

    let cargo = CargoBuilder::default()
        .opt_level(true)
        .target_triple(true)
        .build()?;

    let rustc = RustcBuilder::default().semver(true).channel(true).build()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&rustc)?
        .emit()?;

    copy_configs()?;

    Ok(())
}

/// Resolves `target/<profile>` from OUT_DIR (`target/<profile>/build/<pkg>-<hash>/out`)
fn target_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    out_dir
        .ancestors()
        .nth(3)
        .map(Path::to_path_buf)
        .ok_or_else(|| "Could not determine target directory".into())
}

fn copy_configs() -> Result<(), Box<dyn std::error::Error>> {
    let profiles = if env::var("PROFILE")? == "release" {
        RELEASE_PROFILES
    } else {
        DEBUG_PROFILES
    };

    let config_out_dir = target_dir()?.join("config");
    fs::create_dir_all(&config_out_dir)?;

    for profile in profiles {
        let file_name = format!("{profile}.toml");
        let source = Path::new("config").join(&file_name);
        println!("cargo:rerun-if-changed={}", source.display());
        if source.exists() {
            fs::copy(&source, config_out_dir.join(&file_name))?;
        }
    }

    Ok(())
}
