//! Syntax-checking generated C with the system compiler

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the C compiler in syntax-only mode over each unit.
///
/// The native message headers must be reachable through `include_dirs`.
pub fn verify_c_units(units: &[PathBuf], include_dirs: &[PathBuf]) -> Result<()> {
    println!("Verifying generated C with C compiler...");

    setup_cc_env();

    let compiler = cc::Build::new()
        .cargo_metadata(false)
        .opt_level(0)
        .try_get_compiler()
        .with_context(|| "Failed to find C compiler. Install gcc, clang, or MSVC.")?;
    tracing::debug!(compiler = %compiler.path().display(), "using C compiler");

    for unit in units {
        let mut cmd = Command::new(compiler.path());
        if compiler.is_like_msvc() {
            cmd.arg("/Zs");
            for dir in include_dirs {
                cmd.arg(format!("/I{}", dir.display()));
            }
        } else {
            cmd.arg("-fsyntax-only");
            for dir in include_dirs {
                cmd.arg("-I").arg(dir);
            }
        }
        cmd.arg(unit);

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute compiler: {}", compiler.path().display()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("C verification failed for {}:\n{}", unit.display(), stderr);
        }
        println!("✓ {}", display_name(unit));
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Set the environment the `cc` crate expects outside a build script.
fn setup_cc_env() {
    let target = current_target();
    // SAFETY: called from the single-threaded CLI before any other thread starts.
    unsafe {
        for (key, value) in [
            ("TARGET", target.as_str()),
            ("HOST", target.as_str()),
            ("OPT_LEVEL", "0"),
            ("DEBUG", "false"),
        ] {
            if std::env::var_os(key).is_none() {
                std::env::set_var(key, value);
            }
        }
    }
}

fn current_target() -> String {
    match (std::env::consts::ARCH, std::env::consts::OS) {
        ("x86_64", "linux") => "x86_64-unknown-linux-gnu".to_string(),
        ("aarch64", "linux") => "aarch64-unknown-linux-gnu".to_string(),
        ("x86_64", "macos") => "x86_64-apple-darwin".to_string(),
        ("aarch64", "macos") => "aarch64-apple-darwin".to_string(),
        ("x86_64", "windows") => "x86_64-pc-windows-msvc".to_string(),
        ("aarch64", "windows") => "aarch64-pc-windows-msvc".to_string(),
        (arch, os) => format!("{arch}-unknown-{os}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn current_target___has_three_parts() {
        assert!(current_target().split('-').count() >= 3);
    }

    #[test]
    fn display_name___uses_file_name() {
        assert_eq!(display_name(Path::new("out/c/add.c")), "add.c");
    }
}
