//! Implementation of `quarry init`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use quarry_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};
use tracing::debug;

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{TomlHighlighter, error, indent, subheader},
};

/// Where `init` writes and which template it uses.
#[derive(Debug, PartialEq, Eq)]
struct Target {
    /// File to create.
    path: PathBuf,
    /// Whether this is the per-user file.
    global: bool,
}

impl Target {
    /// Picks the file to write. Running in the home directory means the global file.
    fn resolve(cwd: &Path, want_global: bool, global_path: Option<PathBuf>) -> Option<Self> {
        let in_home = global_path
            .as_deref()
            .and_then(Path::parent)
            .is_some_and(|home| home == cwd);

        if want_global || in_home {
            return global_path.map(|path| Self { path, global: true });
        }
        Some(Self {
            path: cwd.join(CONFIG_FILENAME),
            global: false,
        })
    }

    /// Template text for this target.
    fn template(&self) -> String {
        if self.global {
            global_template()
        } else {
            local_template()
        }
    }
}

/// Writes a commented `.quarry.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let global_path = global_config_path();
    let home_error = global_path.as_ref().err().map(ToString::to_string);

    let Some(target) = Target::resolve(&ctx.cwd, cmd.global, global_path.ok()) else {
        let reason = home_error.unwrap_or_default();
        eprintln!("{}: {reason}", error("error"));
        return ExitCode::FAILURE;
    };

    if target.path.exists() && !cmd.force {
        eprintln!(
            "{}: {} already exists",
            error("error"),
            target.path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = target.template();
    debug!(path = %target.path.display(), global = target.global, "writing config template");
    if let Err(e) = fs::write(&target.path, &template) {
        eprintln!(
            "{}: could not write {}: {e}",
            error("error"),
            target.path.display()
        );
        return ExitCode::FAILURE;
    }

    println!("Created {}", target.path.display());
    println!();
    println!("{}", subheader("Template:"));
    print!("{}", indent(&TomlHighlighter::new().highlight(&template)));
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_file() -> Option<PathBuf> {
        Some(PathBuf::from("/home/me").join(CONFIG_FILENAME))
    }

    #[test]
    fn project_directory_gets_local_file() {
        let target = Target::resolve(Path::new("/home/me/repo"), false, home_file()).unwrap();
        assert_eq!(target.path, Path::new("/home/me/repo/.quarry.toml"));
        assert!(!target.global);
    }

    #[test]
    fn home_directory_gets_global_file() {
        let target = Target::resolve(Path::new("/home/me"), false, home_file()).unwrap();
        assert_eq!(target.path, home_file().unwrap());
        assert!(target.global);
        assert!(target.template().contains("global configuration"));
    }

    #[test]
    fn global_without_home_is_unresolved() {
        assert_eq!(Target::resolve(Path::new("/srv"), true, None), None);
        assert!(Target::resolve(Path::new("/srv"), false, None).is_some());
    }
}
