//! `pfs-palettes`: command-line front end for the palette store.
//!
//! Palettes are kept in the platform data directory (override with
//! `PFS_PALETTES_DIR`) and every change is written back immediately.

/// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

// The web build embeds the library directly and has no command line.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use thiserror::Error;

    use pfs_palettes::color::{ColorError, SortMode, normalize};
    use pfs_palettes::config::AppConfig;
    use pfs_palettes::format::{FormatError, FormatRegistry, WarningSeverity};
    use pfs_palettes::model::{PaletteColor, PaletteId};
    use pfs_palettes::store::{FileStore, PaletteRepository, PersistOnChange, load_collection};

    const USAGE: &str = "\
Usage: pfs-palettes <command> [args]

Commands:
  list                     List palettes (> marks the selection)
  show [hue|brightness]    Show the selected palette's colors
  new <name>               Create an empty palette and select it
  select <name>            Select a palette by name
  rename <name>            Rename the selected palette
  delete                   Delete the selected palette
  add <text...>            Add every hex color found in the text
  remove <hex>             Remove a color from the selected palette
  sample [count]           New palette from a perceptual sample
  tint <value>             New tinted (>0) or shaded (<0) copy, value in [-1, 1]
  scale <hex> <value>      New palette from one color's tint/shade scale
  star <hex>               Star or unstar a color
  favorite                 Toggle the selected palette's favorite flag
  builtins                 Import the built-in palettes
  import <file>            Import a .json payload or .clr color list
  export <file>            Export all palettes (.json) or the selection (.clr)
  formats                  List the import/export formats";

    /// Errors reported to the user.
    #[derive(Error, Debug)]
    enum CliError {
        #[error("{0}")]
        Usage(String),

        #[error("Unknown command '{0}'")]
        UnknownCommand(String),

        #[error("Invalid {what}: '{value}'")]
        InvalidArgument { what: &'static str, value: String },

        #[error("No palette named '{0}'")]
        NoSuchPalette(String),

        #[error("The selected palette has no color {0}")]
        NoSuchColor(String),

        #[error("Could not determine a data directory; set PFS_PALETTES_DIR")]
        NoStorageDir,

        #[error("{path}: {source}")]
        Io {
            path: PathBuf,
            source: std::io::Error,
        },

        #[error(transparent)]
        Color(#[from] ColorError),

        #[error(transparent)]
        Format(#[from] FormatError),
    }

    pub fn run() -> ExitCode {
        let config = AppConfig::load_or_default();
        env_logger::Builder::new()
            .filter_level(config.preferences.log_level.to_level_filter())
            .parse_default_env()
            .init();

        let args: Vec<String> = std::env::args().skip(1).collect();
        match execute(&config, &args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {}", e);
                if matches!(e, CliError::Usage(_) | CliError::UnknownCommand(_)) {
                    eprintln!("\n{}", USAGE);
                }
                ExitCode::FAILURE
            }
        }
    }

    fn storage_dir() -> Result<PathBuf, CliError> {
        std::env::var_os("PFS_PALETTES_DIR")
            .map(PathBuf::from)
            .or_else(FileStore::default_dir)
            .ok_or(CliError::NoStorageDir)
    }

    fn open_repository() -> Result<PaletteRepository, CliError> {
        let store = FileStore::new(storage_dir()?);
        log::debug!("Using palette store at {:?}", store.dir());

        let mut repo = PaletteRepository::new(load_collection(&store));
        repo.subscribe(PersistOnChange::new(store));
        Ok(repo)
    }

    fn execute(config: &AppConfig, args: &[String]) -> Result<(), CliError> {
        let Some((command, rest)) = args.split_first() else {
            return Err(CliError::Usage("Missing command".to_string()));
        };
        if matches!(command.as_str(), "help" | "-h" | "--help") {
            println!("{}", USAGE);
            return Ok(());
        }
        if command == "formats" {
            list_formats(&FormatRegistry::new());
            return Ok(());
        }

        let prefs = &config.preferences;
        let mut repo = open_repository()?;

        match command.as_str() {
            "list" => list(&repo),
            "show" => {
                let mode = match rest.first() {
                    Some(name) => {
                        SortMode::from_name(name).ok_or_else(|| invalid("sort mode", name))?
                    }
                    None => prefs.sort_mode,
                };
                show(&repo, mode);
            }
            "new" => {
                let id = repo.add_palette(&rest.join(" "), Vec::new());
                println!("Created '{}'", name_of(&repo, id));
            }
            "select" => {
                let name = joined(rest, "palette name")?;
                let id = repo
                    .collection()
                    .find_by_name(&name)
                    .map(|p| p.id)
                    .ok_or(CliError::NoSuchPalette(name))?;
                repo.select_palette(id);
                println!("Selected '{}'", name_of(&repo, id));
            }
            "rename" => {
                let name = joined(rest, "new name")?;
                let id = repo.selected_id();
                if repo.rename_selected(&name) {
                    println!("Renamed to '{}'", name_of(&repo, id));
                } else {
                    println!("Palette '{}' was not renamed", name_of(&repo, id));
                }
            }
            "delete" => {
                let name = name_of(&repo, repo.selected_id());
                if repo.delete_selected() {
                    println!("Deleted '{}'", name);
                } else {
                    println!("'{}' cannot be deleted", name);
                }
            }
            "add" => {
                let added = repo.add_colors_from_text(&rest.join(" "));
                println!("Added {} color(s)", added);
            }
            "remove" => {
                let color = selected_color(&repo, arg(rest, 0, "hex color")?)?;
                repo.remove_color(color.id);
                println!("Removed {}", color.hex);
            }
            "sample" => {
                let count = match rest.first() {
                    Some(raw) => raw.parse().map_err(|_| invalid("count", raw))?,
                    None => prefs.sample_count,
                };
                match repo.sample_and_create(count) {
                    Some(id) => println!("Created '{}'", name_of(&repo, id)),
                    None => println!("The selected palette has no colors to sample"),
                }
            }
            "tint" => {
                let value = parse_value(arg(rest, 0, "value")?)?;
                match repo.create_tint_shade_palette(value) {
                    Some(id) => println!("Created '{}'", name_of(&repo, id)),
                    None => println!("The selected palette has no colors"),
                }
            }
            "scale" => {
                let color = selected_color(&repo, arg(rest, 0, "hex color")?)?;
                let value = parse_value(arg(rest, 1, "value")?)?;
                let steps = prefs.tint_shade_steps();
                if let Some(id) = repo.create_scale_palette(color.id, value, steps) {
                    println!("Created '{}'", name_of(&repo, id));
                }
            }
            "star" => {
                let raw = arg(rest, 0, "hex color")?;
                match repo.toggle_star_color(raw) {
                    Some(true) => println!("Starred {}", normalize(raw)?),
                    Some(false) => println!("Unstarred {}", normalize(raw)?),
                    None => return Err(invalid("hex color", raw)),
                }
            }
            "favorite" => {
                let id = repo.selected_id();
                repo.toggle_favorite(id);
                let favorite = repo.palette(id).is_some_and(|p| p.is_favorite);
                println!(
                    "'{}' is {}a favorite",
                    name_of(&repo, id),
                    if favorite { "" } else { "no longer " }
                );
            }
            "builtins" => {
                let count = repo.add_builtin_palettes();
                println!("Added {} built-in palettes", count);
            }
            "import" => {
                let path = Path::new(arg(rest, 0, "file")?);
                let bytes = std::fs::read(path).map_err(|source| CliError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let summary = repo.import_bytes(&file_name(path), &bytes)?;
                println!("{}", summary);
            }
            "export" => {
                let path = Path::new(arg(rest, 0, "file")?);
                let (bytes, result) = repo.export_bytes(&file_name(path))?;
                std::fs::write(path, bytes).map_err(|source| CliError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                for warning in &result.warnings {
                    let label = match warning.severity {
                        WarningSeverity::Info => "note",
                        WarningSeverity::Warning => "warning",
                    };
                    eprintln!("{}: {}", label, warning.message);
                }
                println!(
                    "Exported {} palette(s), {} color(s) to {}",
                    result.palettes_exported,
                    result.colors_exported,
                    path.display()
                );
            }
            other => return Err(CliError::UnknownCommand(other.to_string())),
        }
        Ok(())
    }

    fn list(repo: &PaletteRepository) {
        for palette in repo.palettes() {
            let marker = if palette.id == repo.selected_id() { ">" } else { " " };
            let swatch = palette
                .representative_color()
                .map(|c| c.hex.to_string())
                .unwrap_or_else(|| "-------".to_string());
            println!(
                "{} {} {}{} ({} colors){}",
                marker,
                swatch,
                palette.name,
                if palette.is_favorite { " *" } else { "" },
                palette.colors.len(),
                if palette.is_system_managed { " [system]" } else { "" }
            );
        }
    }

    fn list_formats(registry: &FormatRegistry) {
        for format in registry.ids().into_iter().filter_map(|id| registry.get(id)) {
            let extensions: Vec<String> =
                format.extensions().iter().map(|e| format!(".{}", e)).collect();
            println!(
                "{:<6} {} [{}]{}",
                format.id(),
                format.display_name(),
                extensions.join(", "),
                if format.supports_multiple() { "" } else { " (selected palette only)" }
            );
        }
    }

    fn show(repo: &PaletteRepository, mode: SortMode) {
        let Some(palette) = repo.selected_palette() else {
            return;
        };
        println!("{} (by {})", palette.name, mode.label().to_lowercase());
        for color in repo.sorted_colors(mode) {
            let star = if repo.is_color_starred(color.hex.as_str()) { "*" } else { " " };
            println!("{} {}", star, color.tooltip_text());
        }
    }

    fn name_of(repo: &PaletteRepository, id: PaletteId) -> String {
        repo.palette(id).map(|p| p.name.clone()).unwrap_or_default()
    }

    fn selected_color(repo: &PaletteRepository, raw: &str) -> Result<PaletteColor, CliError> {
        let hex = normalize(raw)?;
        repo.selected_palette()
            .and_then(|p| p.colors.iter().find(|c| c.hex == hex))
            .cloned()
            .ok_or_else(|| CliError::NoSuchColor(hex.to_string()))
    }

    fn arg<'a>(args: &'a [String], index: usize, what: &'static str) -> Result<&'a str, CliError> {
        args.get(index)
            .map(String::as_str)
            .ok_or_else(|| CliError::Usage(format!("Missing {}", what)))
    }

    fn joined(args: &[String], what: &'static str) -> Result<String, CliError> {
        let text = args.join(" ");
        if text.trim().is_empty() {
            return Err(CliError::Usage(format!("Missing {}", what)));
        }
        Ok(text)
    }

    fn parse_value(raw: &str) -> Result<f64, CliError> {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid("value", raw))
    }

    fn invalid(what: &'static str, value: &str) -> CliError {
        CliError::InvalidArgument {
            what,
            value: value.to_string(),
        }
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
