pub mod check;
pub mod play;

use wl_data::diagnostics::render_diagnostics;
use wl_data::{DataFile, LoadResult};
use wl_fiction::GameConfig;

/// Load the configured data directory and print its diagnostics.
fn load(config: &GameConfig) -> LoadResult {
    tracing::debug!(dir = %config.data_dir.display(), strict = config.strict, "loading data");
    let result = wl_data::load_dir(&config.data_dir, &config.load_options());
    print_diagnostics(&result);
    result
}

/// Print diagnostics to stderr, one ariadne report per data file.
fn print_diagnostics(result: &LoadResult) {
    if result.diagnostics.is_empty() {
        return;
    }

    for file in DataFile::ALL {
        let diagnostics = result.diagnostics_for(file.file_name());
        if diagnostics.is_empty() {
            continue;
        }
        match result.sources.get(file) {
            Some(source) => {
                eprint!("{}", render_diagnostics(source, file.file_name(), &diagnostics));
            }
            None => {
                for diag in &diagnostics {
                    eprintln!("  {diag}");
                }
            }
        }
    }

    // Not tied to a data file, e.g. the directory itself
    for diag in result
        .diagnostics
        .iter()
        .filter(|d| DataFile::ALL.iter().all(|f| f.file_name() != d.file))
    {
        eprintln!("  {diag}");
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}
