//! Layout checks for the mirrored unit test tree
//!
//! Every source file other than the crate roots and `mod.rs` files has a unit
//! test file at the same relative path under `tests/unit`, each of those files
//! is declared by its parent module and holds at least one test.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SOURCE_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    /// Relative paths of every `.rs` file below `root`
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut files = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path.strip_prefix(root).map_err(io::Error::other)?;
                    files.insert(relative.to_path_buf());
                }
            }
        }

        Ok(files)
    }

    fn file_name(path: &Path) -> &str {
        path.file_name().and_then(|name| name.to_str()).unwrap_or_default()
    }

    // lib.rs and main.rs at the top, mod.rs anywhere
    fn is_module_root(path: &Path) -> bool {
        let name = file_name(path);
        name == "mod.rs"
            || (path.parent() == Some(Path::new("")) && (name == "lib.rs" || name == "main.rs"))
    }

    fn mirrored(root: &str) -> BTreeSet<PathBuf> {
        rust_files(Path::new(root))
            .unwrap_or_else(|error| panic!("failed to scan {root}: {error}"))
            .into_iter()
            .filter(|path| !is_module_root(path))
            .collect()
    }

    fn listing(paths: &[&PathBuf]) -> String {
        paths
            .iter()
            .map(|path| format!("  - {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source file has a unit test file at the same path
    // Verified by deleting tests/unit/algorithm/smoothing.rs
    #[test]
    fn test_every_source_file_has_unit_tests() {
        let sources = mirrored(SOURCE_ROOT);
        let units = mirrored(UNIT_ROOT);
        let missing: Vec<_> = sources.difference(&units).collect();

        assert!(
            missing.is_empty(),
            "Source files without tests under {UNIT_ROOT}:\n{}",
            listing(&missing)
        );
    }

    // Tests no unit test file outlives its source file
    // Verified by adding tests/unit/spatial/extension.rs
    #[test]
    fn test_every_unit_file_has_source() {
        let sources = mirrored(SOURCE_ROOT);
        let units = mirrored(UNIT_ROOT);
        let orphaned: Vec<_> = units.difference(&sources).collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a file under {SOURCE_ROOT}:\n{}",
            listing(&orphaned)
        );
    }

    // Tests each unit file and directory is declared up to tests/unit/main.rs
    // Verified by removing `pub mod tileset;` from tests/unit/io/mod.rs
    #[test]
    fn test_unit_modules_are_declared() {
        let root = Path::new(UNIT_ROOT);
        let mut undeclared = Vec::new();

        for path in mirrored(UNIT_ROOT) {
            let mut module = path.with_extension("");
            while let Some(parent) = module.parent() {
                let declaring = if parent.as_os_str().is_empty() {
                    root.join("main.rs")
                } else {
                    root.join(parent).join("mod.rs")
                };
                let declaration = format!("mod {};", file_name(&module));
                let contents = fs::read_to_string(&declaring).unwrap_or_default();
                if !contents.lines().any(|line| line.trim().ends_with(&declaration)) {
                    undeclared.push(format!("  - `{declaration}` in {}", declaring.display()));
                }
                module = parent.to_path_buf();
            }
        }

        undeclared.sort();
        undeclared.dedup();
        assert!(
            undeclared.is_empty(),
            "Unit test modules missing from their parent:\n{}",
            undeclared.join("\n")
        );
    }

    // Tests every test file holds at least one test
    // Verified by emptying the tests module of tests/unit/io/configuration.rs
    #[test]
    fn test_every_test_file_contains_tests() {
        let mut candidates: Vec<PathBuf> = mirrored(UNIT_ROOT)
            .into_iter()
            .map(|path| Path::new(UNIT_ROOT).join(path))
            .collect();
        candidates.extend(
            rust_files(Path::new("tests"))
                .unwrap_or_default()
                .into_iter()
                .filter(|path| path.parent() == Some(Path::new("")))
                .map(|path| Path::new("tests").join(path)),
        );

        let empty: Vec<_> = candidates
            .iter()
            .filter(|path| {
                !fs::read_to_string(path).is_ok_and(|contents| contents.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            listing(&empty)
        );
    }

    // Tests both test crate roots exist and document themselves
    // Verified by removing the crate doc from tests/unit/main.rs
    #[test]
    fn test_test_crate_roots_present() {
        for root in ["tests/unit/main.rs", "tests/meta/main.rs"] {
            let contents = fs::read_to_string(root)
                .unwrap_or_else(|error| panic!("missing test crate root {root}: {error}"));
            assert!(contents.starts_with("//!"), "{root} has no crate doc");
        }
    }
}
