//! Checks that the unit test tree mirrors `src/` and the manifest is publishable

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    /// Crate roots and module files carry no logic of their own
    fn is_structural(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    /// Relative paths of every `.rs` file below `root`
    fn rust_files(root: &Path) -> io::Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path
                        .strip_prefix(root)
                        .map_err(io::Error::other)?
                        .to_string_lossy()
                        .replace('\\', "/");
                    found.insert(relative);
                }
            }
        }

        Ok(found)
    }

    // Tests every source module has a unit test file and vice versa
    // Verified by deleting tests/unit/io/progress.rs
    #[test]
    fn test_unit_tests_mirror_sources() {
        let sources = rust_files(Path::new("src")).expect("read src");
        let units = rust_files(Path::new("tests/unit")).expect("read tests/unit");

        let untested: Vec<_> = sources
            .iter()
            .filter(|path| !is_structural(path) && !units.contains(*path))
            .collect();
        let orphaned: Vec<_> = units
            .iter()
            .filter(|path| !is_structural(path) && !sources.contains(*path))
            .collect();

        assert!(untested.is_empty(), "src files without unit tests: {untested:?}");
        assert!(orphaned.is_empty(), "unit tests without src files: {orphaned:?}");
    }

    // Tests each unit test directory is wired into the test crate
    #[test]
    fn test_unit_modules_are_declared() {
        let root = fs::read_to_string("tests/unit/main.rs").expect("read tests/unit/main.rs");

        for module in ["algorithm", "analysis", "io"] {
            assert!(root.contains(&format!("mod {module};")), "{module} not declared");

            let declarations = fs::read_to_string(format!("tests/unit/{module}/mod.rs"))
                .expect("read module file");
            let files = rust_files(&Path::new("tests/unit").join(module)).expect("read module");
            for file in files.iter().filter(|file| !is_structural(file)) {
                let name = file.trim_end_matches(".rs");
                assert!(
                    declarations.contains(&format!("pub mod {name};")),
                    "tests/unit/{module}/{file} is never compiled"
                );
            }
        }
    }

    // Tests every non-structural test file contains at least one test
    #[test]
    fn test_all_test_files_contain_tests() {
        let files = rust_files(Path::new("tests")).expect("read tests");
        let empty: Vec<_> = files
            .iter()
            .filter(|file| !matches!(file.rsplit('/').next(), Some("main.rs" | "mod.rs")))
            .filter(|file| {
                fs::read_to_string(Path::new("tests").join(file))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .collect();

        assert!(empty.is_empty(), "test files without tests: {empty:?}");
    }

    // Tests the manifest carries the metadata the cargo lint group requires
    // Verified by removing the repository key
    #[test]
    fn test_manifest_metadata() {
        let manifest = fs::read_to_string("Cargo.toml").expect("read Cargo.toml");
        let package = manifest
            .split("\n[")
            .next()
            .expect("package table comes first");

        for key in [
            "description",
            "license",
            "repository",
            "readme",
            "keywords",
            "categories",
        ] {
            assert!(
                package.lines().any(|line| line.starts_with(&format!("{key} ="))),
                "[package] is missing `{key}`"
            );
        }
        assert!(Path::new("README.md").exists());
    }
}
