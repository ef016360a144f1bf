#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    /// Write `(file name, contents)` pairs into `dir`.
    pub fn write_files(dir: &Path, files: &[(&str, &str)]) {
        for (name, contents) in files {
            fs::write(dir.join(name), contents).unwrap();
        }
    }

    /// Two config directories laid out like a packaged install: a defaults
    /// directory read first and an operator directory read last.
    pub struct ConfTree {
        defaults: TempDir,
        overrides: TempDir,
    }

    impl ConfTree {
        pub fn new(defaults: &[(&str, &str)], overrides: &[(&str, &str)]) -> Self {
            let tree = Self {
                defaults: TempDir::new().unwrap(),
                overrides: TempDir::new().unwrap(),
            };
            write_files(tree.defaults(), defaults);
            write_files(tree.overrides(), overrides);
            tree
        }

        pub fn defaults(&self) -> &Path {
            self.defaults.path()
        }

        pub fn overrides(&self) -> &Path {
            self.overrides.path()
        }
    }

    #[test]
    fn conf_tree_writes_both_directories() {
        let tree = ConfTree::new(&[("rhn.conf", "a=1\n")], &[("rhn_web.conf", "b=2\n")]);
        assert_eq!(
            fs::read_to_string(tree.defaults().join("rhn.conf")).unwrap(),
            "a=1\n"
        );
        assert!(tree.overrides().join("rhn_web.conf").is_file());
        assert_ne!(tree.defaults(), tree.overrides());
    }
}
