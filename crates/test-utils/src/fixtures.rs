//! Fake checker and helper scripts, written once per test binary.
//!
//! Every test that spawns one of these must call [`fixtures`] first: the
//! executables are fully written and closed before any test in the binary
//! can spawn a process, which avoids `ETXTBSY` races.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

/// Mimics `php -l`: files whose name contains `broken` fail with a parse
/// error (exit 255), everything else passes.
const FAKE_CHECKER: &str = r#"#!/bin/sh
for target; do :; done
case "$target" in
  *broken*)
    printf '\nParse error: syntax error, unexpected end of file in %s on line 3\nErrors parsing %s\n' "$target" "$target"
    exit 255
    ;;
esac
printf 'No syntax errors detected in %s\n' "$target"
"#;

/// Prints each argument on its own line.
const ECHO_ARGS: &str = r#"#!/bin/sh
printf '%s\n' "$@"
"#;

/// Batch helper: files whose name contains `skip` are skipped.
const SKIP_BY_NAME: &str = r#"for f; do
  case "$f" in
    *skip*) printf '%s;1\n' "$f" ;;
    *) printf '%s;0\n' "$f" ;;
  esac
done
"#;

/// Batch helper that splits a record across two writes.
const SPLIT_RECORDS: &str = r#"printf 'a.php;1\nb.php;'
sleep 0.3
printf '0\n'
"#;

/// Batch helper that decides one file, then stalls before the next.
const SLOW_RECORDS: &str = r#"printf 'first.php;1\n'
sleep 2
printf 'second.php;0\n'
"#;

/// Batch helper whose last record has no trailing newline.
const UNTERMINATED: &str = r#"printf 'a.php;0\nb.php;1'
"#;

/// Batch helper that splits `é.php;1` inside the two-byte `é`.
const SPLIT_UTF8: &str = r#"printf '\303'
sleep 0.5
printf '\251.php;1\n'
"#;

pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn fake_checker(&self) -> PathBuf {
        self.dir().join("fake-php")
    }

    pub fn echo_args(&self) -> PathBuf {
        self.dir().join("echo-args")
    }

    /// Shell used as the "executable" for batch helper scripts.
    pub fn shell(&self) -> PathBuf {
        PathBuf::from("sh")
    }

    pub fn skip_by_name_helper(&self) -> PathBuf {
        self.dir().join("skip-by-name.sh")
    }

    pub fn split_records_helper(&self) -> PathBuf {
        self.dir().join("split-records.sh")
    }

    pub fn slow_records_helper(&self) -> PathBuf {
        self.dir().join("slow-records.sh")
    }

    pub fn unterminated_helper(&self) -> PathBuf {
        self.dir().join("unterminated.sh")
    }

    pub fn split_utf8_helper(&self) -> PathBuf {
        self.dir().join("split-utf8.sh")
    }
}

static FIXTURES: OnceLock<Fixtures> = OnceLock::new();

pub fn fixtures() -> &'static Fixtures {
    FIXTURES.get_or_init(|| {
        let dir = tempfile::tempdir().expect("create fixture dir");

        write_executable(&dir.path().join("fake-php"), FAKE_CHECKER);
        write_executable(&dir.path().join("echo-args"), ECHO_ARGS);

        for (name, body) in [
            ("skip-by-name.sh", SKIP_BY_NAME),
            ("split-records.sh", SPLIT_RECORDS),
            ("slow-records.sh", SLOW_RECORDS),
            ("unterminated.sh", UNTERMINATED),
            ("split-utf8.sh", SPLIT_UTF8),
        ] {
            fs::write(dir.path().join(name), body).expect("write helper script");
        }

        Fixtures { dir }
    })
}

fn write_executable(path: &Path, body: &str) {
    fs::write(path, body).expect("write fixture script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("make fixture script executable");
    }
}
