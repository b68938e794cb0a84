//! Helpers to run the solver binary in integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The exit status and standard output of one run of the solver.
#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) success: bool,
    pub(crate) stdout: String,
}

impl Run {
    /// The solutions printed by the solver, each as the list of its output lines.
    pub(crate) fn solutions(&self) -> Vec<Vec<String>> {
        self.stdout
            .split("----------\n")
            .filter(|block| block.contains(" = "))
            .map(|block| {
                block
                    .lines()
                    .filter(|line| !line.starts_with('%'))
                    .map(str::to_owned)
                    .collect()
            })
            .collect()
    }

    /// The values of the scalar output `name` in every solution.
    pub(crate) fn values_of(&self, name: &str) -> Vec<i32> {
        let pattern = Regex::new(&format!(r"(?m)^{name} = (-?\d+);$")).expect("valid regex");
        pattern
            .captures_iter(&self.stdout)
            .map(|captures| captures[1].parse().expect("an integer"))
            .collect()
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.stdout.lines().any(|line| line == "==========")
    }

    pub(crate) fn is_unsatisfiable(&self) -> bool {
        self.stdout
            .lines()
            .any(|line| line == "=====UNSATISFIABLE=====")
    }

    pub(crate) fn is_unknown(&self) -> bool {
        self.stdout.lines().any(|line| line == "=====UNKNOWN=====")
    }
}

pub(crate) fn run_solver<'a>(args: impl IntoIterator<Item = &'a str>) -> Run {
    let solver = PathBuf::from(env!("CARGO_BIN_EXE_marrow-solver"));

    let mut child = Command::new(solver)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let output = child.wait_with_output().expect("Failed to read solver output.");
    Run {
        success: status.success(),
        stdout: String::from_utf8(output.stdout).expect("utf-8 output"),
    }
}
