//! Default policy lists and serde default functions.

use std::path::PathBuf;

/// Substrings that deny a command outright (matched case-insensitively
/// against the whole command line).
pub const DEFAULT_BLOCKED_PATTERNS: &[&str] = &[
    "sudo ",
    "su ",
    "rm -rf",
    "rm -fr",
    "rm -r /",
    "rm -r ~",
    "rm -R",
    "dd if=",
    "mkfs",
    ":(){ :|:& };:",
    "chmod -R 777",
    "chown -R",
    "> /dev/sd",
    "> /dev/hd",
    "mv /* ",
    "wget ",
    "curl ",
    "nc -l",
    "ncat ",
    "shutdown",
    "reboot",
    "init 0",
    "init 6",
    "halt",
    "poweroff",
    "systemctl stop",
    "service stop",
    "kill -9 -1",
    "killall",
    "pkill -9",
    "iptables",
    "ufw disable",
    "crontab -r",
    "userdel",
    "usermod",
    "passwd",
    "visudo",
];

/// Binary basenames permitted when the allow-list is enforced.
pub const DEFAULT_ALLOWED_COMMANDS: &[&str] = &[
    // file inspection
    "ls", "cat", "head", "tail", "grep", "find", "pwd", "echo", "wc", "sort", "uniq", "cut",
    "awk", "sed", "tr", "diff", "touch", "mkdir", "cp", "mv", "rm", "date", "which", "env",
    "printenv", "type", "uname", "whoami", "id",
    // vcs
    "git",
    // runtimes and build tools
    "python", "python3", "pip", "pip3", "npm", "node", "yarn", "cargo", "rustc", "go", "make",
    "cmake", "gcc", "g++", "clang",
    // test, lint, format
    "pytest", "jest", "mypy", "ruff", "black", "isort", "prettier", "eslint", "tsc",
    // packaging
    "uv", "poetry", "hatch",
    // modern cli tools
    "rg", "fd", "bat", "exa", "tree", "jq", "yq", "http", "curlie",
    // shell utilities
    "sleep", "true", "false", "test", "[", "xargs", "parallel",
];

/// Absolute roots under which recursive `rm` is not considered destructive.
pub const DEFAULT_SCRATCH_DIRECTORIES: &[&str] = &["/tmp"];

// Default value functions for serde
pub(crate) fn default_blocked_patterns() -> Vec<String> {
    DEFAULT_BLOCKED_PATTERNS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
pub(crate) fn default_allowed_commands() -> Vec<String> {
    DEFAULT_ALLOWED_COMMANDS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
pub(crate) fn default_scratch_directories() -> Vec<PathBuf> {
    DEFAULT_SCRATCH_DIRECTORIES
        .iter()
        .map(PathBuf::from)
        .collect()
}
pub(crate) fn default_max_timeout() -> u64 {
    300
}
pub(crate) fn default_max_output_size() -> usize {
    100_000
}
pub(crate) fn default_true() -> bool {
    true
}
