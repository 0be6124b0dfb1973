//! The individual policy checks, in evaluation order.

use super::paths::{normalize, resolve_lenient};
use super::{ParsedCommand, Policy, PolicyRejection};
use std::path::{Path, PathBuf};

/// Long options that make `rm` recurse (or drop its root guard).
const RECURSIVE_RM_LONG_FLAGS: &[&str] = &["--recursive", "--no-preserve-root"];

/// Targets that are always protected from recursive removal.
const PROTECTED_PATHS: &[&str] = &["/", "~", "/home", "/etc", "/usr", "/var", "/root"];

/// Case-insensitive substring match of each blocked pattern against the
/// whole command line.
pub fn check_blocked_patterns(policy: &Policy, command: &str) -> Result<(), PolicyRejection> {
    let lowered = command.to_lowercase();
    match policy
        .blocked_patterns
        .iter()
        .find(|pattern| lowered.contains(&pattern.to_lowercase()))
    {
        Some(pattern) => Err(PolicyRejection::BlockedPattern {
            pattern: pattern.clone(),
        }),
        None => Ok(()),
    }
}

pub fn check_allowed_command(
    policy: &Policy,
    parsed: &ParsedCommand,
) -> Result<(), PolicyRejection> {
    if !policy.require_allowlist {
        return Ok(());
    }

    let name = parsed.binary_name();
    if policy.allowed_commands.iter().any(|allowed| allowed == name) {
        Ok(())
    } else {
        Err(PolicyRejection::NotAllowlisted {
            binary: name.to_string(),
        })
    }
}

/// The working directory must resolve inside one of the allowed directories.
pub fn check_directory(policy: &Policy, cwd: Option<&Path>) -> Result<(), PolicyRejection> {
    let cwd = match cwd {
        Some(cwd) if !policy.allowed_directories.is_empty() => cwd,
        _ => return Ok(()),
    };

    let resolved = resolve_lenient(cwd).map_err(|e| PolicyRejection::InvalidDirectory {
        reason: format!("'{}': {}", cwd.display(), e),
    })?;

    for allowed in &policy.allowed_directories {
        let root = resolve_lenient(allowed).map_err(|e| PolicyRejection::InvalidDirectory {
            reason: format!("allowed directory '{}': {}", allowed.display(), e),
        })?;
        if resolved.starts_with(&root) {
            return Ok(());
        }
    }

    Err(PolicyRejection::DirectoryNotAllowed {
        cwd: cwd.display().to_string(),
    })
}

/// Recursive `rm` is refused when any target is a protected location.
///
/// Only applies when the binary basename is exactly `rm`.
pub fn check_rm(policy: &Policy, parsed: &ParsedCommand) -> Result<(), PolicyRejection> {
    if parsed.binary_name() != "rm" {
        return Ok(());
    }

    let args = parsed.operands();
    let recursive = args.iter().any(|arg| is_recursive_flag(arg));
    if !recursive {
        return Ok(());
    }

    let protected_target = args
        .iter()
        .filter(|arg| !arg.starts_with('-'))
        .any(|arg| is_protected_target(arg, &policy.scratch_directories));

    if protected_target {
        Err(PolicyRejection::UnsafeRemoval)
    } else {
        Ok(())
    }
}

/// `-r`, `-R`, any short cluster containing them (`-rf`, `-vR`), or a
/// recursive long option.
fn is_recursive_flag(arg: &str) -> bool {
    if arg.starts_with("--") {
        return RECURSIVE_RM_LONG_FLAGS.contains(&arg);
    }
    match arg.strip_prefix('-') {
        Some(cluster) => cluster.contains(['r', 'R']),
        None => false,
    }
}

fn is_protected_target(arg: &str, scratch: &[PathBuf]) -> bool {
    if PROTECTED_PATHS.contains(&arg) {
        return true;
    }
    if !arg.starts_with('/') {
        return false;
    }

    // `..` is folded first so `/tmp/../etc` is judged as `/etc`.
    let path = normalize(Path::new(arg));
    if PROTECTED_PATHS.iter().any(|protected| path == Path::new(protected)) {
        return true;
    }
    !scratch
        .iter()
        .any(|root| path.starts_with(normalize(root)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::parse_command;

    fn policy() -> Policy {
        Policy::default()
    }

    fn rm(command: &str) -> Result<(), PolicyRejection> {
        check_rm(&policy(), &parse_command(command))
    }

    #[test]
    fn test_blocked_pattern_is_case_insensitive() {
        let policy = policy();
        let err = check_blocked_patterns(&policy, "SUDO apt-get install x").unwrap_err();
        assert_eq!(
            err,
            PolicyRejection::BlockedPattern {
                pattern: "sudo ".to_string()
            }
        );
    }

    #[test]
    fn test_blocked_pattern_matches_inside_pipelines() {
        let policy = policy();
        let err = check_blocked_patterns(&policy, "cat urls.txt | xargs curl -s").unwrap_err();
        assert_eq!(
            err,
            PolicyRejection::BlockedPattern {
                pattern: "curl ".to_string()
            }
        );
    }

    #[test]
    fn test_blocked_pattern_reports_first_configured_match() {
        let mut policy = policy();
        policy.blocked_patterns = vec!["beta".to_string(), "alpha".to_string()];
        let err = check_blocked_patterns(&policy, "alpha beta").unwrap_err();
        assert_eq!(
            err,
            PolicyRejection::BlockedPattern {
                pattern: "beta".to_string()
            }
        );
    }

    #[test]
    fn test_clean_command_passes_blocklist() {
        assert!(check_blocked_patterns(&policy(), "cargo test --all").is_ok());
    }

    #[test]
    fn test_allowlist_uses_basename() {
        let policy = policy();
        assert!(check_allowed_command(&policy, &parse_command("/usr/bin/git status")).is_ok());
        let err = check_allowed_command(&policy, &parse_command("/opt/nmap -sS")).unwrap_err();
        assert_eq!(
            err,
            PolicyRejection::NotAllowlisted {
                binary: "nmap".to_string()
            }
        );
    }

    #[test]
    fn test_allowlist_is_exact_match() {
        let policy = policy();
        assert!(check_allowed_command(&policy, &parse_command("Git status")).is_err());
        assert!(check_allowed_command(&policy, &parse_command("gitk")).is_err());
    }

    #[test]
    fn test_allowlist_disabled() {
        let mut policy = policy();
        policy.require_allowlist = false;
        assert!(check_allowed_command(&policy, &parse_command("nmap localhost")).is_ok());
    }

    #[test]
    fn test_directory_unrestricted_when_list_empty() {
        assert!(check_directory(&policy(), Some(Path::new("/etc"))).is_ok());
    }

    #[test]
    fn test_directory_unchecked_without_cwd() {
        let mut policy = policy();
        policy.allowed_directories = vec![PathBuf::from("/work")];
        assert!(check_directory(&policy, None).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_restriction() {
        let mut policy = policy();
        policy.allowed_directories = vec![PathBuf::from("/work")];

        let err = check_directory(&policy, Some(Path::new("/etc"))).unwrap_err();
        assert_eq!(
            err,
            PolicyRejection::DirectoryNotAllowed {
                cwd: "/etc".to_string()
            }
        );
        assert!(err.to_string().contains("not in allowed directories"));

        assert!(check_directory(&policy, Some(Path::new("/work/sub"))).is_ok());
        assert!(check_directory(&policy, Some(Path::new("/work"))).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_prefix_is_component_wise() {
        let mut policy = policy();
        policy.allowed_directories = vec![PathBuf::from("/work")];
        assert!(check_directory(&policy, Some(Path::new("/workspace"))).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_parent_escape_is_caught() {
        let mut policy = policy();
        policy.allowed_directories = vec![PathBuf::from("/work")];
        assert!(check_directory(&policy, Some(Path::new("/work/../etc"))).is_err());
    }

    #[test]
    fn test_directory_resolution_error_is_invalid_directory() {
        let mut policy = policy();
        policy.allowed_directories = vec![PathBuf::from("/work")];
        let err = check_directory(&policy, Some(Path::new(""))).unwrap_err();
        assert!(matches!(err, PolicyRejection::InvalidDirectory { .. }));
        assert!(err.to_string().starts_with("Invalid directory:"));
    }

    #[test]
    fn test_rm_root_is_rejected() {
        assert_eq!(rm("rm -rf /"), Err(PolicyRejection::UnsafeRemoval));
        assert_eq!(rm("rm -r /etc"), Err(PolicyRejection::UnsafeRemoval));
        assert_eq!(rm("rm -R ~"), Err(PolicyRejection::UnsafeRemoval));
        assert_eq!(
            rm("rm --no-preserve-root -fr /"),
            Err(PolicyRejection::UnsafeRemoval)
        );
    }

    #[test]
    fn test_rm_relative_target_is_allowed() {
        assert!(rm("rm -rf ./build").is_ok());
        assert!(rm("rm -r target node_modules").is_ok());
    }

    #[test]
    fn test_rm_absolute_outside_scratch_is_rejected() {
        assert_eq!(
            rm("rm -rf /home/dev/project/build"),
            Err(PolicyRejection::UnsafeRemoval)
        );
    }

    #[test]
    fn test_rm_under_scratch_is_allowed() {
        assert!(rm("rm -rf /tmp/build-cache").is_ok());
        assert!(rm("rm -rf /tmp").is_ok());
    }

    #[test]
    fn test_rm_scratch_prefix_is_component_wise() {
        assert_eq!(rm("rm -rf /tmpfiles"), Err(PolicyRejection::UnsafeRemoval));
    }

    #[test]
    fn test_rm_parent_components_cannot_escape_scratch() {
        assert_eq!(rm("rm -v -r /tmp/../etc"), Err(PolicyRejection::UnsafeRemoval));
        assert_eq!(
            rm("rm --no-preserve-root -r /tmp/../etc"),
            Err(PolicyRejection::UnsafeRemoval)
        );
        assert_eq!(rm("rm -rf /tmp/./../"), Err(PolicyRejection::UnsafeRemoval));
        assert_eq!(rm("rm -rf /tmp/a/../../usr"), Err(PolicyRejection::UnsafeRemoval));
        assert!(rm("rm -rf /tmp/a/../b").is_ok());
    }

    #[test]
    fn test_rm_protected_path_with_trailing_slash() {
        assert_eq!(rm("rm -r /etc/"), Err(PolicyRejection::UnsafeRemoval));
        assert_eq!(rm("rm -r //"), Err(PolicyRejection::UnsafeRemoval));
    }

    #[test]
    fn test_rm_flag_clusters_are_recursive() {
        assert_eq!(rm("rm -vr /etc"), Err(PolicyRejection::UnsafeRemoval));
        assert_eq!(rm("rm -Rv /usr"), Err(PolicyRejection::UnsafeRemoval));
        assert_eq!(rm("rm --recursive /var"), Err(PolicyRejection::UnsafeRemoval));
        assert!(rm("rm -v /etc/hosts.bak").is_ok());
    }

    #[test]
    fn test_rm_without_recursion_is_allowed() {
        assert!(rm("rm /etc/hosts.bak").is_ok());
        assert!(rm("rm -f /").is_ok());
    }

    #[test]
    fn test_rm_binary_path_is_not_a_target() {
        assert!(rm("/bin/rm -rf build").is_ok());
        assert_eq!(rm("/bin/rm -rf /"), Err(PolicyRejection::UnsafeRemoval));
    }

    #[test]
    fn test_rm_check_ignores_other_binaries() {
        assert!(check_rm(&policy(), &parse_command("find / -name x -r")).is_ok());
    }

    #[test]
    fn test_rm_respects_custom_scratch_directories() {
        let mut policy = policy();
        policy.scratch_directories = vec![PathBuf::from("/scratch")];
        assert!(check_rm(&policy, &parse_command("rm -rf /scratch/x")).is_ok());
        assert!(check_rm(&policy, &parse_command("rm -rf /tmp/x")).is_err());
    }
}
