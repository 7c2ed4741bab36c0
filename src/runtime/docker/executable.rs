use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::Platform;

const DOCKER: &str = "docker";

/// Well-known install locations, tried in order when `docker` is not on the PATH.
pub(crate) fn candidate_paths(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Windows => &[
            r"C:\Program Files\Docker\Docker\resources\bin\docker.exe",
            r"C:\Program Files\Docker\Docker\resources\bin\com.docker.cli.exe",
            r"C:\ProgramData\DockerDesktop\version-bin\docker.exe",
        ],
        Platform::MacOs => &[
            "/usr/local/bin/docker",
            "/opt/homebrew/bin/docker",
            "/Applications/Docker.app/Contents/Resources/bin/docker",
        ],
        Platform::Linux => &[
            "/usr/bin/docker",
            "/usr/local/bin/docker",
            "/snap/bin/docker",
        ],
    }
}

fn search_path(path_var: &OsStr, platform: Platform, exists: &dyn Fn(&Path) -> bool) -> Option<PathBuf> {
    let names: &[&str] = match platform {
        Platform::Windows => &["docker.exe", DOCKER],
        _ => &[DOCKER],
    };

    env::split_paths(path_var)
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|candidate| exists(candidate))
}

/// PATH first, then the platform's install locations, then the bare command name.
pub(crate) fn resolve_executable_with(
    path_var: Option<&OsStr>,
    platform: Platform,
    exists: &dyn Fn(&Path) -> bool,
) -> PathBuf {
    if let Some(found) = path_var.and_then(|paths| search_path(paths, platform, exists)) {
        return found;
    }

    candidate_paths(platform)
        .iter()
        .map(PathBuf::from)
        .find(|candidate| exists(candidate))
        .unwrap_or_else(|| {
            debug!("docker not found on PATH or in known locations, using bare command name");
            PathBuf::from(DOCKER)
        })
}

pub(crate) fn resolve_executable(platform: Platform) -> PathBuf {
    let path_var = env::var_os("PATH");
    resolve_executable_with(path_var.as_deref(), platform, &|path: &Path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::fs;
    use tempdir::TempDir;

    #[test]
    fn test_prefers_path_entry() {
        let dir = TempDir::new("docker-path").unwrap();
        let docker = dir.path().join("docker");
        fs::write(&docker, "#!/bin/sh\n").unwrap();

        let path_var = env::join_paths([dir.path()]).unwrap();
        let resolved = resolve_executable_with(Some(&path_var), Platform::Linux, &|p: &Path| p.is_file());

        assert_eq!(resolved, docker);
    }

    #[test]
    fn test_falls_back_to_known_locations() {
        let path_var = OsString::from("/nowhere");
        let resolved = resolve_executable_with(Some(&path_var), Platform::Windows, &|p: &Path| {
            p.to_string_lossy().ends_with("com.docker.cli.exe")
        });

        assert!(resolved.to_string_lossy().ends_with("com.docker.cli.exe"));
    }

    #[test]
    fn test_known_locations_keep_their_order() {
        let resolved = resolve_executable_with(None, Platform::MacOs, &|p: &Path| {
            p.starts_with("/opt/homebrew") || p.starts_with("/Applications")
        });

        assert_eq!(resolved, PathBuf::from("/opt/homebrew/bin/docker"));
    }

    #[test]
    fn test_bare_name_as_last_resort() {
        let resolved = resolve_executable_with(None, Platform::Linux, &|_: &Path| false);
        assert_eq!(resolved, PathBuf::from("docker"));
    }
}
