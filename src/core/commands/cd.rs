use std::env;
use std::io;
use std::io::ErrorKind;

use crate::core::env::Environment;

/// Changes the process working directory. With no argument the target is
/// `$HOME`, falling back to the OS home directory. Every filesystem error
/// is converted to a printed diagnostic; the working directory is left
/// unchanged on failure and nothing propagates to the caller.
pub fn change_directory(arg: Option<&str>, env_view: &dyn Environment) {
    let target = arg
        .map(str::to_owned)
        .or_else(|| env_view.var("HOME"))
        .or_else(|| dirs::home_dir().map(|p| p.to_string_lossy().into_owned()));

    let target = match target {
        Some(target) => target,
        None => {
            println!("cd: no such file or directory: ~");
            return;
        }
    };

    if let Err(e) = env::set_current_dir(&target) {
        println!("{}", diagnostic_for(&e, &target));
    }
}

fn diagnostic_for(e: &io::Error, dir: &str) -> String {
    match e.kind() {
        ErrorKind::NotFound => format!("cd: no such file or directory: {}", dir),
        ErrorKind::PermissionDenied => format!("cd: permission denied: {}", dir),
        _ if e.raw_os_error() == Some(libc::ENOTDIR) => {
            format!("cd: not a directory: {}", dir)
        }
        _ => format!("cd: {}: {}", dir, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::OsEnvironment;

    #[test]
    fn test_change_directory() {
        let env_view = OsEnvironment::new();
        let original = env::current_dir().unwrap();

        let temp_dir = env::temp_dir();
        change_directory(temp_dir.to_str(), &env_view);
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            temp_dir.canonicalize().unwrap()
        );

        // A failed cd leaves the working directory where it was.
        change_directory(Some("/path/that/does/not/exist"), &env_view);
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            temp_dir.canonicalize().unwrap()
        );

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn test_diagnostic_messages() {
        let not_found = io::Error::new(ErrorKind::NotFound, "missing");
        assert_eq!(
            diagnostic_for(&not_found, "/nonexistent"),
            "cd: no such file or directory: /nonexistent"
        );

        let denied = io::Error::new(ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            diagnostic_for(&denied, "/root/secret"),
            "cd: permission denied: /root/secret"
        );

        let not_a_dir = io::Error::from_raw_os_error(libc::ENOTDIR);
        assert_eq!(
            diagnostic_for(&not_a_dir, "/etc/passwd"),
            "cd: not a directory: /etc/passwd"
        );
    }
}
