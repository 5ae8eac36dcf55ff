use std::env;
use std::path::{Path, PathBuf};

use crate::core::env::Environment;

/// Builds the REPL prompt, `username@hostname:dir$ ` (trailing space
/// included). Reads only the environment, the current directory, and the
/// home directory; no state is kept between calls.
pub fn current_prompt(env: &dyn Environment) -> String {
    let username = env
        .var("USER")
        .or_else(|| env.var("USERNAME"))
        .unwrap_or_else(|| "unknown".to_string());

    let hostname = os_hostname()
        .or_else(|| env.var("COMPUTERNAME"))
        .unwrap_or_else(|| "unknown-host".to_string());

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    let dir = display_dir(&cwd, dirs::home_dir().as_deref());

    format!("{}@{}:{}$ ", username, hostname, dir)
}

/// Abbreviates the working directory for display: `~` at the home
/// directory, `~/<rel>` below it, and just the last path component
/// anywhere else.
fn display_dir(cwd: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home {
        if let Ok(rel) = cwd.strip_prefix(home) {
            return if rel.as_os_str().is_empty() {
                "~".to_string()
            } else {
                format!("~/{}", rel.display())
            };
        }
    }

    match cwd.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => cwd.display().to_string(),
    }
}

fn os_hostname() -> Option<String> {
    let mut buf = [0u8; 256];
    let ret = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
    if ret != 0 {
        return None;
    }
    let len = buf.iter().position(|&b| b == 0)?;
    std::str::from_utf8(&buf[..len]).ok().map(str::to_owned)
}
