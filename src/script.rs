use std::fs;
use std::io::ErrorKind;

use crate::core::commands::Flow;
use crate::core::env::Environment;
use crate::core::expander::expand_tokens;
use crate::core::prompt;
use crate::core::tokenizer::tokenize;

/// How a startup script run ended. `Interrupted` covers every early stop:
/// unreadable file, syntax error, an `exit` line, or a dispatch that
/// signaled termination. The caller falls back to interactive mode either
/// way; a failed script never terminates the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    Completed,
    Interrupted,
}

/// Runs a startup script line by line through the shared
/// tokenize/expand/dispatch pipeline. The dispatcher is injected so the
/// runner stays independent of its configuration.
///
/// Blank lines and `#` comments are skipped; every executed line is echoed
/// with its 1-based line number and the current prompt. The script stops at
/// the first syntax error, `exit` line, or terminating dispatch result.
pub fn run_script<F>(path: &str, env: &dyn Environment, mut dispatch: F) -> ScriptStatus
where
    F: FnMut(&[String]) -> Flow,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            println!("Startup script not found: {}", path);
            return ScriptStatus::Interrupted;
        }
        Err(e) => {
            println!("Error executing startup script: {}", e);
            return ScriptStatus::Interrupted;
        }
    };

    println!("=== Executing startup script: {} ===", path);

    for (index, raw_line) in content.lines().enumerate() {
        let line_num = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Recomputed per line: cd moves the cwd mid-script.
        println!(
            "[SCRIPT:{}] {}{}",
            line_num,
            prompt::current_prompt(env),
            line
        );

        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                println!("Syntax error: {}", e);
                println!("Script stopped due to syntax error at line {}", line_num);
                return ScriptStatus::Interrupted;
            }
        };

        let args = expand_tokens(&tokens, env);

        // exit aborts the script before dispatch, so script mode never
        // prints the interactive farewell.
        if args.first().is_some_and(|a| a.eq_ignore_ascii_case("exit")) {
            println!("Script execution interrupted by exit command");
            return ScriptStatus::Interrupted;
        }

        if dispatch(&args) == Flow::Exit {
            println!("Script execution interrupted");
            return ScriptStatus::Interrupted;
        }
    }

    println!("=== Startup script execution completed ===");
    ScriptStatus::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::testing::FakeEnvironment;
    use std::env;
    use std::path::PathBuf;

    fn write_script(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn run_recorded(path: &PathBuf, env: &FakeEnvironment) -> (ScriptStatus, Vec<Vec<String>>) {
        let mut seen: Vec<Vec<String>> = Vec::new();
        let status = run_script(path.to_str().unwrap(), env, |args| {
            seen.push(args.to_vec());
            Flow::Continue
        });
        (status, seen)
    }

    #[test]
    fn test_runs_lines_in_order_skipping_blanks_and_comments() {
        let path = write_script(
            "shemu_script_ok.txt",
            "# header\n\nls -la\n  \ncd /tmp\n# trailing comment\n",
        );
        let env = FakeEnvironment::new(&[]);

        let (status, seen) = run_recorded(&path, &env);
        assert_eq!(status, ScriptStatus::Completed);
        assert_eq!(seen, vec![vec!["ls", "-la"], vec!["cd", "/tmp"]]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_expansion_applies_before_dispatch() {
        let path = write_script("shemu_script_expand.txt", "ls $TARGET\n");
        let env = FakeEnvironment::new(&[("TARGET", "/srv/data")]);

        let (status, seen) = run_recorded(&path, &env);
        assert_eq!(status, ScriptStatus::Completed);
        assert_eq!(seen, vec![vec!["ls", "/srv/data"]]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_syntax_error_stops_immediately() {
        let path = write_script("shemu_script_syntax.txt", "ls ok\necho 'broken\nls never\n");
        let env = FakeEnvironment::new(&[]);

        let (status, seen) = run_recorded(&path, &env);
        assert_eq!(status, ScriptStatus::Interrupted);
        // Only the line before the syntax error ran.
        assert_eq!(seen, vec![vec!["ls", "ok"]]);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_exit_interrupts_without_dispatch() {
        let path = write_script("shemu_script_exit.txt", "exit\nls never\n");
        let env = FakeEnvironment::new(&[]);

        let (status, seen) = run_recorded(&path, &env);
        assert_eq!(status, ScriptStatus::Interrupted);
        assert!(seen.is_empty());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_exit_is_case_insensitive() {
        let path = write_script("shemu_script_exit_caps.txt", "EXIT\n");
        let env = FakeEnvironment::new(&[]);

        let (status, seen) = run_recorded(&path, &env);
        assert_eq!(status, ScriptStatus::Interrupted);
        assert!(seen.is_empty());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_terminating_dispatch_interrupts() {
        let path = write_script("shemu_script_stop.txt", "stop here\nls never\n");
        let env = FakeEnvironment::new(&[]);

        let mut seen = Vec::new();
        let status = run_script(path.to_str().unwrap(), &env, |args| {
            seen.push(args.to_vec());
            Flow::Exit
        });
        assert_eq!(status, ScriptStatus::Interrupted);
        assert_eq!(seen.len(), 1);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_script_is_a_failure() {
        let env = FakeEnvironment::new(&[]);
        let status = run_script("/nonexistent/startup.sh", &env, |_| Flow::Continue);
        assert_eq!(status, ScriptStatus::Interrupted);
    }
}
