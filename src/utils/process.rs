/// Configure la commande pour éviter l'ouverture d'une fenêtre console sur Windows.
pub fn configure_command_no_window(cmd: &mut std::process::Command) {
    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = cmd;
    }
}

/// Choisit le message d'erreur destiné à l'hôte: stderr, sinon stdout, sinon
/// le texte brut de l'erreur.
pub fn preferred_error_message(stderr: &str, stdout: &str, fallback: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    fallback.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_wins_over_stdout_and_fallback() {
        let message = preferred_error_message("boom\n", "partial output", "spawn failed");
        assert_eq!(message, "boom");
    }

    #[test]
    fn stdout_wins_when_stderr_is_blank() {
        let message = preferred_error_message("  \n", "partial output\n", "spawn failed");
        assert_eq!(message, "partial output");
    }

    #[test]
    fn fallback_used_when_both_streams_are_blank() {
        let message = preferred_error_message("", "\n", "spawn failed");
        assert_eq!(message, "spawn failed");
    }
}
